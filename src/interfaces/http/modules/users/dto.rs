//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::UserInput;
use crate::domain::User;

/// Body of `POST /users` and `PUT /users/{user_id}`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[schema(example = "Alice")]
    pub name: String,
    #[validate(email(message = "value is not a valid email address"))]
    #[schema(example = "alice@gmail.com")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

impl From<UserRequest> for UserInput {
    fn from(r: UserRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            password: r.password,
        }
    }
}

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Stored bcrypt hash; only present when the listing policy allows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserDto {
    /// Public view: never carries the hash.
    pub fn public(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            password: None,
        }
    }

    pub fn with_hash(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            password: Some(u.password_hash),
        }
    }
}
