/// A persisted user row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// bcrypt hash; never the plaintext the client sent
    pub password_hash: String,
}

/// The full set of writable columns, used for both insert and replace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
