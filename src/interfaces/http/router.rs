//! API Router with Swagger UI

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::UserService;
use crate::config::AppConfig;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ErrorResponse, MessageResponse};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{health, metrics, users};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Users
        users::create_user,
        users::get_user,
        users::list_users,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ComponentHealth,
            users::UserRequest,
            users::UserDto,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Users", description = "Create, read, replace and delete users"),
    ),
    info(
        title = "Users Service API",
        version = "1.0.0",
        description = "CRUD over a single users table with bcrypt password storage",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    user_service: Arc<UserService<UserRepository>>,
    db: DatabaseConnection,
    app_cfg: &AppConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let user_state = users::UserHandlerState {
        user_service,
        expose_password_hash: app_cfg.users.expose_password_hash,
    };

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(user_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState::new(db));

    // Scrapes are not counted in the request metrics
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(user_routes)
        .merge(health_routes)
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .merge(metrics_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};

    use crate::application::PasswordHasher;
    use crate::domain::EmailDomainPolicy;
    use crate::infrastructure::crypto::password::BcryptHasher;
    use crate::infrastructure::database::{ensure_schema, init_database, DatabaseConfig};

    const TEST_COST: u32 = 4;

    async fn app_with(expose_password_hash: bool) -> Router {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();

        let mut cfg = AppConfig::default();
        cfg.users.expose_password_hash = expose_password_hash;

        let service = Arc::new(UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(BcryptHasher::new(TEST_COST)),
            EmailDomainPolicy::new(&cfg.users.allowed_email_domain),
        ));
        let handle = PrometheusBuilder::new().build_recorder().handle();

        create_api_router(service, db, &cfg, handle)
    }

    async fn app() -> Router {
        app_with(false).await
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        use tower::Service;

        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let mut svc = app.clone().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn user(name: &str, email: &str, password: &str) -> Value {
        json!({"name": name, "email": email, "password": password})
    }

    #[tokio::test]
    async fn create_with_accepted_domain() {
        let app = app().await;
        let (status, body) = send(&app, "POST", "/users", Some(user("A", "a@gmail.com", "p1"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "user created successfully"}));
    }

    #[tokio::test]
    async fn create_with_other_domain_is_rejected_and_not_stored() {
        let app = app().await;
        let (status, body) = send(&app, "POST", "/users", Some(user("B", "b@yahoo.com", "p2"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Email must be @gmail.com");

        let (_, list) = send(&app, "GET", "/users", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn create_with_malformed_email_is_unprocessable() {
        let app = app().await;
        let (status, body) = send(&app, "POST", "/users", Some(user("C", "not-an-email", "p"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().starts_with("email:"));
    }

    #[tokio::test]
    async fn fetch_returns_name_and_email_without_password() {
        let app = app().await;
        send(&app, "POST", "/users", Some(user("Alice", "alice@gmail.com", "secret"))).await;

        let (status, body) = send(&app, "GET", "/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Alice", "email": "alice@gmail.com"}));
    }

    #[tokio::test]
    async fn fetch_missing_is_not_found() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/users/99", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not found: User with id=99");
    }

    #[tokio::test]
    async fn non_integer_id_is_rejected() {
        let app = app().await;
        let (status, _) = send(&app, "GET", "/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_returns_every_created_user() {
        let app = app().await;
        for i in 0..3 {
            let email = format!("u{i}@gmail.com");
            send(&app, "POST", "/users", Some(user(&format!("U{i}"), &email, "pw"))).await;
        }

        let (status, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.get("password").is_none()));
        assert_eq!(rows[0]["name"], "U0");
    }

    #[tokio::test]
    async fn stored_password_is_a_hash_of_the_plaintext() {
        let app = app_with(true).await;
        send(&app, "POST", "/users", Some(user("A", "a@gmail.com", "p1"))).await;

        let (_, body) = send(&app, "GET", "/users", None).await;
        let stored = body[0]["password"].as_str().unwrap();
        assert_ne!(stored, "p1");
        assert!(BcryptHasher::new(TEST_COST).verify("p1", stored).unwrap());
    }

    #[tokio::test]
    async fn update_replaces_only_the_target_row() {
        let app = app_with(true).await;
        send(&app, "POST", "/users", Some(user("A", "a@gmail.com", "p1"))).await;
        send(&app, "POST", "/users", Some(user("B", "b@gmail.com", "p2"))).await;
        let (_, before) = send(&app, "GET", "/users", None).await;

        // the domain rule only applies on create
        let (status, body) = send(
            &app,
            "PUT",
            "/users/1",
            Some(user("A2", "a2@yahoo.com", "p3")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "user updated successfully"}));

        let (_, after) = send(&app, "GET", "/users", None).await;
        assert_eq!(after[0]["name"], "A2");
        assert_eq!(after[0]["email"], "a2@yahoo.com");
        assert_ne!(after[0]["password"], before[0]["password"]);
        assert!(BcryptHasher::new(TEST_COST)
            .verify("p3", after[0]["password"].as_str().unwrap())
            .unwrap());
        assert_eq!(after[1], before[1]);
    }

    #[tokio::test]
    async fn update_missing_id_is_silent() {
        let app = app().await;
        let (status, body) = send(&app, "PUT", "/users/5", Some(user("X", "x@gmail.com", "pw"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "user updated successfully");
        let (_, list) = send(&app, "GET", "/users", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn update_still_validates_email_syntax() {
        let app = app().await;
        let (status, _) = send(&app, "PUT", "/users/1", Some(user("X", "broken", "pw"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let app = app().await;
        send(&app, "POST", "/users", Some(user("A", "a@gmail.com", "p1"))).await;
        send(&app, "POST", "/users", Some(user("B", "b@gmail.com", "p2"))).await;

        let (status, body) = send(&app, "DELETE", "/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "user deleted successfully"}));

        let (status, _) = send(&app, "GET", "/users/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, list) = send(&app, "GET", "/users", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["name"], "B");
    }

    #[tokio::test]
    async fn delete_missing_id_is_silent() {
        let app = app().await;
        let (status, _) = send(&app, "DELETE", "/users/42", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn health_and_docs_are_served() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, spec) = send(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(spec["paths"]["/users/{user_id}"].is_object());
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        use tower::Service;

        let app = app().await;
        let mut svc = app.into_service();
        let resp = svc
            .call(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(resp.headers().contains_key("x-request-id"));
    }
}
