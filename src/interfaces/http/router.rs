//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AdminAuthenticator, BookingService};
use crate::domain::Attraction;
use crate::interfaces::http::common::ErrorBody;

use super::modules::request_id::request_id_middleware;
use super::modules::{auth, bookings, health};

/// Shared state for every route. Each handler extracts its own slice via
/// `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<BookingService>,
    pub authenticator: Arc<AdminAuthenticator>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

impl FromRef<ApiState> for bookings::BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        bookings::BookingAppState {
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        auth::AuthHandlerState {
            authenticator: Arc::clone(&s.authenticator),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("Admin password; the username is ignored"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::admin_login,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::update_booking,
        bookings::delete_booking,
        bookings::delete_all_bookings,
    ),
    components(
        schemas(
            ErrorBody,
            Attraction,
            auth::AuthResponse,
            bookings::BookingRequest,
            bookings::BookingDto,
            bookings::StatusResponse,
            bookings::MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Admin password check (HTTP basic)"),
        (name = "Bookings", description = "Park visit bookings"),
    ),
    info(
        title = "Extreme Park Booking API",
        version = "1.0.0",
        description = "Bookings for the park's attractions",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    service: Arc<BookingService>,
    authenticator: Arc<AdminAuthenticator>,
    db: DatabaseConnection,
) -> Router {
    let state = ApiState {
        service,
        authenticator,
        db,
        started_at: Arc::new(Instant::now()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/admin", post(auth::admin_login))
        .route("/book", post(bookings::create_booking))
        .route(
            "/bookings",
            get(bookings::list_bookings).delete(bookings::delete_all_bookings),
        )
        .route(
            "/bookings/{booking_id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .with_state(state);

    Router::new()
        .merge(swagger_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    use crate::infrastructure::database::test_connection;
    use crate::infrastructure::SeaOrmBookingRepository;
    use crate::interfaces::http::modules::auth::BasicCredentials;
    use crate::interfaces::http::modules::request_id::REQUEST_ID_HEADER;

    const PASSWORD: &str = "0123074";

    async fn app_with_hash(hash: Option<String>) -> Router {
        let db = test_connection().await;
        let repo = Arc::new(SeaOrmBookingRepository::new(db.clone()));
        let service = Arc::new(BookingService::new(repo));
        let authenticator = Arc::new(AdminAuthenticator::new(hash));
        create_api_router(service, authenticator, db)
    }

    async fn app() -> Router {
        app_with_hash(Some(bcrypt::hash(PASSWORD, 4).unwrap())).await
    }

    async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
        app.clone().into_service().call(req).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn login_request(password: &str) -> Request<Body> {
        let creds = BasicCredentials {
            username: "admin".into(),
            password: password.into(),
        };
        Request::builder()
            .method("POST")
            .uri("/auth/admin")
            .header(header::AUTHORIZATION, creds.to_header())
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn booking() -> Value {
        json!({
            "name": "A B",
            "phone": "1234567890",
            "age": 20,
            "date": "2024-06-01",
            "attractions": ["Zipline"]
        })
    }

    #[tokio::test]
    async fn book_list_delete_scenario() {
        let app = app().await;

        let resp = send(&app, json_request("POST", "/book", booking())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"status": "ok", "id": 1}));

        let resp = send(&app, empty_request("GET", "/bookings")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let mut expected = booking();
        expected["id"] = json!(1);
        assert_eq!(body_json(resp).await, json!([expected]));

        let resp = send(&app, empty_request("DELETE", "/bookings/1")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_json(resp).await["message"].is_string());

        let resp = send(&app, empty_request("GET", "/bookings")).await;
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn invalid_bookings_are_400() {
        let app = app().await;

        let mut short_phone = booking();
        short_phone["phone"] = json!("12345");
        let mut young = booking();
        young["age"] = json!(13);
        let mut unknown = booking();
        unknown["attractions"] = json!(["Ferris Wheel"]);
        let mut bad_date = booking();
        bad_date["date"] = json!("2024-13-45");

        for body in [short_phone, young, unknown, bad_date] {
            let resp = send(&app, json_request("POST", "/book", body)).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(resp).await["error"], "validation_error");
        }

        let resp = send(&app, empty_request("GET", "/bookings")).await;
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn whitespace_name_is_rejected_by_the_service() {
        let app = app().await;
        let mut body = booking();
        body["name"] = json!("   ");
        let resp = send(&app, json_request("POST", "/book", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["detail"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn missing_ids_are_404() {
        let app = app().await;

        let resp = send(&app, empty_request("GET", "/bookings/7")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "not_found");

        let resp = send(&app, empty_request("DELETE", "/bookings/7")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&app, json_request("PUT", "/bookings/7", booking())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_json_validation_error() {
        let app = app().await;
        send(&app, json_request("POST", "/book", booking())).await;

        let resp = send(&app, empty_request("DELETE", "/bookings/abc")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "validation_error");

        let resp = send(&app, json_request("PUT", "/bookings/4294967296", booking())).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "validation_error");

        let resp = send(&app, empty_request("GET", "/bookings")).await;
        assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn put_replaces_the_whole_record() {
        let app = app().await;
        send(&app, json_request("POST", "/book", booking())).await;

        let replacement = json!({
            "name": "C D",
            "phone": "987654321012345",
            "age": 41,
            "date": "2025-01-15",
            "attractions": ["Rope Park", "Climbing Wall"]
        });
        let resp = send(&app, json_request("PUT", "/bookings/1", replacement.clone())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"status": "updated"}));

        let resp = send(&app, empty_request("GET", "/bookings/1")).await;
        let mut expected = replacement;
        expected["id"] = json!(1);
        assert_eq!(body_json(resp).await, expected);
    }

    #[tokio::test]
    async fn delete_all_reports_count() {
        let app = app().await;
        send(&app, json_request("POST", "/book", booking())).await;
        send(&app, json_request("POST", "/book", booking())).await;

        let resp = send(&app, empty_request("DELETE", "/bookings")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["deleted"], 2);

        let resp = send(&app, empty_request("GET", "/bookings")).await;
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn admin_login_accepts_only_the_configured_password() {
        let app = app().await;

        let resp = send(&app, login_request(PASSWORD)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"status": "ok"}));

        let resp = send(&app, login_request("wrong")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
        assert_eq!(body_json(resp).await["error"], "unauthorized");

        let resp = send(&app, empty_request("POST", "/auth/admin")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_login_without_hash_is_configuration_error() {
        let app = app_with_hash(None).await;
        let resp = send(&app, login_request(PASSWORD)).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "configuration_error");
    }

    #[tokio::test]
    async fn health_reports_database_ok() {
        let app = app().await;
        let resp = send(&app, empty_request("GET", "/health")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app().await;
        let resp = send(&app, empty_request("GET", "/api-doc/openapi.json")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!(json["paths"]["/book"].is_object());
        assert!(json["paths"]["/bookings/{booking_id}"].is_object());
    }
}
