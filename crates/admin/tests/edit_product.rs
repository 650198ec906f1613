//! Integration tests for the edit-product page.
//!
//! The admin router is driven through `tower::ServiceExt::oneshot`; the
//! catalog API is an in-process axum stub bound to an ephemeral port so the
//! real `CatalogClient` (auth header injection, multipart encoding, error
//! parsing) is exercised over the wire.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, State},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::json;
use tower::ServiceExt;

use oakmere_admin::config::{AdminConfig, CatalogConfig};
use oakmere_admin::middleware::identity_headers;
use oakmere_admin::routes;
use oakmere_admin::state::AppState;

const BOUNDARY: &str = "----oakmere-test-boundary";

// ---------------------------------------------------------------------------
// Catalog API stub
// ---------------------------------------------------------------------------

/// One recorded `PUT /api/products/{id}` request.
#[derive(Debug, Default, Clone)]
struct RecordedUpdate {
    authorization: Option<String>,
    texts: Vec<(String, String)>,
    files: Vec<(String, String)>,
}

struct StubCatalog {
    /// Body of the `product` envelope returned by GET.
    product: serde_json::Value,
    /// When true, GET answers 500.
    fail_get: bool,
    /// Status + JSON body answered to PUT.
    update_status: StatusCode,
    update_body: serde_json::Value,
    puts: Mutex<Vec<RecordedUpdate>>,
}

impl StubCatalog {
    fn chair() -> Self {
        Self {
            product: json!({
                "name": "Chair",
                "description": "",
                "price": 20,
                "stock": 5,
                "category": "Furniture",
                "discount": 10,
                "isNew": true
            }),
            fail_get: false,
            update_status: StatusCode::OK,
            update_body: json!({"message": "updated"}),
            puts: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<RecordedUpdate> {
        self.puts.lock().unwrap().clone()
    }
}

async fn stub_get_product(State(stub): State<Arc<StubCatalog>>) -> Response {
    if stub.fail_get {
        return (StatusCode::INTERNAL_SERVER_ERROR, "catalog down").into_response();
    }
    Json(json!({ "product": stub.product })).into_response()
}

async fn stub_put_product(
    State(stub): State<Arc<StubCatalog>>,
    headers: axum::http::HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut recorded = RecordedUpdate {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        ..RecordedUpdate::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap().to_owned();
        if let Some(file_name) = field.file_name() {
            let file_name = file_name.to_owned();
            let _bytes = field.bytes().await.unwrap();
            recorded.files.push((name, file_name));
        } else {
            recorded.texts.push((name, field.text().await.unwrap()));
        }
    }

    stub.puts.lock().unwrap().push(recorded);
    (stub.update_status, Json(stub.update_body.clone())).into_response()
}

/// Bind the stub to an ephemeral port and return its base URL.
async fn spawn_stub(stub: Arc<StubCatalog>) -> String {
    let router = Router::new()
        .route(
            "/api/products/{id}",
            get(stub_get_product).put(stub_put_product),
        )
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Admin app harness
// ---------------------------------------------------------------------------

fn build_admin_app(catalog_base_url: &str) -> Router {
    let config = AdminConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        catalog: CatalogConfig {
            base_url: catalog_base_url.to_owned(),
            api_token: SecretString::from("k9Q!wZ4@pL7#vN2$tR8&yH1*bG5^dJ3"),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    };

    let state = AppState::new(config).unwrap();
    routes::routes().with_state(state)
}

fn with_admin_identity(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder
        .header(identity_headers::USER, "Sam")
        .header(identity_headers::EMAIL, "sam@oakmere.shop")
        .header(identity_headers::ROLE, "admin")
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Build a `multipart/form-data` body from text fields and file parts.
fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    for (name, file_name, content_type, data) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn update_request(id: &str, body: Vec<u8>) -> Request<Body> {
    with_admin_identity(Request::builder())
        .method("POST")
        .uri(format!("/products/{id}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn valid_fields<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Chair"),
        ("description", "Oak frame"),
        ("price", "25"),
        ("stock", "4"),
        ("category", "Furniture"),
        ("discount", "0"),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_page_renders_record_values() {
    let stub = Arc::new(StubCatalog::chair());
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let request = with_admin_identity(Request::builder())
        .uri("/products/abc123/edit")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Chair"));
    assert!(html.contains("Furniture"));
    // isNew came back true, so the toggle is pre-checked.
    assert!(html.contains("checked"));
}

#[tokio::test]
async fn edit_page_surfaces_load_failure() {
    let stub = Arc::new(StubCatalog {
        fail_get: true,
        ..StubCatalog::chair()
    });
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let request = with_admin_identity(Request::builder())
        .uri("/products/abc123/edit")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // The page stays usable with an empty form and a blocking banner.
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Error loading product data"));
}

#[tokio::test]
async fn update_sends_all_text_fields_and_redirects() {
    let stub = Arc::new(StubCatalog::chair());
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let mut fields = valid_fields();
    fields.push(("isNew", "on"));
    let response = app
        .oneshot(update_request("abc123", multipart_body(&fields, &[])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/products?updated=1"
    );

    let recorded = stub.recorded();
    assert_eq!(recorded.len(), 1);
    let update = recorded.first().unwrap();

    let names: Vec<&str> = update.texts.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["name", "description", "price", "stock", "category", "discount", "isNew"]
    );
    assert!(update.texts.contains(&("isNew".to_owned(), "true".to_owned())));
    assert!(update.files.is_empty());

    // The bearer token from config must be injected on the outbound call.
    let auth = update.authorization.as_deref().unwrap();
    assert!(auth.starts_with("Bearer "));
}

#[tokio::test]
async fn update_includes_replaced_image_only() {
    let stub = Arc::new(StubCatalog::chair());
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let files: Vec<(&str, &str, &str, &[u8])> =
        vec![("image", "chair.png", "image/png", b"\x89PNG fake")];
    let response = app
        .oneshot(update_request(
            "abc123",
            multipart_body(&valid_fields(), &files),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let recorded = stub.recorded();
    let update = recorded.first().unwrap();
    assert_eq!(
        update.files,
        vec![("image".to_owned(), "chair.png".to_owned())]
    );
    assert!(!update.files.iter().any(|(n, _)| n == "hoverImage"));
}

#[tokio::test]
async fn validation_failure_blocks_network_write() {
    let stub = Arc::new(StubCatalog::chair());
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let mut fields = valid_fields();
    fields.retain(|(n, _)| *n != "name");
    fields.push(("name", ""));
    let response = app
        .oneshot(update_request("abc123", multipart_body(&fields, &[])))
        .await
        .unwrap();

    // Form is re-rendered with the warning; nothing reached the catalog.
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Please fill all required fields"));
    assert!(stub.recorded().is_empty());
}

#[tokio::test]
async fn update_failure_shows_server_message_and_keeps_draft() {
    let stub = Arc::new(StubCatalog {
        update_status: StatusCode::UNPROCESSABLE_ENTITY,
        update_body: json!({"message": "Invalid price"}),
        ..StubCatalog::chair()
    });
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let response = app
        .oneshot(update_request(
            "abc123",
            multipart_body(&valid_fields(), &[]),
        ))
        .await
        .unwrap();

    // No redirect; the form comes back with the server's message and the
    // submitted values intact for retry.
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Invalid price"));
    assert!(html.contains("Oak frame"));
}

#[tokio::test]
async fn update_not_found_shows_server_message() {
    let stub = Arc::new(StubCatalog {
        update_status: StatusCode::NOT_FOUND,
        update_body: json!({"message": "Product not found"}),
        ..StubCatalog::chair()
    });
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let response = app
        .oneshot(update_request(
            "abc123",
            multipart_body(&valid_fields(), &[]),
        ))
        .await
        .unwrap();

    // The body's message is surfaced verbatim even for a 404.
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Product not found"));
    assert!(!html.contains("Error updating product"));
}

#[tokio::test]
async fn requests_without_identity_headers_are_rejected() {
    let stub = Arc::new(StubCatalog::chair());
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let request = Request::builder()
        .uri("/products/abc123/edit")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn viewer_role_cannot_open_edit_page() {
    let stub = Arc::new(StubCatalog::chair());
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let request = Request::builder()
        .uri("/products/abc123/edit")
        .header(identity_headers::USER, "Sam")
        .header(identity_headers::ROLE, "viewer")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn root_redirects_to_product_listing() {
    let stub = Arc::new(StubCatalog::chair());
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let app = build_admin_app(&base_url);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/products");
}
