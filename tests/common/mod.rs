use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde_json::{Value, json};
use smartcare_backend::AppState;
use tower::ServiceExt;

/// Fresh in-memory SQLite database migrated with the production Migrator.
/// A single pooled connection keeps every query on the same memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn test_app() -> Router {
    test_app_with_admin_code(Some("011090".to_string())).await
}

#[allow(dead_code)]
pub async fn test_app_with_admin_code(admin_code: Option<String>) -> Router {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    smartcare_backend::router(AppState { db, admin_code })
}

/// One request against the router, returning status and parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(value.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

#[allow(dead_code)]
pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

#[allow(dead_code)]
pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(body)).await
}

/// Registers an account and returns its id.
#[allow(dead_code)]
pub async fn register_user(app: &Router, email: &str, nama: &str, role: &str) -> i32 {
    let (status, body) = post(
        app,
        "/api/register",
        json!({
            "email": email,
            "password": "rahasia123",
            "nama_lengkap": nama,
            "role": role,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["user_id"].as_i64().unwrap() as i32
}

/// Registers a mitra and marks it verified through the admin endpoint.
#[allow(dead_code)]
pub async fn register_verified_mitra(app: &Router, email: &str, nama: &str) -> i32 {
    let id = register_user(app, email, nama, "mitra").await;
    let (status, _) = put(app, &format!("/api/users/{}/verify", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    id
}

/// Creates an order between the given accounts and returns its id.
#[allow(dead_code)]
pub async fn create_order(app: &Router, id_user: i32, id_mitra: i32) -> i32 {
    let (status, body) = post(
        app,
        "/api/pesanan",
        json!({
            "id_user": id_user,
            "id_mitra": id_mitra,
            "jenis_layanan": "bersih_rumah",
            "deskripsi": "Bersih-bersih rumah dua lantai",
            "alamat": "Jl. Melati No. 5, Bandung",
            "waktu_diinginkan": "2025-01-01T10:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create order failed: {}", body);
    body["pesanan_id"].as_i64().unwrap() as i32
}
