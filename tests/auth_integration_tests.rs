mod common;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{get, post, put, register_user, test_app, test_app_with_admin_code};

#[tokio::test]
async fn test_register_returns_user_id_and_public_listing() {
    let app = test_app().await;

    let id = register_user(&app, "budi@example.com", "Budi Santoso", "user").await;
    assert!(id > 0);

    let (status, body) = get(&app, "/api/users").await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "budi@example.com");
    assert_eq!(users[0]["nama_lengkap"], "Budi Santoso");
    assert_eq!(users[0]["role"], "user");
    assert!(users[0]["status_verifikasi"].is_null());
    // The hash must never be exposed
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected_and_count_unchanged() {
    let app = test_app().await;
    register_user(&app, "budi@example.com", "Budi Santoso", "user").await;

    let (status, body) = post(
        &app,
        "/api/register",
        json!({
            "email": "budi@example.com",
            "password": "lain456",
            "nama_lengkap": "Budi Kedua",
            "role": "user",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email sudah terdaftar");

    let (_, body) = get(&app, "/api/users").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_password_rejected() {
    let app = test_app().await;
    let (status, _) = post(
        &app,
        "/api/register",
        json!({
            "email": "budi@example.com",
            "password": "",
            "nama_lengkap": "Budi Santoso",
            "role": "user",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/users").await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let app = test_app().await;
    let (status, _) = post(
        &app,
        "/api/register",
        json!({
            "email": "x@example.com",
            "password": "pw",
            "nama_lengkap": "X",
            "role": "superadmin",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success_returns_public_user() {
    let app = test_app().await;
    let id = register_user(&app, "budi@example.com", "Budi Santoso", "user").await;

    let (status, body) = post(
        &app,
        "/api/login",
        json!({"email": "budi@example.com", "password": "rahasia123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login berhasil");
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let app = test_app().await;
    register_user(&app, "budi@example.com", "Budi Santoso", "user").await;

    let (wrong_pw_status, wrong_pw_body) = post(
        &app,
        "/api/login",
        json!({"email": "budi@example.com", "password": "salah"}),
    )
    .await;
    let (wrong_email_status, wrong_email_body) = post(
        &app,
        "/api/login",
        json!({"email": "tidak-ada@example.com", "password": "rahasia123"}),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_email_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body["error"], wrong_email_body["error"]);
}

#[tokio::test]
async fn test_mitra_verification_lifecycle() {
    let app = test_app().await;
    let mitra_id = register_user(&app, "mitra@example.com", "Mitra Jaya", "mitra").await;

    // Unverified mitra cannot log in
    let (status, body) = post(
        &app,
        "/api/login",
        json!({"email": "mitra@example.com", "password": "rahasia123"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Akun Anda belum diverifikasi oleh Admin");

    // Shows up in the unverified listing
    let (_, body) = get(&app, "/api/mitra/unverified").await;
    let pending = body["data"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], mitra_id);

    // Admin approves (no explicit status defaults to terverifikasi)
    let (status, _) = put(&app, &format!("/api/users/{}/verify", mitra_id), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    // Now in the verified listing and able to log in
    let (_, body) = get(&app, "/api/mitra/verified").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    let (_, body) = get(&app, "/api/mitra/unverified").await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, body) = post(
        &app,
        "/api/login",
        json!({"email": "mitra@example.com", "password": "rahasia123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["status_verifikasi"], "terverifikasi");
}

#[tokio::test]
async fn test_verify_with_explicit_status() {
    let app = test_app().await;
    let mitra_id = register_user(&app, "mitra@example.com", "Mitra Jaya", "mitra").await;

    let (status, _) = put(
        &app,
        &format!("/api/users/{}/verify", mitra_id),
        json!({"status": "terverifikasi"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = put(
        &app,
        &format!("/api/users/{}/verify", mitra_id),
        json!({"status": "disetujui"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_unknown_user_returns_404() {
    let app = test_app().await;
    let (status, body) = put(&app, "/api/users/9999/verify", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User tidak ditemukan");
}

#[tokio::test]
async fn test_admin_code_login() {
    let app = test_app().await;

    let (status, body) = post(&app, "/api/admin/login", json!({"code": "011090"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["id"], "admin");

    let (status, body) = post(&app, "/api/admin/login", json!({"code": "000000"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Kode admin salah");
}

#[tokio::test]
async fn test_admin_code_login_disabled_without_flag() {
    let app = test_app_with_admin_code(None).await;

    let (status, _) = post(&app, "/api/admin/login", json!({"code": "011090"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
