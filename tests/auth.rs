use axum::{
    extract::FromRequestParts,
    http::{Request, header},
};
use axum_storefront::{
    error::AppError,
    middleware::auth::{AuthUser, ensure_admin, issue_token, verify_token},
    state::AppState,
};
use chrono::Duration;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

const SECRET: &str = "test-secret";

fn state() -> AppState {
    AppState {
        orm: DatabaseConnection::default(),
        jwt_secret: SECRET.into(),
    }
}

async fn extract(authorization: Option<&str>) -> Result<AuthUser, AppError> {
    let mut builder = Request::builder().uri("/api/cart");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let (mut parts, _) = builder.body(()).expect("request").into_parts();
    AuthUser::from_request_parts(&mut parts, &state()).await
}

#[tokio::test]
async fn bearer_token_identifies_owner() {
    let user_id = Uuid::new_v4();
    let token = issue_token(user_id, "user", SECRET, Duration::hours(1)).expect("token");

    let user = extract(Some(&format!("Bearer {token}"))).await.expect("auth user");

    assert_eq!(user.user_id, user_id);
    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn missing_or_malformed_header_is_rejected() {
    assert!(matches!(extract(None).await, Err(AppError::Unauthorized(_))));
    assert!(matches!(
        extract(Some("Basic abc")).await,
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let token = issue_token(Uuid::new_v4(), "user", "other", Duration::hours(1)).expect("token");
    assert!(verify_token(&token, SECRET).is_err());
}

#[test]
fn only_admins_pass_admin_check() {
    let admin = AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".into(),
    };
    let user = AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".into(),
    };

    assert!(ensure_admin(&admin).is_ok());
    assert!(matches!(ensure_admin(&user), Err(AppError::Forbidden)));
}
