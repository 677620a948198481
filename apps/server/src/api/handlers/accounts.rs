//! User and admin account handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::api::extractors::ApiJson;
use crate::models::{parse_id, Credentials, ProfileUpdate, UserSignup};
use crate::state::AppState;
use crate::Result;

/// POST /api/users/signup
pub async fn user_signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserSignup>,
) -> Result<impl IntoResponse> {
    let user = state.account_service.signup_user(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": true,
            "message": "User created successfully!",
            "data": user,
        })),
    ))
}

/// POST /api/users/signin
pub async fn user_signin(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<impl IntoResponse> {
    let user = state.account_service.signin_user(credentials).await?;
    Ok(Json(json!({
        "status": true,
        "message": "Signin successful!",
        "data": {
            "id": user.id,
            "userName": user.user_name,
            "email": user.email,
            "phonenumber": user.phone_number,
        },
    })))
}

/// GET /api/users/alluser
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.account_service.list_users().await?;
    Ok(Json(json!({ "status": true, "data": users })))
}

/// PUT /api/users/updateusers/:userId
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&user_id, "user id")?;
    let user = state.account_service.update_profile(id, update).await?;
    Ok(Json(json!({
        "status": true,
        "message": "User updated successfully!",
        "data": user,
    })))
}

/// POST /api/admin/signup
pub async fn admin_signup(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<impl IntoResponse> {
    let admin = state.account_service.signup_admin(credentials).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": true,
            "message": "Admin created successfully!",
            "data": admin,
        })),
    ))
}

/// POST /api/admin/signin
pub async fn admin_signin(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<impl IntoResponse> {
    let admin = state.account_service.signin_admin(credentials).await?;
    Ok(Json(json!({
        "status": true,
        "message": "Signin successful!",
        "data": admin,
    })))
}

/// GET /api/admin/alluser
pub async fn list_admins(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let admins = state.account_service.list_admins().await?;
    Ok(Json(json!({ "status": true, "data": admins })))
}
