//! Account routes: users under `/api/users`, admins under `/api/admin`

use crate::api::handlers::accounts;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/usersignup", post(accounts::user_signup))
        .route("/usersignin", post(accounts::user_signin))
        // short aliases
        .route("/signup", post(accounts::user_signup))
        .route("/signin", post(accounts::user_signin))
        .route("/alluser", get(accounts::list_users))
        .route("/updateusers/:userId", put(accounts::update_user))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(accounts::admin_signup))
        .route("/signin", post(accounts::admin_signin))
        .route("/alluser", get(accounts::list_admins))
}
