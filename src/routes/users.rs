use crate::handlers::users;
use crate::state::AppState;
use axum::{routing::post, Router};

/// POST /user/signup, /user/signin, /user/signout.
pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/user/signup", post(users::sign_up))
        .route("/user/signin", post(users::sign_in))
        .route("/user/signout", post(users::sign_out))
        .with_state(state)
}
