use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    handlers::shared::require_non_empty,
    services::{SessionContext, SessionService},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "Message")]
    pub message: String,
    pub token: String,
}

/// POST /login: resolve the user by username and hand back a session token.
pub async fn login(
    state: web::Data<AppState>,
    sessions: web::Data<SessionService>,
    query: web::Query<LoginQuery>,
) -> Result<HttpResponse, AppError> {
    let username = query.into_inner().username;
    require_non_empty("username", &username)?;

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| {
            log::warn!("Login for unknown username @{}", username);
            AppError::NotFound(format!("user @{}", username))
        })?;

    let token = sessions.issue_token(&user)?;
    log::info!("Session started for user {} (@{})", user.id, user.username);

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "OK (200)".to_string(),
        token,
    }))
}

/// GET/POST/PATCH/DELETE /memories.
///
/// The memory resource has no defined schema yet, so every method answers
/// 501 once the session is established.
pub async fn memories(req: HttpRequest, session: SessionContext) -> Result<HttpResponse, AppError> {
    log::info!(
        "{} /memories for user {} (@{})",
        req.method(),
        session.user_id,
        session.username
    );

    Err(AppError::NotImplemented)
}
