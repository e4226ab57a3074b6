use actix_web::{dev::Payload, web::Data, FromRequest, HttpRequest};
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::config::Config;
use crate::database::models::User;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: i64, // user id
    pub username: String,
    pub exp: usize, // expiration time
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct SessionService {
    config: Config,
}

impl SessionService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let expiration = Utc::now() + Duration::days(self.config.jwt_expiration_days);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            exp: expiration.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?;

        Ok(token)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}

/// The authenticated identity of a request, handed to session-scoped
/// handlers. Built from the `Authorization: Bearer` token, so it does not
/// depend on any server-side session store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub user_id: i64,
    pub username: String,
}

impl From<Claims> for SessionContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

impl FromRequest for SessionContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token) = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        else {
            return ready(Err(AppError::Unauthorized));
        };

        let Some(sessions) = req.app_data::<Data<SessionService>>() else {
            log::error!("SessionService missing from app data");
            return ready(Err(AppError::internal_server_error()));
        };

        match sessions.verify_token(token) {
            Ok(claims) => ready(Ok(claims.into())),
            Err(e) => {
                log::debug!("Rejected session token: {}", e);
                ready(Err(AppError::Unauthorized))
            }
        }
    }
}
