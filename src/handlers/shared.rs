use std::str::FromStr;

use actix_web::{
    error::{PathError, QueryPayloadError},
    HttpRequest, HttpResponse,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;
use crate::middleware::RequestIdExt;

/// The `{"Message": "..."}` body every mutating endpoint answers with.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn ok() -> HttpResponse {
        HttpResponse::Ok().json(Self::new("OK (200)"))
    }

    pub fn updated() -> HttpResponse {
        HttpResponse::Ok().json(Self::new("UPDATED (200)"))
    }

    pub fn deleted() -> HttpResponse {
        HttpResponse::Ok().json(Self::new("DELETED (200)"))
    }
}

/// Fallback for methods a resource does not serve.
pub async fn wrong_request(req: HttpRequest) -> Result<HttpResponse, AppError> {
    log::debug!(
        "{} not served on {} (correlation_id={})",
        req.method(),
        req.path(),
        req.correlation_id().unwrap_or_default()
    );
    Err(AppError::WrongRequest)
}

/// Fallback for paths no resource matches.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    log::debug!(
        "No route for {} {} (correlation_id={})",
        req.method(),
        req.path(),
        req.correlation_id().unwrap_or_default()
    );
    Err(AppError::NotFound(req.path().to_string()))
}

/// Turns query-string deserialisation failures (missing field, unknown
/// field, unparsable number) into a JSON 400.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!(
        "Rejected query string for {}: {} (correlation_id={})",
        req.path(),
        err,
        req.correlation_id().unwrap_or_default()
    );
    AppError::BadRequest(err.to_string()).into()
}

/// A path segment that does not parse (e.g. `/users/abc`) names no resource.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::debug!(
        "Unresolvable path {}: {} (correlation_id={})",
        req.path(),
        err,
        req.correlation_id().unwrap_or_default()
    );
    AppError::NotFound(req.path().to_string()).into()
}

// Query strings carry `latitude=` for "not given"; treat it like a missing key.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s)
            .map_err(serde::de::Error::custom)
            .map(Some),
    }
}

fn parse_coordinate<E: serde::de::Error>(raw: &str) -> Result<f64, E> {
    let value = f64::from_str(raw).map_err(E::custom)?;
    if !value.is_finite() {
        return Err(E::custom(format!("coordinate must be a finite number, got '{}'", raw)));
    }
    Ok(value)
}

/// Required latitude/longitude. `f64::from_str` also accepts `NaN` and `inf`,
/// which have no place on a map.
pub fn finite_coordinate<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    parse_coordinate(&raw)
}

/// Optional latitude/longitude; empty means not given.
pub fn optional_finite_coordinate<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => parse_coordinate(raw).map(Some),
    }
}

/// Required string fields must be present and non-blank.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("'{}' must not be empty", field)));
    }
    Ok(())
}
