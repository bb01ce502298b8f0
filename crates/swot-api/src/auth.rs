//! Shared-secret guard for destructive operations.
//!
//! Deliberately not an authentication scheme: destructive endpoints check
//! one injected shared secret, configured via `SWOT_ADMIN_SECRET` and
//! presented by clients in the `X-Admin-Secret` header.

use axum::http::HeaderMap;

use crate::error::AppError;

const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Check the request carries the configured admin secret.
pub fn require_admin_secret(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let presented = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .ok_or_else(|| AppError::unauthorized("Missing X-Admin-Secret header"))?;

    if presented != expected {
        return Err(AppError::unauthorized("Admin secret does not match"));
    }

    Ok(())
}
