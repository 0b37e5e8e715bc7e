//! Bearer token expiry inspection.
//!
//! The API issues JWTs; the CLI reads the `exp` claim (without verifying
//! the signature, which only the server can do) to decide whether a stored
//! session is worth presenting at all. A token that cannot be decoded
//! counts as expired, so garbage in the session file just means logging in
//! again.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

use curia_core::AccessToken;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

fn decode_claims(token: &AccessToken) -> Option<Claims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    decode::<Claims>(token.as_str(), &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims)
}

/// Whether the token's `exp` claim has passed (or the token is unreadable).
pub fn is_token_expired(token: &AccessToken) -> bool {
    match decode_claims(token) {
        Some(claims) => claims.exp < Utc::now().timestamp(),
        None => true,
    }
}

/// The token's expiry time, when one can be read.
pub fn expires_at(token: &AccessToken) -> Option<DateTime<Utc>> {
    decode_claims(token).and_then(|claims| Utc.timestamp_opt(claims.exp, 0).single())
}
