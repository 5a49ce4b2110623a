use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Clerk session-token claims.
///
/// `sub` is the Clerk user id (an opaque string like `user_2abc...`). Email
/// and name come from a JWT template configured on the Clerk instance; both
/// are optional because older sessions may predate the template.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Clerk user id.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Issuer, the Clerk frontend API origin.
    pub iss: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Claims {
    /// Best-effort display name assembled from the template claims.
    pub fn full_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or(""),
        );
        name.trim().to_string()
    }
}

/// Decode and validate a token against a known key. The JWKS cache calls
/// this with the provider's RS256 key; tests call it with a local HS256 one.
pub fn decode_claims(
    token: &str,
    key: &DecodingKey,
    algorithm: Algorithm,
) -> Result<Claims, String> {
    let mut validation = Validation::new(algorithm);
    validation.validate_aud = false;

    decode::<Claims>(token, key, &validation)
        .map(|td| td.claims)
        .map_err(|e| format!("Token validation failed: {e:?}"))
}
