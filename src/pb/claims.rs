use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    id: String,
}

/// Reads the `id` claim from the payload segment of a JWT.
///
/// The signature is NOT checked. The backend verifies the token on every
/// call, so the result is only good for display and for filling the
/// `author` field; never use it to make an access decision.
pub fn unverified_user_id(token: &str) -> Option<String> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    // Some issuers keep the padding even though JWT forbids it.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;

    (!claims.id.is_empty()).then_some(claims.id)
}
