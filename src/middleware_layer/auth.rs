use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    error::{AppError, Result},
    models::session::Identity,
    models::user::Role,
    state::AppState,
};

/// Extracts the bearer token from the `Authorization` header.
///
/// # Arguments
///
/// * `headers` - The request headers.
///
/// # Returns
///
/// An `Option` containing the raw token if present.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// A middleware that requires a valid, unexpired bearer token.
///
/// On success the resolved `Identity` is inserted into the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let token = extract_bearer_token(request.headers()).ok_or_else(|| {
        AppError::Unauthenticated("no token".to_string())
    })?;

    let claims = state.tokens.verify(token)?;
    let identity = claims.identity();

    tracing::debug!("✅ Authenticated {} as {}", identity.user_id, identity.role);

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// A middleware that admits only administrators. Must run after `require_auth`.
pub async fn require_admin(
    Extension(identity): Extension<Identity>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    identity.require_role(Role::Admin)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(extract_bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
