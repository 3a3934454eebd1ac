//! Client identity middleware
//!
//! The browser keeps its client token in the `browser_session_id` cookie.
//! Requests without a usable cookie get a freshly generated token, and the
//! response sets the cookie so the browser reuses it from then on. Handlers
//! read the token with `Extension<ClientToken>`.

use axum::{
    extract::Request,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use facnet_common::identity::CLIENT_TOKEN_KEY;
use facnet_common::ClientToken;
use tracing::debug;

/// Cookie lifetime: ten years (the token is never rotated)
const COOKIE_MAX_AGE_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Attach the caller's client token to the request, issuing one if needed
pub async fn client_identity(mut request: Request, next: Next) -> Response {
    let (token, issued) = match token_from_cookies(request.headers()) {
        Some(token) => (token, false),
        None => (ClientToken::generate(), true),
    };
    if issued {
        debug!("Issuing new client token");
    }

    request.extensions_mut().insert(token.clone());
    let mut response = next.run(request).await;

    if issued {
        if let Ok(value) = HeaderValue::from_str(&set_cookie_value(&token)) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// Client token from the request's `Cookie` headers, if present and valid
pub fn token_from_cookies(headers: &HeaderMap) -> Option<ClientToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CLIENT_TOKEN_KEY)
        .and_then(|(_, value)| ClientToken::parse(value).ok())
}

/// `Set-Cookie` value persisting `token` in the browser
pub fn set_cookie_value(token: &ClientToken) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        CLIENT_TOKEN_KEY, token, COOKIE_MAX_AGE_SECS
    )
}
