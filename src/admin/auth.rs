//! Admin session gate.
//!
//! Logging in with the configured token sets a cookie holding the token's
//! SHA-256 fingerprint; the token itself never round-trips to the browser.
//! No token configured = no gate (local-only, trusted loopback use), the
//! same stance the config takes for its other optional secrets.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::AppContext;

pub const SESSION_COOKIE: &str = "taskd_admin";

/// Cookie value for a logged-in session: lowercase hex SHA-256 of the token.
pub fn session_fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub fn is_authorized(config: &ServerConfig, jar: &CookieJar) -> bool {
    match config.admin_token.as_deref() {
        None => true,
        Some(token) => jar
            .get(SESSION_COOKIE)
            .map(|c| c.value() == session_fingerprint(token))
            .unwrap_or(false),
    }
}

pub async fn require_session(
    State(ctx): State<Arc<AppContext>>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    if is_authorized(&ctx.config, &jar) {
        next.run(req).await
    } else {
        Redirect::to("/admin/login").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> ServerConfig {
        ServerConfig {
            port: 0,
            data_dir: std::path::PathBuf::from("."),
            log: "error".into(),
            bind_address: "127.0.0.1".into(),
            log_format: "pretty".into(),
            admin_token: token.map(String::from),
        }
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        let fp = session_fingerprint("sesame");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        // Stable for the same token, different for another.
        assert_eq!(fp, session_fingerprint("sesame"));
        assert_ne!(fp, session_fingerprint("other"));
    }

    #[test]
    fn no_token_means_open_admin() {
        assert!(is_authorized(&config(None), &CookieJar::new()));
    }

    #[test]
    fn token_requires_matching_cookie() {
        use axum_extra::extract::cookie::Cookie;
        let cfg = config(Some("sesame"));
        assert!(!is_authorized(&cfg, &CookieJar::new()));

        let bad = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "wrong"));
        assert!(!is_authorized(&cfg, &bad));

        let good = CookieJar::new().add(Cookie::new(SESSION_COOKIE, session_fingerprint("sesame")));
        assert!(is_authorized(&cfg, &good));
    }
}
