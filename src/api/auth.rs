use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

/// Username and password accepted by the gated endpoints
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check an `Authorization` header value
    pub fn verify(&self, header_value: &str) -> bool {
        let Some(encoded) = header_value.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(decoded) = String::from_utf8(decoded) else {
            return false;
        };

        match decoded.split_once(':') {
            Some((user, pass)) => {
                let user_ok = user.as_bytes().ct_eq(self.username.as_bytes());
                let pass_ok = pass.as_bytes().ct_eq(self.password.as_bytes());
                (user_ok & pass_ok).into()
            }
            None => false,
        }
    }
}

/// Axum middleware enforcing HTTP basic auth.
///
/// Rejects with 401 and a `WWW-Authenticate` challenge.
pub async fn basic_auth_middleware(
    State(credentials): State<Arc<BasicCredentials>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| credentials.verify(v));

    if !authorized {
        tracing::warn!(uri = %request.uri(), "Rejected request without valid credentials");
        return (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"clientwatch\"")],
            "Unauthorized",
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let creds = BasicCredentials::new("hook", "pw");

        assert!(creds.verify("Basic aG9vazpwdw=="));
        assert!(!creds.verify("Basic aG9vazp3cm9uZw=="));
        assert!(!creds.verify("Bearer aG9vazpwdw=="));
        assert!(!creds.verify("Basic not-base64!"));
    }

    #[test]
    fn test_password_may_contain_colon() {
        let creds = BasicCredentials::new("hook", "p:w");
        let header = format!("Basic {}", STANDARD.encode("hook:p:w"));
        assert!(creds.verify(&header));
    }

    #[test]
    fn test_rejects_partial_and_padded_credentials() {
        let creds = BasicCredentials::new("hook", "pw");

        for pair in ["hook:p", "hook:pw ", "hoo:pw", "hook:", ":pw", "hookpw"] {
            let header = format!("Basic {}", STANDARD.encode(pair));
            assert!(!creds.verify(&header), "{pair:?} accepted");
        }
    }
}
