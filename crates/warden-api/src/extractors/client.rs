//! Client provenance taken from request headers.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

use warden_auth::Provenance;

/// User-Agent and client address of the current request.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Raw User-Agent header.
    pub user_agent: Option<String>,
    /// First `X-Forwarded-For` hop, `X-Real-IP`, or the socket peer.
    pub address: Option<String>,
}

impl ClientInfo {
    /// Provenance to record with newly issued tokens.
    pub fn provenance(&self) -> Provenance {
        Provenance::new(self.user_agent.as_deref(), self.address.as_deref())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let user_agent = header(USER_AGENT.as_str());
        let address = header("x-forwarded-for")
            .and_then(|v| v.split(',').next().map(|s| s.trim().to_string()))
            .or_else(|| header("x-real-ip"))
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            });

        Ok(Self {
            user_agent,
            address,
        })
    }
}
