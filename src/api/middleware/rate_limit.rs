//! Rate limiting middleware using token bucket algorithm.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Limits applied per client address.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    /// Sustained requests per second; one token is replenished every
    /// `1s / per_second`.
    pub per_second: u64,
    pub burst: u32,
    /// Read the client address from `X-Forwarded-For` / `X-Real-IP`
    /// instead of the peer socket. Only safe behind a trusted proxy.
    pub behind_proxy: bool,
}

/// Picks the client address from the socket or from proxy headers.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates a per-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// The peer address is read from `ConnectInfo`, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// Returns `None` if `per_second` or `burst` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let limiter = rate_limit::layer(settings).context("Invalid rate limit settings")?;
/// let api = Router::new()
///     .route("/users", get(user_index_handler))
///     .layer(limiter);
/// ```
pub fn layer(
    settings: RateLimitSettings,
) -> Option<GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
{
    if settings.per_second == 0 {
        return None;
    }

    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor {
            behind_proxy: settings.behind_proxy,
        })
        .period(Duration::from_nanos(1_000_000_000 / settings.per_second))
        .burst_size(settings.burst)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}
