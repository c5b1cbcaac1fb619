use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::config::RateLimitConfig;
use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

pub const THROTTLE_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Sliding-window request counter keyed by remote address. Applied to the
/// mutating route subtrees only; health and the root greeting stay open.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests as usize,
            window: Duration::from_secs(config.window_secs),
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn try_acquire(&self, addr: IpAddr, now: Instant) -> bool {
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let stamps = hits.entry(addr).or_default();
        stamps.retain(|at| now.duration_since(*at) < self.window);
        if stamps.len() >= self.max_requests {
            return false;
        }
        stamps.push(now);
        true
    }
}

pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if !limiter.try_acquire(addr, Instant::now()) {
        return (StatusCode::TOO_MANY_REQUESTS, THROTTLE_MESSAGE).into_response();
    }
    next.run(req).await
}
