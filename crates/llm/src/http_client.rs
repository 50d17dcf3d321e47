//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with proxy
//! support and a request timeout.

use std::time::Duration;

use boundary_guard_core::proxy::ProxyConfig;

/// Build a `reqwest::Client` with the resolved proxy configuration.
///
/// - `Some(proxy)` -> configure proxy on the client
/// - `None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
///
/// The timeout applies to each whole request; expiry surfaces to callers
/// as a network error.
pub fn build_http_client(proxy: Option<&ProxyConfig>, timeout: Duration) -> reqwest::Client {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    match proxy {
        Some(cfg) => {
            let url = cfg.url();
            let mut p = reqwest::Proxy::all(&url).expect("valid proxy URL");
            if let (Some(u), Some(pw)) = (&cfg.username, &cfg.password) {
                p = p.basic_auth(u, pw);
            }
            builder = builder.proxy(p);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    builder.build().expect("failed to build reqwest client")
}
