//! Walks one session through its whole life, with logging switched on.
//!
//! ```text
//! RUST_LOG=debug SESSION_DURATION=2 cargo run -p login-flow
//! ```
//!
//! The demo reads its lifetime from the environment like a real server
//! would, then waits past it on the real clock.

use std::time::Duration;

use tollgate::prelude::*;
use tracing_subscriber::EnvFilter;

/// Lifetime used when `SESSION_DURATION` isn't set, so the demo actually
/// shows an expiry.
const DEMO_DURATION_SECS: i64 = 2;

#[tokio::main]
async fn main() -> Result<(), TollgateError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = SessionConfig::from_env();
    if config.ttl().is_none() {
        config.session_duration_secs = DEMO_DURATION_SECS;
    }
    let ttl = config.ttl().unwrap_or_default();

    // serde_json here only to show the effective config in one line.
    let rendered = serde_json::to_string(&config)
        .unwrap_or_else(|e| format!("<unprintable: {e}>"));
    tracing::info!(config = %rendered, "starting login flow demo");

    let gate = Gate::builder().config(config).build();

    // 1. Credentials were checked elsewhere; start a session.
    let sid = gate.login(&UserId::new("alice")).await?;
    tracing::info!("issued a session token");

    // 2. The token works while it's fresh.
    let user = gate.authenticate(sid.as_str()).await?;
    tracing::info!(%user, "token accepted");

    // 3. No token at all is simply "nobody".
    let anonymous = gate.current_user(None).await;
    tracing::info!(?anonymous, "request without a token");

    // 4. Wait out the lifetime.
    tokio::time::sleep(ttl + Duration::from_millis(500)).await;
    match gate.authenticate(sid.as_str()).await {
        Ok(user) => tracing::warn!(%user, "token still accepted after expiry"),
        Err(e) => tracing::info!(error = %e, "token rejected after expiry"),
    }

    // 5. A fresh login works again, and logout ends it immediately.
    let sid = gate.login(&UserId::new("alice")).await?;
    gate.logout(sid.as_str()).await;
    let after_logout = gate.current_user(Some(sid.as_str())).await;
    tracing::info!(?after_logout, "after logout");

    Ok(())
}
