//! gaze-bridge entry point.
//!
//! Reads perception input as JSON lines on stdin and runs the bridge until
//! Ctrl-C.

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use gaze_bridge::bridge::Bridge;
use gaze_bridge::config::BridgeConfig;
use gaze_bridge::feed::run_feed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // TLS for wss:// endpoints. Fails only if a provider is already set.
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Load configuration
    let config = BridgeConfig::from_env()?;
    tracing::info!(
        url = config.socket_url.as_deref().unwrap_or("<none>"),
        targets = config.targets.len(),
        "starting gaze-bridge v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut bridge = Bridge::new(config);

    // Perception feed
    let inputs = bridge.inputs();
    let behavior = bridge.behavior();
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = run_feed(stdin, inputs, behavior).await {
            tracing::warn!(error = %e, "perception feed failed");
        }
    });

    bridge
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
