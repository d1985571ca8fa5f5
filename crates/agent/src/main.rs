//! `spindown-agent` -- appliance sensor agent.
//!
//! Accepts vibration/stationary readings from a sensor bridge,
//! evaluates them on a fixed interval against the windowed
//! consistency check, and signals the status registry plus the owning
//! user when the appliance has finished its cycle.

use std::net::SocketAddr;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spindown_agent::config::AgentConfig;
use spindown_agent::monitor::{run_pruner, Monitor, PRUNE_PERIOD};
use spindown_agent::notify::SmsNotifier;
use spindown_agent::registry::RegistryClient;
use spindown_agent::{ingest, new_shared_log};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spindown_agent=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AgentConfig::from_env();

    // The service epoch gates evaluation: no PASS is permitted until
    // the process has been up for a full window.
    let service_epoch = Utc::now();

    tracing::info!(
        appliance = %config.appliance,
        api_server_url = %config.api_server_url,
        port = config.port,
        eval_interval_secs = config.eval_interval.as_secs(),
        "Starting spindown-agent",
    );

    let log = new_shared_log();

    let registry = RegistryClient::new(&config.api_server_url, config.appliance);
    let notifier = config
        .sms
        .clone()
        .map(|sms| SmsNotifier::new(sms, config.phone_numbers.clone(), config.notify_all_users));

    let monitor = Monitor::new(
        log.clone(),
        service_epoch,
        config.appliance,
        registry,
        notifier,
    );

    tokio::spawn(monitor.run(config.eval_interval));
    tokio::spawn(run_pruner(log.clone(), PRUNE_PERIOD));

    let app = ingest::build_ingest_router(log);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting ingest endpoint");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server error");
}
