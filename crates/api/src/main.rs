//! Data-plane server entry point.
//!
//! Runs three long-lived activities: the HTTP read API, the sequential
//! event consumer, and a signal watcher that feeds a process-wide shutdown
//! channel cancelling both.

use nexus_api::config::Config;
use nexus_consumer::{Consumer, GROUP_ID, KafkaEventLog, TOPIC};
use nexus_projection::{RedisSignalStore, SignalStore};
use tokio::signal;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let config = Config::from_env();

    // 3. Connect to the projection store
    let store = RedisSignalStore::connect(&config.redis_addr)
        .await
        .expect("redis connection failed");
    store.health().await.expect("redis ping failed");
    tracing::info!(addr = %config.redis_addr, "connected to redis");

    // 4. Process-wide shutdown scope
    let (shutdown_tx, _) = broadcast::channel(1);

    // 5. Start the consumer
    let log = KafkaEventLog::connect(&config.kafka_brokers, TOPIC, GROUP_ID)
        .expect("kafka consumer creation failed");
    let consumer = Consumer::new(log, store.clone(), shutdown_tx.subscribe());
    let consumer_task = tokio::spawn(async move {
        tracing::info!("consumer started");
        consumer.run().await;
        tracing::info!("consumer stopped");
    });

    // 6. Serve the read API until shutdown
    let app = nexus_api::create_app(store, metrics_handle);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    tracing::info!(%addr, "http server listening");

    let mut server_shutdown = shutdown_tx.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(());
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = server_shutdown.recv().await;
        })
        .await
        .expect("server error");

    let _ = consumer_task.await;
    tracing::info!("shutdown complete");
}
