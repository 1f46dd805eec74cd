//! API server entry point.

use api::config::Config;
use catalog::{InMemoryCatalog, SourceListing};
use common::Money;
use snapshot_store::{FileSnapshotStore, InMemorySnapshotStore, SnapshotStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
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
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Seeds the catalog the way the sourcing job would.
async fn seed_catalog(catalog: &InMemoryCatalog) {
    let listings = [
        SourceListing {
            name: "Enamel Camp Mug".to_string(),
            source_price: Money::from_cents(480),
            image_url: "https://img.example/enamel-camp-mug.png".to_string(),
            source_url: "https://source.example/enamel-camp-mug".to_string(),
            description: None,
            rating: None,
        },
        SourceListing {
            name: "Linen Tote Bag".to_string(),
            source_price: Money::from_cents(640),
            image_url: "https://img.example/linen-tote.png".to_string(),
            source_url: "https://source.example/linen-tote".to_string(),
            description: Some("Everyday carry-all in washed linen".to_string()),
            rating: Some(4),
        },
        SourceListing {
            name: "Brass Desk Lamp".to_string(),
            source_price: Money::from_cents(2200),
            image_url: "https://img.example/brass-lamp.png".to_string(),
            source_url: "https://source.example/brass-lamp".to_string(),
            description: None,
            rating: None,
        },
    ];

    for listing in listings {
        catalog.upsert(listing).await;
    }
}

async fn serve<S: SnapshotStore + 'static>(store: S, config: &Config) {
    // Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Create application state and rehydrate the cart once, before serving
    let (state, _backend, catalog) = api::create_default_state(store, &config.cart_key);
    seed_catalog(&catalog).await;
    state.cart.load().await;

    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting storefront API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    match &config.storage_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using file-backed cart snapshots");
            serve(FileSnapshotStore::new(dir.clone()), &config).await;
        }
        None => {
            tracing::info!("using in-memory cart snapshots");
            serve(InMemorySnapshotStore::new(), &config).await;
        }
    }
}
