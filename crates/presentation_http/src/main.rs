//! Order fulfillment server
//!
//! Runs one of the three services: `fulfillment-server [gateway|inventory|order]`.
//! Without an argument the role is taken from configuration.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use anyhow::Context;
use application::{
    ChaosController, GatewayService, InventoryService, NoopTracer, OrderService, TracerPort,
};
use axum::Router;
use infrastructure::{
    AppConfig, CorrelatedClientConfig, CorrelatedHttpClient, Environment, HttpInventoryClient,
    HttpOrderClient, PrometheusMetrics, ServiceRole, SqliteInventoryStore, SqliteOrderStore,
    TelemetryConfig, TracingTracer, create_pool, init_telemetry, install_prometheus_recorder,
};
use presentation_http::{
    GatewayState, InventoryState, OrderState, ServiceInfo, create_gateway_router,
    create_inventory_router, create_order_router, set_expose_internal_errors, with_middleware,
};
use tokio::{net::TcpListener, signal, sync::watch};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(role) = std::env::args().nth(1) {
        config.role = role.parse().map_err(anyhow::Error::msg)?;
    }
    let role = config.role;

    let telemetry = TelemetryConfig::from_app_config(
        &config.telemetry,
        role.service_name(),
        config.server.json_logs(),
    );
    let telemetry_guard = init_telemetry(&telemetry)?;

    info!(
        role = %role,
        environment = %config.environment(),
        version = env!("CARGO_PKG_VERSION"),
        "Starting {}",
        role.service_name()
    );

    set_expose_internal_errors(config.environment() == Environment::Development);

    let tracer: Arc<dyn TracerPort> = if telemetry_guard.is_exporting() {
        Arc::new(TracingTracer)
    } else {
        Arc::new(NoopTracer)
    };

    let info = match install_prometheus_recorder() {
        Ok(handle) => ServiceInfo::new(role.service_name()).with_prometheus(handle),
        Err(e) => {
            warn!(error = %e, "Metrics endpoint will be empty");
            ServiceInfo::new(role.service_name())
        },
    };

    if role.uses_database() {
        info!(path = %config.database.path, "Using SQLite database");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let router = match role {
        ServiceRole::Inventory => {
            inventory_router(&config, info, tracer, shutdown_rx.clone()).await?
        },
        ServiceRole::Order => order_router(&config, info, tracer)?,
        ServiceRole::Gateway => gateway_router(&config, info, tracer)?,
    };
    let app = with_middleware(router, &config.server);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(address = %addr, "Server listening");

    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_requested(shutdown_rx.clone()))
        .into_future();

    tokio::select! {
        result = server => result?,
        () = async {
            shutdown_requested(shutdown_rx).await;
            info!("Waiting up to {:?} for connections to close...", shutdown_timeout);
            tokio::time::sleep(shutdown_timeout).await;
        } => warn!("Shutdown timeout elapsed, dropping open connections"),
    }

    info!("Server shutdown complete");
    drop(telemetry_guard);
    Ok(())
}

async fn inventory_router(
    config: &AppConfig,
    info: ServiceInfo,
    tracer: Arc<dyn TracerPort>,
    shutdown: watch::Receiver<bool>,
) -> anyhow::Result<Router> {
    let chaos = ChaosController::new(
        config
            .chaos
            .to_chaos_config()
            .context("Invalid chaos configuration")?,
    );

    let pool = Arc::new(create_pool(&config.database)?);
    let store = SqliteInventoryStore::new(pool);
    let items = config
        .inventory
        .to_items()
        .context("Invalid inventory seed data")?;
    let seeded = store.upsert_all(items).await?;
    info!(seeded, "Inventory seeded");

    let inventory =
        InventoryService::new(Arc::new(store), Arc::new(chaos), tracer).with_shutdown(shutdown);

    Ok(create_inventory_router(InventoryState {
        info,
        inventory: Arc::new(inventory),
    }))
}

fn order_router(
    config: &AppConfig,
    info: ServiceInfo,
    tracer: Arc<dyn TracerPort>,
) -> anyhow::Result<Router> {
    let pool = Arc::new(create_pool(&config.database)?);

    let orders = OrderService::new(
        Arc::new(SqliteOrderStore::new(pool)),
        Arc::new(PrometheusMetrics),
        tracer,
    );

    Ok(create_order_router(OrderState {
        info,
        orders: Arc::new(orders),
    }))
}

fn gateway_router(
    config: &AppConfig,
    info: ServiceInfo,
    tracer: Arc<dyn TracerPort>,
) -> anyhow::Result<Router> {
    let services = &config.services;
    let client = CorrelatedHttpClient::with_config(&CorrelatedClientConfig::from_services(services))
        .context("Failed to build HTTP client")?;

    let inventory = HttpInventoryClient::new(client.clone(), &services.inventory_url)?;
    let orders = HttpOrderClient::new(client, &services.order_url)?;
    info!(
        inventory_url = %services.inventory_url,
        order_url = %services.order_url,
        "Downstream services configured"
    );

    let gateway = GatewayService::new(Arc::new(inventory), Arc::new(orders), tracer);

    Ok(create_gateway_router(GatewayState {
        info,
        gateway: Arc::new(gateway),
    }))
}

async fn shutdown_requested(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
