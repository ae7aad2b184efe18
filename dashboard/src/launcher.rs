use crate::registry;
use faxboard::logger;
use faxboard::settings::{AppConfig, BackendKind, BackendSettings};
use faxboard::tower_http::cors::CorsLayer;
use faxboard::{info, AppError, MemoryStore, RecordStore, Registry, RequestState, RestStore};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;

pub fn build_store(settings: &BackendSettings, registry: &Registry) -> Result<Arc<dyn RecordStore>, AppError> {
    match settings.kind {
        BackendKind::Memory => {
            let mut store = MemoryStore::new().constrain_required(registry);
            if let Some(user) = settings.seed_user.as_deref() {
                store = store.with_user(user);
            }
            info!("Using in-memory backend");
            Ok(Arc::new(store))
        }
        BackendKind::Rest => {
            info!("Using REST backend at {}", settings.url);
            Ok(Arc::new(RestStore::new(settings)?))
        }
    }
}

async fn shutdown_on_signal(shutdown_tx: watch::Sender<bool>) -> Result<(), AppError> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
    }
    let _ = shutdown_tx.send(true);
    Ok(())
}

pub async fn launch(config_path: &str) -> Result<(), AppError> {
    let config = AppConfig::new(config_path)?;
    logger::set_level(config.log_level);
    let registry = registry()?;
    info!("Registered {} entities: {}", registry.len(), registry.iter().map(|s| s.route).collect::<Vec<_>>().join(", "));
    let store = build_store(&config.backend, &registry)?;
    let state = RequestState::new(store, registry);
    let cors = config.http.cors.then(CorsLayer::permissive);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let signals = tokio::spawn(shutdown_on_signal(shutdown_tx));
    let served = faxboard::serve(state, config.http.bind_address, cors, shutdown_rx).await;
    signals.abort();
    served
}
