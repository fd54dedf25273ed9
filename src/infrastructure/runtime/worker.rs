//! Async worker - runs in Tokio runtime and performs vehicle API calls

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info};

use crate::domain::vehicle::VehicleId;
use crate::infrastructure::api::{ApiError, VehicleApi};
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

const IDLE_WAIT: Duration = Duration::from_millis(25);

/// Run the async worker loop
///
/// Each request runs as its own task so a slow list call never holds up a
/// delete. Every request yields exactly one event.
pub async fn run_async_worker(
    api: Arc<dyn VehicleApi>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    loop {
        let next = cmd_rx.try_recv();
        match next {
            Ok(RuntimeCommand::Shutdown) => {
                debug!("runtime worker shutting down");
                return Ok(());
            }
            Ok(RuntimeCommand::FetchVehicles) => {
                let api = Arc::clone(&api);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    emit(&evt_tx, fetch_vehicles(api.as_ref()).await);
                });
            }
            Ok(RuntimeCommand::DeleteVehicle { id }) => {
                let api = Arc::clone(&api);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    emit(&evt_tx, delete_vehicle(api.as_ref(), id).await);
                });
            }
            Err(TryRecvError::Empty) => tokio::time::sleep(IDLE_WAIT).await,
            Err(TryRecvError::Disconnected) => return Ok(()),
        }
    }
}

async fn fetch_vehicles(api: &dyn VehicleApi) -> RuntimeEvent {
    match api.list_vehicles().await {
        Ok(vehicles) => {
            info!(count = vehicles.len(), "vehicles loaded");
            RuntimeEvent::VehiclesLoaded { vehicles }
        }
        Err(err) => {
            error!(error = %err, "vehicle fetch failed");
            RuntimeEvent::FetchFailed {
                message: err.to_string(),
            }
        }
    }
}

async fn delete_vehicle(api: &dyn VehicleApi, id: VehicleId) -> RuntimeEvent {
    match api.delete_vehicle(&id).await {
        Ok(()) => {
            info!(vehicle = %id, "vehicle deleted");
            RuntimeEvent::VehicleDeleted { id }
        }
        Err(err) => delete_failed(id, err),
    }
}

fn delete_failed(id: VehicleId, err: ApiError) -> RuntimeEvent {
    error!(vehicle = %id, error = %err, "vehicle delete failed");
    RuntimeEvent::DeleteFailed {
        detail: err.detail().map(str::to_string),
        message: err.to_string(),
        id,
    }
}

/// The UI may already be gone during shutdown
fn emit(evt_tx: &Sender<RuntimeEvent>, event: RuntimeEvent) {
    if let Err(err) = evt_tx.send(event) {
        debug!(event = ?err.0, "event dropped, UI receiver closed");
    }
}
