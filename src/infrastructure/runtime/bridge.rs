//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The draw loop never blocks on the network: it sends commands down one
//! channel and drains events from the other once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::runtime::Runtime;

use crate::domain::vehicle::{Vehicle, VehicleId};
use crate::infrastructure::api::VehicleApi;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Load the current user's vehicles
    FetchVehicles,
    /// Delete one vehicle by id
    DeleteVehicle { id: VehicleId },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    VehiclesLoaded { vehicles: Vec<Vehicle> },
    FetchFailed { message: String },
    VehicleDeleted { id: VehicleId },
    DeleteFailed {
        id: VehicleId,
        detail: Option<String>,
        message: String,
    },
    /// Worker-level failure not tied to a request
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    pub fn new(api: Arc<dyn VehicleApi>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();
        let rt = Runtime::new().context("Failed to create Tokio runtime")?;

        thread::Builder::new()
            .name("garage-runtime".to_string())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(api, cmd_rx, evt_tx.clone()).await {
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })
            .context("Failed to spawn runtime thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
