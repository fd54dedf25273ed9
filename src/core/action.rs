//! Actions that modules can return to communicate with the app

use crate::domain::vehicle::VehicleId;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Show notification in status line
    Notify(String, NotifyLevel),

    /// Hand a request to the API worker
    Request(Request),

    /// Request quit
    Quit,
}

/// Outgoing API work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    LoadVehicles,
    DeleteVehicle(VehicleId),
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Warn,
    Error,
}
