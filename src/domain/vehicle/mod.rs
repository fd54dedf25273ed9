//! Vehicle domain: records, the in-memory collection and card text

mod collection;
mod display;
mod record;

pub use collection::VehicleCollection;
pub use display::{created_label, field_label, plate_label};
pub use record::{Vehicle, VehicleDraft, VehicleId, VehicleRecord};
