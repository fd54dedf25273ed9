//! Vehicle REST API client

mod client;
mod error;

pub use client::{parse_base_url, ApiConfig, HttpVehicleApi, VehicleApi};
pub use error::ApiError;
