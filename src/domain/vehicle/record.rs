//! Vehicle record as served by the API, plus the draft produced by the add form

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix reserved for identifiers minted on the client
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Stable identifier of a vehicle record
///
/// The API serves document ids as strings; numeric ids are accepted and
/// kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Identifier in the client-only namespace
    pub fn local(stamp: u64) -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{stamp}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for VehicleId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// A vehicle entry; everything but the id is optional display data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub vehicle_brand: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub car_color: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Vehicle {
    /// Pair a submitted draft with an identifier
    pub fn from_draft(id: VehicleId, draft: VehicleDraft) -> Self {
        Self {
            id,
            plate_number: draft.plate_number,
            vehicle_brand: draft.vehicle_brand,
            vehicle_model: draft.vehicle_model,
            car_color: draft.car_color,
            user_id: None,
            created_at: None,
        }
    }
}

/// Vehicle-shaped payload yielded by the add form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleDraft {
    pub plate_number: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub car_color: Option<String>,
}

/// Whether the server is known to hold a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Received from the API
    Confirmed,
    /// Added on this client, not yet seen by the server
    Unconfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    pub vehicle: Vehicle,
    pub origin: Origin,
}

impl VehicleRecord {
    pub fn confirmed(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            origin: Origin::Confirmed,
        }
    }

    pub fn unconfirmed(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            origin: Origin::Unconfirmed,
        }
    }

    pub fn id(&self) -> &VehicleId {
        &self.vehicle.id
    }

    pub fn is_confirmed(&self) -> bool {
        self.origin == Origin::Confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_server_payload() {
        let body = r#"[
            {"id": "a1B2", "plate_number": "KL-01", "vehicle_brand": "Honda",
             "vehicle_model": "Civic", "car_color": "Red", "user_id": "u9",
             "created_at": "2024-03-01T10:15:00"},
            {"id": 5, "plate_number": null, "extra": true}
        ]"#;
        let vehicles: Vec<Vehicle> = serde_json::from_str(body).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].id, VehicleId::new("a1B2"));
        assert_eq!(vehicles[0].car_color.as_deref(), Some("Red"));
        assert_eq!(vehicles[1].id, VehicleId::from(5));
        assert_eq!(vehicles[1].plate_number, None);
        assert_eq!(vehicles[1].created_at, None);
    }

    #[test]
    fn test_local_namespace() {
        let id = VehicleId::local(1_700_000_000_000);
        assert_eq!(id.as_str(), "local-1700000000000");
        assert_ne!(id, VehicleId::from(1_700_000_000_000u64));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result = serde_json::from_str::<Vehicle>(r#"{"plate_number": "X"}"#);
        assert!(result.is_err());
    }
}
