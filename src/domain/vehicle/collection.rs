//! In-memory mirror of the user's vehicles
//!
//! Identifiers are unique at all times: duplicate server ids keep the first
//! occurrence, and local ids are bumped until free.

use std::collections::HashSet;

use super::record::{Vehicle, VehicleDraft, VehicleId, VehicleRecord};

#[derive(Debug, Default, Clone)]
pub struct VehicleCollection {
    records: Vec<VehicleRecord>,
}

impl VehicleCollection {
    /// Replace everything with a server payload
    ///
    /// Returns the ids that were dropped as duplicates.
    pub fn replace_all(&mut self, vehicles: Vec<Vehicle>) -> Vec<VehicleId> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        let mut dropped = Vec::new();
        self.records.clear();
        for vehicle in vehicles {
            if seen.insert(vehicle.id.clone()) {
                self.records.push(VehicleRecord::confirmed(vehicle));
            } else {
                dropped.push(vehicle.id);
            }
        }
        dropped
    }

    /// Append a client-side record built from a draft
    ///
    /// `stamp` is the wall-clock millisecond stamp the id is derived from.
    pub fn append_unconfirmed(&mut self, draft: VehicleDraft, stamp: u64) -> VehicleId {
        let mut stamp = stamp;
        let mut id = VehicleId::local(stamp);
        while self.contains(&id) {
            stamp = stamp.wrapping_add(1);
            id = VehicleId::local(stamp);
        }
        self.records
            .push(VehicleRecord::unconfirmed(Vehicle::from_draft(id.clone(), draft)));
        id
    }

    pub fn remove(&mut self, id: &VehicleId) -> Option<VehicleRecord> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &VehicleId) -> Option<&VehicleRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn position(&self, id: &VehicleId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    pub fn at(&self, index: usize) -> Option<&VehicleRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn unconfirmed_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_confirmed()).count()
    }
}
