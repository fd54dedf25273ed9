//! Domain layer - vehicle models independent of transport and UI

pub mod vehicle;
