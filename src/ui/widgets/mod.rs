//! Custom ratatui widgets

pub mod card;

pub use card::{VehicleCard, CARD_HEIGHT, CARD_MIN_WIDTH};
