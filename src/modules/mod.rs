//! UI Modules
//!
//! Each module implements the Module trait and handles its own:
//! - Key input processing
//! - Rendering
//!
//! Modules:
//! - vehicles: the signed-in user's vehicle cards with add/delete flows

pub mod vehicles;
