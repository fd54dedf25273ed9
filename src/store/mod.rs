//! Local persistence (SQLite)

mod session;

pub use session::SessionStore;
