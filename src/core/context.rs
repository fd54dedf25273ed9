//! Shared context passed to modules

/// Shared context available to all modules
#[derive(Debug, Default, Clone)]
pub struct Context {
    /// API base URL display string
    pub api_endpoint: String,

    /// Whether a token was found in the session store
    pub signed_in: bool,

    /// Wall clock in milliseconds since the epoch, refreshed every frame
    pub now_ms: u64,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}
