//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::network::SubwayNetwork;

/// Shared application state.
///
/// The whole network sits behind one lock. Each handler holds it for the
/// full operation, so mutations of a line never interleave.
#[derive(Clone)]
pub struct AppState {
    pub network: Arc<RwLock<SubwayNetwork>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: SubwayNetwork) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
        }
    }
}
