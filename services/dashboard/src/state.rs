use std::sync::Arc;

use rowtable::{LoadedDataset, RowTable};

pub type SharedState = Arc<AppState>;

/// Read-only after startup; handlers never take a lock.
pub struct AppState {
    pub dataset: LoadedDataset,
    pub loaded_at: u64,
}

impl AppState {
    pub fn new(dataset: LoadedDataset) -> Self {
        Self {
            dataset,
            loaded_at: now(),
        }
    }

    pub fn table(&self) -> &RowTable {
        &self.dataset.table
    }
}

fn now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
