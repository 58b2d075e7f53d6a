pub mod health;
pub mod medications;
pub mod predict;
pub mod predictions;

use serde::Deserialize;

const DEFAULT_LIMIT: usize = 100;

/// `?limit=N` on list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

impl ListParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}
