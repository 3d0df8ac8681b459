//! Shared query parameter types for API handlers.

use clai_core::pagination::PageRequest;
use serde::Deserialize;

/// Page-number pagination parameters (`?page=&per_page=`).
///
/// Out-of-range values are clamped by [`PageRequest::new`] rather than
/// rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    /// Resolve against the configured default page size.
    pub fn resolve(&self, default_per_page: i64) -> PageRequest {
        PageRequest::new(self.page, self.per_page, default_per_page)
    }
}
