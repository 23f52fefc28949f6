//! Query-string shapes for the listing and search endpoints.

use serde::Deserialize;

use crate::config::ApiConfig;

/// `?page=&pageSize=`; both optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Resolve to `(page, page_size)` using the configured default and cap.
    pub fn resolve(&self, config: &ApiConfig) -> (u32, u32) {
        let size = self
            .page_size
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);
        (self.page.unwrap_or(0), size)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullNameParams {
    pub first_name: String,
    pub last_name: String,
}
