//! Service wiring: one shared in-memory store behind both services.

use std::sync::Arc;

use backoffice_infra::InMemoryRegistryStore;
use backoffice_parties::{CustomerService, DocumentService};

use crate::config::ApiConfig;

pub type Store = Arc<InMemoryRegistryStore>;

#[derive(Debug)]
pub struct AppServices {
    pub customers: CustomerService<Store>,
    pub documents: DocumentService<Store>,
    pub config: ApiConfig,
}

impl AppServices {
    pub fn new(store: Store, config: ApiConfig) -> Self {
        Self {
            customers: CustomerService::new(store.clone()),
            documents: DocumentService::new(store),
            config,
        }
    }
}

pub fn build_services(config: ApiConfig) -> AppServices {
    tracing::info!(
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "using in-memory registry store"
    );
    AppServices::new(Arc::new(InMemoryRegistryStore::new()), config)
}
