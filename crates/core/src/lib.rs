//! `backoffice-core`: foundation building blocks for the back-office registry.
//!
//! This crate contains **pure** primitives (no storage, no HTTP): identifiers,
//! the service error taxonomy, pagination shapes, shape conversion and
//! document-number validation.

pub mod clock;
pub mod convert;
pub mod entity;
pub mod error;
pub mod id;
pub mod page;
pub mod validation;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use convert::{ConversionError, MapFrom};
pub use entity::{Entity, Timestamped};
pub use error::{ServiceError, ServiceResult, StoreError, StoreResult};
pub use id::{CustomerId, DocumentId};
pub use page::{Page, PageRequest};
pub use validation::validate_document_number;
pub use value_object::ValueObject;
