//! Parties domain module: customers and their identity documents.
//!
//! Records, transfer shapes and the services that enforce the registry's
//! uniqueness and existence rules. Storage is reached only through the
//! contracts in [`repository`].

pub mod customer;
pub mod customer_service;
pub mod document;
pub mod document_service;
pub mod repository;

#[cfg(test)]
mod testing;

pub use customer::{CreateCustomerRequest, Customer, CustomerDto};
pub use customer_service::CustomerService;
pub use document::{CreateDocumentRequest, Document, DocumentDto, DocumentLookup, DocumentType};
pub use document_service::DocumentService;
pub use repository::{CustomerRepository, DocumentRepository, UnitOfWork};
