//! Persistence contracts consumed by the services.
//!
//! Implementations own storage mechanics and their own constraint enforcement
//! (`customers_national_id_key`, `documents_type_number_key`, link-table foreign
//! keys). Services never assume a check they made still holds at write time.

use std::sync::Arc;

use backoffice_core::{
    CustomerId, DocumentId, Page, PageRequest, ServiceResult, StoreResult,
};

use crate::customer::Customer;
use crate::document::{Document, DocumentType};

/// Name of the unique constraint on customer national identifiers.
pub const CUSTOMERS_NATIONAL_ID_KEY: &str = "customers_national_id_key";

/// Name of the unique constraint on (document type, number).
pub const DOCUMENTS_TYPE_NUMBER_KEY: &str = "documents_type_number_key";

/// Name of the foreign keys on the customer/document link table.
pub const CUSTOMER_DOCUMENTS_FKEY: &str = "customer_documents_fkey";

/// Customer persistence.
pub trait CustomerRepository: Send + Sync {
    /// Insert or replace by id; returns the stored record.
    fn save(&self, customer: Customer) -> StoreResult<Customer>;
    fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>>;
    fn find_all(&self) -> StoreResult<Vec<Customer>>;
    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Customer>>;
    fn exists_by_id(&self, id: CustomerId) -> StoreResult<bool>;
    fn delete_by_id(&self, id: CustomerId) -> StoreResult<()>;
    fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Vec<Customer>>;
    fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Customer>>;
    fn count_by_national_id(&self, national_id: &str) -> StoreResult<u64>;
}

/// Document persistence.
pub trait DocumentRepository: Send + Sync {
    fn save(&self, document: Document) -> StoreResult<Document>;
    fn find_by_id(&self, id: DocumentId) -> StoreResult<Option<Document>>;
    fn find_all(&self) -> StoreResult<Vec<Document>>;
    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Document>>;
    fn exists_by_id(&self, id: DocumentId) -> StoreResult<bool>;
    fn delete_by_id(&self, id: DocumentId) -> StoreResult<()>;
    fn find_by_type_and_number(
        &self,
        document_type: DocumentType,
        number: &str,
    ) -> StoreResult<Option<Document>>;
}

/// Atomic unit of work.
///
/// Every write performed inside `work` is kept only if `work` returns `Ok`;
/// on `Err` the store rolls back to its state before the call.
pub trait UnitOfWork: Send + Sync {
    fn atomically<T>(&self, work: impl FnOnce() -> ServiceResult<T>) -> ServiceResult<T>;
}

impl<S> CustomerRepository for Arc<S>
where
    S: CustomerRepository + ?Sized,
{
    fn save(&self, customer: Customer) -> StoreResult<Customer> {
        (**self).save(customer)
    }

    fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        (**self).find_all()
    }

    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Customer>> {
        (**self).find_all_paged(request)
    }

    fn exists_by_id(&self, id: CustomerId) -> StoreResult<bool> {
        (**self).exists_by_id(id)
    }

    fn delete_by_id(&self, id: CustomerId) -> StoreResult<()> {
        (**self).delete_by_id(id)
    }

    fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Vec<Customer>> {
        (**self).find_by_first_name_and_last_name(first_name, last_name)
    }

    fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Customer>> {
        (**self).find_by_national_id(national_id)
    }

    fn count_by_national_id(&self, national_id: &str) -> StoreResult<u64> {
        (**self).count_by_national_id(national_id)
    }
}

impl<S> DocumentRepository for Arc<S>
where
    S: DocumentRepository + ?Sized,
{
    fn save(&self, document: Document) -> StoreResult<Document> {
        (**self).save(document)
    }

    fn find_by_id(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> StoreResult<Vec<Document>> {
        (**self).find_all()
    }

    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Document>> {
        (**self).find_all_paged(request)
    }

    fn exists_by_id(&self, id: DocumentId) -> StoreResult<bool> {
        (**self).exists_by_id(id)
    }

    fn delete_by_id(&self, id: DocumentId) -> StoreResult<()> {
        (**self).delete_by_id(id)
    }

    fn find_by_type_and_number(
        &self,
        document_type: DocumentType,
        number: &str,
    ) -> StoreResult<Option<Document>> {
        (**self).find_by_type_and_number(document_type, number)
    }
}

impl<S> UnitOfWork for Arc<S>
where
    S: UnitOfWork,
{
    fn atomically<T>(&self, work: impl FnOnce() -> ServiceResult<T>) -> ServiceResult<T> {
        (**self).atomically(work)
    }
}
