//! Vec-backed store double for service unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use backoffice_core::{
    CustomerId, DocumentId, Page, PageRequest, ServiceResult, StoreError, StoreResult,
};

use crate::customer::Customer;
use crate::document::{Document, DocumentType};
use crate::repository::{CustomerRepository, DocumentRepository, UnitOfWork};

#[derive(Debug, Default)]
pub struct FakeStore {
    customers: Mutex<Vec<Customer>>,
    documents: Mutex<Vec<Document>>,
    national_id_queries: AtomicUsize,
    save_failure: Mutex<Option<StoreError>>,
}

impl FakeStore {
    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap().clone()
    }

    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    pub fn national_id_queries(&self) -> usize {
        self.national_id_queries.load(Ordering::SeqCst)
    }

    /// Make every subsequent `save` fail with `err`.
    pub fn fail_saves_with(&self, err: StoreError) {
        *self.save_failure.lock().unwrap() = Some(err);
    }

    fn injected_failure(&self) -> StoreResult<()> {
        match self.save_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn upsert<T: Clone>(rows: &mut Vec<T>, row: T, same: impl Fn(&T) -> bool) {
    match rows.iter_mut().find(|r| same(r)) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

impl CustomerRepository for FakeStore {
    fn save(&self, customer: Customer) -> StoreResult<Customer> {
        self.injected_failure()?;
        let mut rows = self.customers.lock().unwrap();
        upsert(&mut *rows, customer.clone(), |c| c.id == customer.id);
        Ok(customer)
    }

    fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.customers().into_iter().find(|c| c.id == id))
    }

    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.customers())
    }

    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Customer>> {
        Ok(request.slice(self.customers()))
    }

    fn exists_by_id(&self, id: CustomerId) -> StoreResult<bool> {
        Ok(self.customers().iter().any(|c| c.id == id))
    }

    fn delete_by_id(&self, id: CustomerId) -> StoreResult<()> {
        self.customers.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Vec<Customer>> {
        Ok(self
            .customers()
            .into_iter()
            .filter(|c| c.first_name == first_name && c.last_name == last_name)
            .collect())
    }

    fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Customer>> {
        Ok(self
            .customers()
            .into_iter()
            .find(|c| c.national_id == national_id))
    }

    fn count_by_national_id(&self, national_id: &str) -> StoreResult<u64> {
        self.national_id_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .customers()
            .iter()
            .filter(|c| c.national_id == national_id)
            .count() as u64)
    }
}

impl DocumentRepository for FakeStore {
    fn save(&self, document: Document) -> StoreResult<Document> {
        self.injected_failure()?;
        let mut rows = self.documents.lock().unwrap();
        upsert(&mut *rows, document.clone(), |d| d.id == document.id);
        Ok(document)
    }

    fn find_by_id(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        Ok(self.documents().into_iter().find(|d| d.id == id))
    }

    fn find_all(&self) -> StoreResult<Vec<Document>> {
        Ok(self.documents())
    }

    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Document>> {
        Ok(request.slice(self.documents()))
    }

    fn exists_by_id(&self, id: DocumentId) -> StoreResult<bool> {
        Ok(self.documents().iter().any(|d| d.id == id))
    }

    fn delete_by_id(&self, id: DocumentId) -> StoreResult<()> {
        self.documents.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }

    fn find_by_type_and_number(
        &self,
        document_type: DocumentType,
        number: &str,
    ) -> StoreResult<Option<Document>> {
        Ok(self
            .documents()
            .into_iter()
            .find(|d| d.document_type == document_type && d.number == number))
    }
}

impl UnitOfWork for FakeStore {
    fn atomically<T>(&self, work: impl FnOnce() -> ServiceResult<T>) -> ServiceResult<T> {
        let customers = self.customers();
        let documents = self.documents();
        let result = work();
        if result.is_err() {
            *self.customers.lock().unwrap() = customers;
            *self.documents.lock().unwrap() = documents;
        }
        result
    }
}
