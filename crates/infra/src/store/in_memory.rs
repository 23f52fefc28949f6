use std::collections::BTreeSet;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use backoffice_core::{
    CustomerId, DocumentId, Entity, Page, PageRequest, ServiceResult, StoreError, StoreResult,
};
use backoffice_parties::repository::{
    CUSTOMER_DOCUMENTS_FKEY, CUSTOMERS_NATIONAL_ID_KEY, DOCUMENTS_TYPE_NUMBER_KEY,
};
use backoffice_parties::{
    Customer, CustomerRepository, Document, DocumentRepository, DocumentType, UnitOfWork,
};

/// Link-table row: (customer, document).
type Link = (CustomerId, DocumentId);

#[derive(Debug, Clone, Default)]
struct Tables {
    /// Rows in insertion order; association sets are left empty here.
    customers: Vec<Customer>,
    documents: Vec<Document>,
    links: BTreeSet<Link>,
}

impl Tables {
    fn customer_with_links(&self, row: &Customer) -> Customer {
        let mut customer = row.clone();
        customer.document_ids = self
            .links
            .iter()
            .filter(|(c, _)| *c == row.id)
            .map(|(_, d)| *d)
            .collect();
        customer
    }

    fn document_with_links(&self, row: &Document) -> Document {
        let mut document = row.clone();
        document.customer_ids = self
            .links
            .iter()
            .filter(|(_, d)| *d == row.id)
            .map(|(c, _)| *c)
            .collect();
        document
    }

    fn customers(&self) -> Vec<Customer> {
        self.customers
            .iter()
            .map(|row| self.customer_with_links(row))
            .collect()
    }

    fn documents(&self) -> Vec<Document> {
        self.documents
            .iter()
            .map(|row| self.document_with_links(row))
            .collect()
    }
}

/// Replace the row with the same id, or append.
fn upsert<T: Entity>(rows: &mut Vec<T>, row: T) {
    let id = *row.id();
    match rows.iter_mut().find(|r| *r.id() == id) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

/// In-memory registry store implementing both repositories.
///
/// Intended for tests/dev. Enforces the same constraints a relational schema
/// would (`customers_national_id_key`, `documents_type_number_key`, link-table
/// foreign keys) and keeps the customer/document association symmetric.
///
/// Units of work are serialized behind a gate and roll back by restoring a
/// snapshot. They are not reentrant: calling `atomically` from inside `work`
/// deadlocks.
#[derive(Debug, Default)]
pub struct InMemoryRegistryStore {
    tables: RwLock<Tables>,
    gate: Mutex<()>,
}

impl InMemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::unavailable("registry tables lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::unavailable("registry tables lock poisoned"))
    }
}

impl CustomerRepository for InMemoryRegistryStore {
    fn save(&self, customer: Customer) -> StoreResult<Customer> {
        let mut tables = self.write()?;

        if tables
            .customers
            .iter()
            .any(|c| c.national_id == customer.national_id && c.id != customer.id)
        {
            return Err(StoreError::unique(CUSTOMERS_NATIONAL_ID_KEY));
        }
        if let Some(missing) = customer
            .document_ids
            .iter()
            .find(|d| !tables.documents.iter().any(|doc| doc.id == **d))
        {
            tracing::debug!(document_id = %missing, "customer references unknown document");
            return Err(StoreError::foreign_key(CUSTOMER_DOCUMENTS_FKEY));
        }

        let id = customer.id;
        tables.links.retain(|(c, _)| *c != id);
        for document_id in &customer.document_ids {
            tables.links.insert((id, *document_id));
        }

        let mut row = customer;
        row.document_ids.clear();
        upsert(&mut tables.customers, row);

        let stored = tables
            .customers
            .iter()
            .find(|c| c.id == id)
            .map(|row| tables.customer_with_links(row))
            .ok_or_else(|| StoreError::unavailable("customer row vanished after write"))?;
        Ok(stored)
    }

    fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let tables = self.read()?;
        Ok(tables
            .customers
            .iter()
            .find(|c| c.id == id)
            .map(|row| tables.customer_with_links(row)))
    }

    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.read()?.customers())
    }

    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Customer>> {
        Ok(request.slice(self.read()?.customers()))
    }

    fn exists_by_id(&self, id: CustomerId) -> StoreResult<bool> {
        Ok(self.read()?.customers.iter().any(|c| c.id == id))
    }

    fn delete_by_id(&self, id: CustomerId) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.customers.retain(|c| c.id != id);
        tables.links.retain(|(c, _)| *c != id);
        Ok(())
    }

    fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Vec<Customer>> {
        let tables = self.read()?;
        Ok(tables
            .customers
            .iter()
            .filter(|c| c.first_name == first_name && c.last_name == last_name)
            .map(|row| tables.customer_with_links(row))
            .collect())
    }

    fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Customer>> {
        let tables = self.read()?;
        Ok(tables
            .customers
            .iter()
            .find(|c| c.national_id == national_id)
            .map(|row| tables.customer_with_links(row)))
    }

    fn count_by_national_id(&self, national_id: &str) -> StoreResult<u64> {
        let tables = self.read()?;
        Ok(tables
            .customers
            .iter()
            .filter(|c| c.national_id == national_id)
            .count() as u64)
    }
}

impl DocumentRepository for InMemoryRegistryStore {
    fn save(&self, document: Document) -> StoreResult<Document> {
        let mut tables = self.write()?;

        if tables.documents.iter().any(|d| {
            d.document_type == document.document_type
                && d.number == document.number
                && d.id != document.id
        }) {
            return Err(StoreError::unique(DOCUMENTS_TYPE_NUMBER_KEY));
        }
        if document
            .customer_ids
            .iter()
            .any(|c| !tables.customers.iter().any(|row| row.id == *c))
        {
            return Err(StoreError::foreign_key(CUSTOMER_DOCUMENTS_FKEY));
        }

        let id = document.id;
        tables.links.retain(|(_, d)| *d != id);
        for customer_id in &document.customer_ids {
            tables.links.insert((*customer_id, id));
        }

        let mut row = document;
        row.customer_ids.clear();
        upsert(&mut tables.documents, row);

        let stored = tables
            .documents
            .iter()
            .find(|d| d.id == id)
            .map(|row| tables.document_with_links(row))
            .ok_or_else(|| StoreError::unavailable("document row vanished after write"))?;
        Ok(stored)
    }

    fn find_by_id(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        let tables = self.read()?;
        Ok(tables
            .documents
            .iter()
            .find(|d| d.id == id)
            .map(|row| tables.document_with_links(row)))
    }

    fn find_all(&self) -> StoreResult<Vec<Document>> {
        Ok(self.read()?.documents())
    }

    fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Document>> {
        Ok(request.slice(self.read()?.documents()))
    }

    fn exists_by_id(&self, id: DocumentId) -> StoreResult<bool> {
        Ok(self.read()?.documents.iter().any(|d| d.id == id))
    }

    fn delete_by_id(&self, id: DocumentId) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.documents.retain(|d| d.id != id);
        tables.links.retain(|(_, d)| *d != id);
        Ok(())
    }

    fn find_by_type_and_number(
        &self,
        document_type: DocumentType,
        number: &str,
    ) -> StoreResult<Option<Document>> {
        let tables = self.read()?;
        Ok(tables
            .documents
            .iter()
            .find(|d| d.document_type == document_type && d.number == number)
            .map(|row| tables.document_with_links(row)))
    }
}

impl UnitOfWork for InMemoryRegistryStore {
    fn atomically<T>(&self, work: impl FnOnce() -> ServiceResult<T>) -> ServiceResult<T> {
        let _gate = self
            .gate
            .lock()
            .map_err(|_| StoreError::unavailable("unit-of-work gate poisoned"))?;
        let snapshot = self.read()?.clone();

        let result = work();
        if let Err(err) = &result {
            tracing::debug!(error = %err, "rolling back unit of work");
            *self.write()? = snapshot;
        }
        result
    }
}
