//! Customer service: registration, lookup, edit and removal of customers.
//!
//! Uniqueness of the national identifier is checked here before insert, inside
//! the same unit of work as the write. The store's own unique constraint stays
//! the authoritative backstop; its violation surfaces as
//! `ServiceError::Store(StoreError::UniqueViolation { .. })` and is passed
//! through untouched.

use backoffice_core::clock::next_update_at;
use backoffice_core::convert::{convert, convert_list};
use backoffice_core::{
    Clock, CustomerId, Page, PageRequest, ServiceError, ServiceResult, SystemClock,
    validate_document_number,
};

use crate::customer::{Customer, CustomerDto};
use crate::repository::{CustomerRepository, UnitOfWork};

#[derive(Debug)]
pub struct CustomerService<R, C = SystemClock> {
    repository: R,
    clock: C,
}

impl<R> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            clock: SystemClock,
        }
    }
}

impl<R, C> CustomerService<R, C> {
    pub fn with_clock(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }
}

impl<R, C> CustomerService<R, C>
where
    R: CustomerRepository + UnitOfWork,
    C: Clock,
{
    /// Every customer, in store order.
    pub fn list_all(&self) -> ServiceResult<Vec<CustomerDto>> {
        let customers = self.repository.find_all()?;
        Ok(convert_list(customers)?)
    }

    /// One zero-based page of customers.
    pub fn list_page(&self, page: u32, page_size: u32) -> ServiceResult<Page<CustomerDto>> {
        let request = PageRequest::new(page, page_size)?;
        let page = self.repository.find_all_paged(request)?;
        Ok(page.try_map(convert::<Customer, CustomerDto>)?)
    }

    /// Exact match on first and last name. No match is an empty list.
    pub fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ServiceResult<Vec<CustomerDto>> {
        let customers = self
            .repository
            .find_by_first_name_and_last_name(first_name, last_name)?;
        tracing::debug!(matches = customers.len(), "customer full-name search");
        Ok(convert_list(customers)?)
    }

    pub fn find_by_national_id(&self, national_id: &str) -> ServiceResult<CustomerDto> {
        let customer = self
            .repository
            .find_by_national_id(national_id)?
            .ok_or_else(|| {
                ServiceError::not_found(format!(
                    "customer not found with national identifier: {national_id}"
                ))
            })?;
        Ok(convert(customer)?)
    }

    pub fn find_by_id(&self, id: CustomerId) -> ServiceResult<CustomerDto> {
        let customer = self
            .repository
            .find_by_id(id)?
            .ok_or_else(|| customer_not_found(id))?;
        Ok(convert(customer)?)
    }

    /// Register a new customer.
    ///
    /// Any id or timestamps on `candidate` are ignored; the service assigns them.
    pub fn create(&self, candidate: CustomerDto) -> ServiceResult<CustomerDto> {
        self.repository
            .atomically(|| {
                candidate.validate(self.clock.today())?;

                if self.exists_national_id(&candidate.national_id)? {
                    tracing::warn!("customer rejected: national identifier already registered");
                    return Err(ServiceError::duplicate(
                        "national identifier already registered",
                    ));
                }

                let now = self.clock.now();
                let mut record: Customer = convert(candidate)?;
                record.id = CustomerId::new();
                record.created_at = now;
                record.updated_at = now;

                let saved = self.repository.save(record)?;
                tracing::info!(customer_id = %saved.id, "customer created");
                Ok(convert(saved)?)
            })
            .map_err(|e| e.or_wrap(ServiceError::Customer, "failed to create customer"))
    }

    /// Overwrite the mutable fields of an existing customer.
    ///
    /// The national identifier and creation timestamp never change.
    pub fn edit(&self, candidate: CustomerDto) -> ServiceResult<CustomerDto> {
        let id = candidate
            .id
            .ok_or_else(|| ServiceError::not_found("customer id is required for edit"))?;

        self.repository
            .atomically(|| {
                let existing = self
                    .repository
                    .find_by_id(id)?
                    .ok_or_else(|| customer_not_found(id))?;

                candidate.validate(self.clock.today())?;
                if !candidate.national_id.is_empty()
                    && candidate.national_id != existing.national_id
                {
                    return Err(ServiceError::validation(
                        "national identifier cannot be changed",
                    ));
                }

                let updated = Customer {
                    id: existing.id,
                    first_name: candidate.first_name,
                    last_name: candidate.last_name,
                    national_id: existing.national_id.clone(),
                    address: candidate.address,
                    phone: candidate.phone,
                    birth_date: candidate.birth_date,
                    created_at: existing.created_at,
                    updated_at: next_update_at(&existing, self.clock.now()),
                    document_ids: candidate.document_ids.into_iter().collect(),
                };

                let saved = self.repository.save(updated)?;
                tracing::info!(customer_id = %saved.id, "customer updated");
                Ok(convert(saved)?)
            })
            .map_err(|e| e.or_wrap(ServiceError::Customer, "failed to update customer"))
    }

    /// Remove a customer and its document links.
    pub fn delete(&self, id: CustomerId) -> ServiceResult<()> {
        self.repository
            .atomically(|| {
                if !self.repository.exists_by_id(id)? {
                    return Err(customer_not_found(id));
                }
                self.repository.delete_by_id(id)?;
                tracing::info!(customer_id = %id, "customer deleted");
                Ok(())
            })
            .map_err(|e| e.or_wrap(ServiceError::Customer, "failed to delete customer"))
    }

    /// Whether a customer with this national identifier exists.
    ///
    /// Malformed identifiers fail with `Validation` before the store is queried.
    pub fn exists_national_id(&self, national_id: &str) -> ServiceResult<bool> {
        validate_document_number(Some(national_id))?;
        Ok(self.repository.count_by_national_id(national_id)? > 0)
    }
}

fn customer_not_found(id: CustomerId) -> ServiceError {
    ServiceError::not_found(format!("customer not found with id: {id}"))
}
