//! Document service: registration, lookup and removal of identity documents.

use backoffice_core::convert::{convert, convert_list};
use backoffice_core::{
    Clock, DocumentId, Page, PageRequest, ServiceError, ServiceResult, SystemClock,
};

use crate::document::{CreateDocumentRequest, Document, DocumentDto, DocumentLookup};
use crate::repository::{DocumentRepository, UnitOfWork};

#[derive(Debug)]
pub struct DocumentService<R, C = SystemClock> {
    repository: R,
    clock: C,
}

impl<R> DocumentService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            clock: SystemClock,
        }
    }
}

impl<R, C> DocumentService<R, C> {
    pub fn with_clock(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }
}

impl<R, C> DocumentService<R, C>
where
    R: DocumentRepository + UnitOfWork,
    C: Clock,
{
    /// Register a document. The (type, number) pair must not be taken.
    pub fn create(&self, request: CreateDocumentRequest) -> ServiceResult<DocumentDto> {
        self.repository
            .atomically(|| {
                let mut record: Document = convert(request)?;
                if self.already_saved(&record.key())? {
                    tracing::warn!(
                        document_type = %record.document_type,
                        "document rejected: already saved"
                    );
                    return Err(ServiceError::duplicate("document already saved"));
                }

                let now = self.clock.now();
                record.id = DocumentId::new();
                record.created_at = now;
                record.updated_at = now;

                let saved = self.repository.save(record)?;
                tracing::info!(document_id = %saved.id, document_type = %saved.document_type, "document created");
                Ok(convert(saved)?)
            })
            .map_err(|e| e.or_wrap(ServiceError::Document, "failed to save document"))
    }

    pub fn list_all(&self) -> ServiceResult<Vec<DocumentDto>> {
        let documents = self.repository.find_all()?;
        Ok(convert_list(documents)?)
    }

    pub fn list_page(&self, page: u32, page_size: u32) -> ServiceResult<Page<DocumentDto>> {
        let request = PageRequest::new(page, page_size)?;
        let page = self.repository.find_all_paged(request)?;
        Ok(page.try_map(convert::<Document, DocumentDto>)?)
    }

    pub fn find_by_id(&self, id: DocumentId) -> ServiceResult<DocumentDto> {
        let document = self
            .repository
            .find_by_id(id)?
            .ok_or_else(|| document_not_found(id))?;
        Ok(convert(document)?)
    }

    pub fn find_by_type_and_number(&self, lookup: &DocumentLookup) -> ServiceResult<DocumentDto> {
        let document = self
            .repository
            .find_by_type_and_number(lookup.document_type, &lookup.number)?
            .ok_or_else(|| ServiceError::not_found(format!("document not found: {lookup}")))?;
        Ok(convert(document)?)
    }

    /// Remove a document (and its customer links) after confirming it exists.
    pub fn delete(&self, id: DocumentId) -> ServiceResult<()> {
        self.repository
            .atomically(|| {
                if self.repository.find_by_id(id)?.is_none() {
                    return Err(document_not_found(id));
                }
                self.repository.delete_by_id(id)?;
                tracing::info!(document_id = %id, "document deleted");
                Ok(())
            })
            .map_err(|e| e.or_wrap(ServiceError::Document, "failed to delete document"))
    }

    fn already_saved(&self, key: &DocumentLookup) -> ServiceResult<bool> {
        Ok(self
            .repository
            .find_by_type_and_number(key.document_type, &key.number)?
            .is_some())
    }
}

fn document_not_found(id: DocumentId) -> ServiceError {
    ServiceError::not_found(format!("document not found with id: {id}"))
}
