use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backoffice_core::{
    ConversionError, CustomerId, DocumentId, Entity, MapFrom, Timestamped, ValueObject,
};

/// Kind of identity/registration document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Individual taxpayer number.
    #[default]
    #[serde(rename = "CPF")]
    NationalTaxId,
    /// General registry (identity card) number.
    #[serde(rename = "RG")]
    NationalRegistryId,
    /// Driver license number.
    #[serde(rename = "CNH")]
    DriverLicense,
    /// Company taxpayer number.
    #[serde(rename = "CNPJ")]
    CompanyTaxId,
}

impl DocumentType {
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::NationalTaxId => "CPF",
            DocumentType::NationalRegistryId => "RG",
            DocumentType::DriverLicense => "CNH",
            DocumentType::CompanyTaxId => "CNPJ",
        }
    }
}

impl core::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Stored document record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub document_type: DocumentType,
    pub number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_ids: BTreeSet<CustomerId>,
}

impl Document {
    pub fn key(&self) -> DocumentLookup {
        DocumentLookup {
            document_type: self.document_type,
            number: self.number.clone(),
        }
    }
}

impl Entity for Document {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Timestamped for Document {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Document transfer object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    #[serde(default)]
    pub id: Option<DocumentId>,
    pub document_type: DocumentType,
    pub number: String,
    #[serde(default)]
    pub customer_ids: Vec<CustomerId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for registering a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub document_type: DocumentType,
    pub number: String,
}

/// Natural key of a document: (type, number). Unique across documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLookup {
    pub document_type: DocumentType,
    pub number: String,
}

impl ValueObject for DocumentLookup {}

impl core::fmt::Display for DocumentLookup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.document_type, self.number)
    }
}

impl MapFrom<Document> for DocumentDto {
    fn map_from(source: Document) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Some(source.id),
            document_type: source.document_type,
            number: source.number,
            customer_ids: source.customer_ids.into_iter().collect(),
            created_at: Some(source.created_at),
            updated_at: Some(source.updated_at),
        })
    }
}

impl MapFrom<DocumentDto> for Document {
    fn map_from(source: DocumentDto) -> Result<Self, ConversionError> {
        Ok(Self {
            id: source.id.unwrap_or_default(),
            document_type: source.document_type,
            number: source.number,
            created_at: source.created_at.unwrap_or_default(),
            updated_at: source.updated_at.unwrap_or_default(),
            customer_ids: source.customer_ids.into_iter().collect(),
        })
    }
}

impl MapFrom<CreateDocumentRequest> for Document {
    fn map_from(source: CreateDocumentRequest) -> Result<Self, ConversionError> {
        Ok(Self {
            document_type: source.document_type,
            number: source.number,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::convert::{convert, convert_list, deserialize, serialize};
    use chrono::TimeZone;

    fn tax_document() -> Document {
        let created = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 2, 11, 9, 0, 0).unwrap();
        Document {
            id: DocumentId::new(),
            document_type: DocumentType::NationalTaxId,
            number: "02886612901".to_string(),
            created_at: created,
            updated_at: updated,
            customer_ids: [CustomerId::new()].into_iter().collect(),
        }
    }

    #[test]
    fn record_to_dto_and_back_is_lossless() {
        let record = tax_document();
        let dto: DocumentDto = convert(record.clone()).unwrap();
        let back: Document = convert(dto).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn request_maps_to_unsaved_record() {
        let req = CreateDocumentRequest {
            document_type: DocumentType::DriverLicense,
            number: "12345678900".to_string(),
        };
        let record: Document = convert(req).unwrap();
        assert!(record.id.is_nil());
        assert_eq!(record.document_type, DocumentType::DriverLicense);
        assert!(record.customer_ids.is_empty());
    }

    #[test]
    fn document_type_uses_source_system_codes_on_the_wire() {
        let json = serialize(&DocumentType::CompanyTaxId).unwrap();
        assert_eq!(json, "\"CNPJ\"");
        let parsed: DocumentType = deserialize("\"RG\"").unwrap();
        assert_eq!(parsed, DocumentType::NationalRegistryId);
        assert!(deserialize::<DocumentType>("\"PASSPORT\"").is_err());
    }

    #[test]
    fn list_conversion_keeps_order() {
        let a = tax_document();
        let mut b = tax_document();
        b.number = "99999999999".to_string();
        let dtos: Vec<DocumentDto> = convert_list(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(dtos[0].id, Some(a.id));
        assert_eq!(dtos[1].number, b.number);
    }
}
