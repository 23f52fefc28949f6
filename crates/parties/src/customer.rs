use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use backoffice_core::{
    ConversionError, CustomerId, DocumentId, Entity, MapFrom, ServiceError, ServiceResult,
    Timestamped,
};

/// Stored customer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across customers; never changes after creation.
    pub national_id: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub document_ids: BTreeSet<DocumentId>,
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Timestamped for Customer {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Customer transfer object (what services return and accept).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    /// Empty on an edit means "keep the stored identifier".
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub document_ids: Vec<DocumentId>,
}

impl CustomerDto {
    /// Field-level checks shared by create and edit.
    pub fn validate(&self, today: NaiveDate) -> ServiceResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(ServiceError::validation("first name is required"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ServiceError::validation("last name is required"));
        }
        if let Some(birth_date) = self.birth_date {
            if birth_date > today {
                return Err(ServiceError::validation(
                    "birth date must be in the past or present",
                ));
            }
        }
        Ok(())
    }
}

/// Payload for registering a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    /// Existing documents to link to the new customer.
    #[serde(default)]
    pub document_ids: Vec<DocumentId>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl MapFrom<Customer> for CustomerDto {
    fn map_from(source: Customer) -> Result<Self, ConversionError> {
        Ok(Self {
            id: Some(source.id),
            first_name: source.first_name,
            last_name: source.last_name,
            national_id: source.national_id,
            address: source.address,
            phone: source.phone,
            birth_date: source.birth_date,
            created_at: Some(source.created_at),
            updated_at: Some(source.updated_at),
            document_ids: source.document_ids.into_iter().collect(),
        })
    }
}

impl MapFrom<CustomerDto> for Customer {
    fn map_from(source: CustomerDto) -> Result<Self, ConversionError> {
        Ok(Self {
            id: source.id.unwrap_or_default(),
            first_name: source.first_name,
            last_name: source.last_name,
            national_id: source.national_id,
            address: source.address,
            phone: source.phone,
            birth_date: source.birth_date,
            created_at: source.created_at.unwrap_or_default(),
            updated_at: source.updated_at.unwrap_or_default(),
            document_ids: source.document_ids.into_iter().collect(),
        })
    }
}

impl MapFrom<CreateCustomerRequest> for CustomerDto {
    fn map_from(source: CreateCustomerRequest) -> Result<Self, ConversionError> {
        Ok(Self {
            first_name: source.first_name,
            last_name: source.last_name,
            national_id: source.national_id,
            address: source.address,
            phone: source.phone,
            birth_date: source.birth_date,
            document_ids: source.document_ids,
            ..Default::default()
        })
    }
}
