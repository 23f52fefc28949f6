//! Shape conversion: record <-> transfer object <-> creation request, plus JSON.
//!
//! Each source/target pair gets an explicit [`MapFrom`] impl. Implementations copy
//! the fields both shapes share and leave every other target field at its zero
//! value (`Default`), so the mapping stays type-checked instead of reflective.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::ServiceError;

/// Mapping or (de)serialization failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConversionError(pub String);

impl ConversionError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<ConversionError> for ServiceError {
    fn from(value: ConversionError) -> Self {
        ServiceError::Conversion(value.0)
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(value: serde_json::Error) -> Self {
        Self(value.to_string())
    }
}

/// Build `Self` from a value of another shape.
pub trait MapFrom<S>: Sized {
    fn map_from(source: S) -> Result<Self, ConversionError>;
}

/// Convert `source` into the target shape `T`.
pub fn convert<S, T>(source: S) -> Result<T, ConversionError>
where
    T: MapFrom<S>,
{
    T::map_from(source)
}

/// Convert every element, preserving order. Either all succeed or none are returned.
pub fn convert_list<S, T, I>(sources: I) -> Result<Vec<T>, ConversionError>
where
    I: IntoIterator<Item = S>,
    T: MapFrom<S>,
{
    sources.into_iter().map(T::map_from).collect()
}

/// Serialize to indented JSON.
///
/// Fields are emitted in declaration order; dates and times use ISO-8601.
pub fn serialize<T>(value: &T) -> Result<String, ConversionError>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string_pretty(value)?)
}

/// Parse JSON text into the target shape.
pub fn deserialize<T>(text: &str) -> Result<T, ConversionError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Source {
        name: String,
        born: Option<NaiveDate>,
        seen_at: DateTime<Utc>,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Target {
        name: String,
        born: Option<NaiveDate>,
        visits: u32,
    }

    impl MapFrom<Source> for Target {
        fn map_from(source: Source) -> Result<Self, ConversionError> {
            if source.name.is_empty() {
                return Err(ConversionError::new("name is required"));
            }
            Ok(Self {
                name: source.name,
                born: source.born,
                ..Default::default()
            })
        }
    }

    fn source(name: &str) -> Source {
        Source {
            name: name.to_string(),
            born: NaiveDate::from_ymd_opt(1990, 1, 15),
            seen_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn convert_copies_shared_fields_and_zeroes_the_rest() {
        let target: Target = convert(source("Millie")).unwrap();
        assert_eq!(target.name, "Millie");
        assert_eq!(target.born, NaiveDate::from_ymd_opt(1990, 1, 15));
        assert_eq!(target.visits, 0);
    }

    #[test]
    fn convert_list_preserves_order() {
        let targets: Vec<Target> = convert_list(vec![source("a"), source("b"), source("c")]).unwrap();
        let names: Vec<_> = targets.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn convert_list_is_all_or_nothing() {
        let err = convert_list::<_, Target, _>(vec![source("a"), source(""), source("c")])
            .unwrap_err();
        assert_eq!(err, ConversionError::new("name is required"));
    }

    #[test]
    fn serialize_uses_iso_dates_and_declaration_order() {
        let json = serialize(&source("Millie")).unwrap();
        assert!(json.contains("\"born\": \"1990-01-15\""));
        assert!(json.contains("\"seen_at\": \"2024-03-01T12:30:00Z\""));
        let name_at = json.find("\"name\"").unwrap();
        let born_at = json.find("\"born\"").unwrap();
        assert!(name_at < born_at);
        assert!(json.contains('\n'));
    }

    #[test]
    fn deserialize_round_trips() {
        let original = source("Millie");
        let back: Source = deserialize(&serialize(&original).unwrap()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn deserialize_failure_becomes_conversion_error() {
        let err = deserialize::<Source>("{\"name\": 42}").unwrap_err();
        let service: ServiceError = err.into();
        assert!(matches!(service, ServiceError::Conversion(_)));
    }
}
