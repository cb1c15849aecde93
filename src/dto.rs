use crate::pipe::PipeError;
use serde::{Deserialize, Serialize};

/// Validation group a rule is scoped to.
///
/// Create routes validate the CREATE group, update routes the UPDATE group,
/// so a DTO can require fields on creation that stay optional on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationGroup {
    Create,
    Update,
}

/// Contract every CRUD data-transfer type implements.
///
/// `name()` is the display name interpolated into the generated API
/// documentation. `validate` is the group-scoped validation hook; the
/// default implementation accepts everything, so a plain serde struct can
/// be used without writing any rules.
pub trait CrudDto: Send + Sync + 'static {
    fn name() -> &'static str
    where
        Self: Sized;

    fn validate(&self, _group: ValidationGroup) -> Result<(), PipeError> {
        Ok(())
    }
}

/// Envelope for bulk creation: `POST /bulk` with `{ "bulk": [ ... ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bulk<T> {
    pub bulk: Vec<T>,
}

impl<T: CrudDto> Bulk<T> {
    /// CREATE-group validation: the array must be non-empty and every
    /// element must validate as a nested object.
    pub fn validate_create(&self) -> Result<(), PipeError> {
        if self.bulk.is_empty() {
            return Err(PipeError::Validation("bulk must not be empty".to_string()));
        }
        for item in &self.bulk {
            item.validate(ValidationGroup::Create)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    impl CrudDto for Sample {
        fn name() -> &'static str {
            "Sample"
        }

        fn validate(&self, group: ValidationGroup) -> Result<(), PipeError> {
            if group == ValidationGroup::Create && self.name.is_empty() {
                return Err(PipeError::Validation("name required".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn bulk_serializes_under_bulk_field() {
        let payload = Bulk {
            bulk: vec![Sample { name: "a".to_string() }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("bulk").is_some());
        assert!(json["bulk"].is_array());
    }

    #[test]
    fn empty_bulk_fails_create_validation() {
        let payload: Bulk<Sample> = Bulk { bulk: vec![] };
        assert!(payload.validate_create().is_err());
    }

    #[test]
    fn bulk_validates_each_element() {
        let payload = Bulk {
            bulk: vec![
                Sample { name: "ok".to_string() },
                Sample { name: String::new() },
            ],
        };
        assert!(payload.validate_create().is_err());
    }
}
