//! Data-quality check of a loaded snapshot against the client form rules.

use super::forms::{validate_person, PersonForm};
use super::FieldError;
use crate::models::Person;
use serde::Serialize;
use tracing::debug;

/// A record that would be rejected by the client form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidRecord {
    pub id: String,
    pub full_name: String,
    pub errors: Vec<FieldError>,
}

/// Run the client form rules over every record.
pub fn check_records(persons: &[Person]) -> Vec<InvalidRecord> {
    let invalid: Vec<InvalidRecord> = persons
        .iter()
        .filter_map(|person| {
            validate_person(&PersonForm::from(person))
                .err()
                .map(|errors| InvalidRecord {
                    id: person.id.to_string(),
                    full_name: person.full_name.clone(),
                    errors: errors.errors,
                })
        })
        .collect();

    debug!(
        "Checked {} records, {} invalid",
        persons.len(),
        invalid.len()
    );

    invalid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, RecordId};
    use crate::validation::ValidationErrorKind;

    fn create_test_person(id: i64, age: f64) -> Person {
        Person {
            id: RecordId::Integer(id),
            full_name: format!("Client {}", id),
            identification: format!("{:08}-Z", id),
            age,
            gender: Gender::Male,
            active: true,
            drives: false,
            wears_glasses: false,
            diabetic: false,
            other_disease: None,
            additional_attributes: Vec::new(),
        }
    }

    #[test]
    fn test_check_records() {
        let mut nameless = create_test_person(3, 40.0);
        nameless.full_name = String::new();

        let persons = vec![
            create_test_person(1, 30.0),
            create_test_person(2, f64::NAN),
            nameless,
            create_test_person(4, 130.0),
        ];

        let invalid = check_records(&persons);
        let ids: Vec<_> = invalid.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);

        assert_eq!(invalid[0].errors[0].field, "age");
        assert_eq!(invalid[0].errors[0].kind, ValidationErrorKind::Required);
        assert_eq!(invalid[2].errors[0].kind, ValidationErrorKind::Max { max: 120 });
    }

    #[test]
    fn test_clean_snapshot() {
        let persons = vec![create_test_person(1, 18.0), create_test_person(2, 99.0)];
        assert!(check_records(&persons).is_empty());
    }
}
