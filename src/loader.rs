//! Loading person snapshots.
//!
//! The input is the JSON array the person API returns for its list
//! endpoint, saved to disk.

use crate::models::Person;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse a JSON array of person records.
pub fn parse_persons(content: &str) -> Result<Vec<Person>> {
    let persons: Vec<Person> =
        serde_json::from_str(content).context("Expected a JSON array of person records")?;

    for id in duplicate_ids(&persons) {
        warn!("Duplicate client id in snapshot: {}", id);
    }

    Ok(persons)
}

/// Read and parse a snapshot file.
pub fn load_persons(path: &Path) -> Result<Vec<Person>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let persons = parse_persons(&content)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))?;

    debug!("Loaded {} records from {}", persons.len(), path.display());
    Ok(persons)
}

/// Ids that appear more than once, in first-seen order.
pub fn duplicate_ids(persons: &[Person]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();

    for person in persons {
        let id = person.id.to_string();
        let count = counts.entry(id.clone()).or_default();
        *count += 1;
        if *count == 2 {
            order.push(id);
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FIXTURE: &str = include_str!("../fixtures/clients.json");

    #[test]
    fn test_parse_fixture() {
        let persons = parse_persons(FIXTURE).unwrap();
        assert_eq!(persons.len(), 5);
        assert_eq!(persons[0].full_name, "María García López");
        assert_eq!(persons[1].other_disease.as_deref(), Some("Hypertension"));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_persons(r#"{"id": 1}"#).is_err());
        assert!(parse_persons("not json").is_err());
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_persons("[]").unwrap().is_empty());
    }

    #[test]
    fn test_load_persons_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let persons = load_persons(file.path()).unwrap();
        assert_eq!(persons.len(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_persons(Path::new("/nonexistent/clients.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_duplicate_ids() {
        let json = r#"[
            {"id": 1, "fullName": "A", "age": 20, "gender": "MALE", "active": true},
            {"id": 2, "fullName": "B", "age": 20, "gender": "MALE", "active": true},
            {"id": 1, "fullName": "C", "age": 20, "gender": "MALE", "active": true},
            {"id": 1, "fullName": "D", "age": 20, "gender": "MALE", "active": true}
        ]"#;

        let persons = parse_persons(json).unwrap();
        assert_eq!(duplicate_ids(&persons), vec!["1".to_string()]);
    }

    #[test]
    fn test_null_fields_do_not_reject_the_snapshot() {
        let json = r#"[
            {"id": 1, "fullName": "Ana", "identification": null, "age": 30, "gender": "FEMALE", "active": true},
            {"id": null, "fullName": "Bruno", "identification": "B-2", "age": 41, "gender": "MALE", "active": false},
            {"id": 3, "fullName": "Carla", "identification": "C-3", "age": 52, "gender": "OTHER", "active": true}
        ]"#;

        let persons = parse_persons(json).unwrap();
        assert_eq!(persons.len(), 3);
        assert!(persons[0].identification.is_empty());
        assert_eq!(persons[1].id.sort_key(), 0.0);

        let sorted = crate::filter_and_sort(
            &persons,
            "",
            crate::StatusFilter::All,
            crate::SortDirection::Asc,
        );
        let names: Vec<&str> = sorted.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Ana", "Carla"]);

        let found = crate::filter_and_sort(
            &persons,
            "ana",
            crate::StatusFilter::All,
            crate::SortDirection::Desc,
        );
        assert_eq!(found.len(), 1);
    }
}
