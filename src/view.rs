//! Client list view state.
//!
//! Holds the user-controlled query of the client list plus which row has
//! its action menu expanded. The caller owns the value and passes it around
//! explicitly.

use crate::analysis::filter_and_sort;
use crate::models::{Person, RecordId, SortDirection, StatusFilter};
use serde::{Deserialize, Serialize};

/// Query and interaction state of the client list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientListView {
    /// Free text matched against name or identification.
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub sort_direction: SortDirection,
    /// Row whose action menu is open.
    #[serde(skip)]
    pub open_actions_for: Option<RecordId>,
}

impl ClientListView {
    pub fn new(search_term: &str, status_filter: StatusFilter, sort_direction: SortDirection) -> Self {
        Self {
            search_term: search_term.to_string(),
            status_filter,
            sort_direction,
            open_actions_for: None,
        }
    }

    /// Records to display for the current query.
    pub fn visible(&self, persons: &[Person]) -> Vec<Person> {
        filter_and_sort(
            persons,
            &self.search_term,
            self.status_filter,
            self.sort_direction,
        )
    }

    /// Flip between newest-first and oldest-first.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggled();
    }

    /// Open the action menu of `id`, or close it if it is already open.
    pub fn toggle_actions_menu(&mut self, id: &RecordId) {
        if self.open_actions_for.as_ref() == Some(id) {
            self.open_actions_for = None;
        } else {
            self.open_actions_for = Some(id.clone());
        }
    }

    /// Any click outside a menu closes it.
    pub fn close_actions_menu(&mut self) {
        self.open_actions_for = None;
    }

    /// Pick a record for editing; closes the menu.
    pub fn select_for_edit<'a>(&mut self, persons: &'a [Person], id: &RecordId) -> Option<&'a Person> {
        self.close_actions_menu();
        persons.iter().find(|p| &p.id == id)
    }

    /// Pick a record for deletion; closes the menu.
    pub fn select_for_delete<'a>(
        &mut self,
        persons: &'a [Person],
        id: &RecordId,
    ) -> Option<&'a Person> {
        self.close_actions_menu();
        persons.iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn create_test_person(id: i64, name: &str, active: bool) -> Person {
        Person {
            id: RecordId::Integer(id),
            full_name: name.to_string(),
            identification: format!("{}-X", id),
            age: 30.0,
            gender: Gender::Male,
            active,
            drives: false,
            wears_glasses: false,
            diabetic: false,
            other_disease: None,
            additional_attributes: Vec::new(),
        }
    }

    #[test]
    fn test_default_view() {
        let view = ClientListView::default();
        assert!(view.search_term.is_empty());
        assert_eq!(view.status_filter, StatusFilter::All);
        assert_eq!(view.sort_direction, SortDirection::Desc);
        assert!(view.open_actions_for.is_none());
    }

    #[test]
    fn test_visible_follows_sort_toggle() {
        let persons = vec![
            create_test_person(1, "Jorge", true),
            create_test_person(2, "Laura", false),
            create_test_person(3, "Ana", true),
        ];
        let mut view = ClientListView::new("", StatusFilter::Active, SortDirection::Desc);

        let names: Vec<_> = view.visible(&persons).into_iter().map(|p| p.full_name).collect();
        assert_eq!(names, vec!["Ana", "Jorge"]);

        view.toggle_sort_direction();
        let names: Vec<_> = view.visible(&persons).into_iter().map(|p| p.full_name).collect();
        assert_eq!(names, vec!["Jorge", "Ana"]);
    }

    #[test]
    fn test_toggle_actions_menu() {
        let mut view = ClientListView::default();
        let first = RecordId::Integer(1);
        let second = RecordId::Integer(2);

        view.toggle_actions_menu(&first);
        assert_eq!(view.open_actions_for, Some(first.clone()));

        view.toggle_actions_menu(&second);
        assert_eq!(view.open_actions_for, Some(second.clone()));

        view.toggle_actions_menu(&second);
        assert!(view.open_actions_for.is_none());

        view.toggle_actions_menu(&first);
        view.close_actions_menu();
        assert!(view.open_actions_for.is_none());
    }

    #[test]
    fn test_select_closes_menu() {
        let persons = vec![create_test_person(7, "Laura", true)];
        let mut view = ClientListView::default();
        let id = RecordId::Integer(7);

        view.toggle_actions_menu(&id);
        let selected = view.select_for_edit(&persons, &id);
        assert_eq!(selected.map(|p| p.full_name.as_str()), Some("Laura"));
        assert!(view.open_actions_for.is_none());

        view.toggle_actions_menu(&id);
        assert!(view.select_for_delete(&persons, &RecordId::Integer(99)).is_none());
        assert!(view.open_actions_for.is_none());
    }
}
