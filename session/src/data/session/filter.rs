//! Filter compilation
//!
//! Turns caller field/value pairs into AND-combined predicates. Anything
//! that cannot be compiled safely is dropped and reported to the observer;
//! building never fails because of filter input.

use serde::{Deserialize, Serialize};

use super::guard::{FieldGuard, is_path_segment};
use super::join::JoinStrategy;
use super::observer::{DropReason, FieldObserver};
use super::plan::Predicate;

/// Column holding the tenant scope
pub const OWNER_COLUMN: &str = "owner";

/// One raw `{field, value}` pair from a caller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterCriterion {
    pub field: String,
    pub value: String,
}

impl FilterCriterion {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub(crate) struct FilterCompiler<'a> {
    guard: &'a FieldGuard,
    observer: &'a dyn FieldObserver,
    strategy: JoinStrategy,
}

impl<'a> FilterCompiler<'a> {
    pub(crate) fn new(
        guard: &'a FieldGuard,
        observer: &'a dyn FieldObserver,
        strategy: JoinStrategy,
    ) -> Self {
        Self {
            guard,
            observer,
            strategy,
        }
    }

    /// `owner = ?`, omitted for an empty owner
    pub(crate) fn owner(&self, owner: &str) -> Option<Predicate> {
        if owner.is_empty() {
            return None;
        }
        Some(Predicate::Equals {
            column: self.strategy.qualify(OWNER_COLUMN),
            value: owner.to_string(),
        })
    }

    /// Single field/value mode: both must be non-empty
    pub(crate) fn field_value(&self, field: &str, value: &str) -> Option<Predicate> {
        match (field.is_empty(), value.is_empty()) {
            (true, true) => None,
            (false, false) => self.contains(field, value),
            _ => {
                self.observer.field_dropped(field, DropReason::Empty);
                None
            }
        }
    }

    /// Criteria-list mode. Empty values still compile to a match-all
    /// substring; dotted fields compile to JSON extraction when enabled.
    pub(crate) fn criterion(
        &self,
        criterion: &FilterCriterion,
        json_paths: bool,
    ) -> Option<Predicate> {
        let field = criterion.field.as_str();
        if field.is_empty() {
            self.observer.field_dropped(field, DropReason::Empty);
            return None;
        }
        if json_paths && let Some((base, subpath)) = field.split_once('.') {
            return self.json_path(field, base, subpath, &criterion.value);
        }
        self.contains(field, &criterion.value)
    }

    fn contains(&self, field: &str, value: &str) -> Option<Predicate> {
        if !self.guard.is_safe(field) {
            self.observer.field_dropped(field, DropReason::Unsafe);
            return None;
        }
        Some(Predicate::Contains {
            column: self.strategy.qualify(&self.guard.normalize(field)),
            value: value.to_string(),
        })
    }

    fn json_path(&self, field: &str, base: &str, subpath: &str, value: &str) -> Option<Predicate> {
        let path: Vec<&str> = subpath.split('.').collect();
        if path.iter().any(|segment| !is_path_segment(segment)) {
            self.observer.field_dropped(field, DropReason::MalformedPath);
            return None;
        }
        if !self.guard.is_safe(base) {
            self.observer.field_dropped(field, DropReason::Unsafe);
            return None;
        }
        Some(Predicate::JsonPathEquals {
            column: self.strategy.qualify(&self.guard.normalize(base)),
            path: path.into_iter().map(str::to_string).collect(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::session::guard::Entity;
    use crate::data::session::observer::CollectingObserver;

    static PROFILE_COLUMNS: &[&str] = &["owner", "name", "display_name", "profile"];

    #[test]
    fn owner_predicate() {
        let guard = FieldGuard::shape_only();
        let observer = CollectingObserver::new();
        let direct = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);
        let joined = FilterCompiler::new(&guard, &observer, JoinStrategy::UserTable);

        assert_eq!(direct.owner(""), None);
        assert_eq!(
            direct.owner("org1"),
            Some(Predicate::Equals {
                column: "owner".to_string(),
                value: "org1".to_string()
            })
        );
        assert_eq!(joined.owner("org1").unwrap().column(), "a.owner");
    }

    #[test]
    fn field_value_compiles_substring() {
        let guard = FieldGuard::for_entity(Entity::User);
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);

        assert_eq!(
            compiler.field_value("displayName", "ali"),
            Some(Predicate::Contains {
                column: "display_name".to_string(),
                value: "ali".to_string()
            })
        );
        assert!(observer.events().is_empty());
    }

    #[test]
    fn field_value_needs_both_sides() {
        let guard = FieldGuard::shape_only();
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);

        assert_eq!(compiler.field_value("", ""), None);
        assert_eq!(compiler.field_value("name", ""), None);
        assert_eq!(compiler.field_value("", "ali"), None);
        assert_eq!(
            observer.dropped(),
            vec![
                ("name".to_string(), DropReason::Empty),
                (String::new(), DropReason::Empty),
            ]
        );
    }

    #[test]
    fn unsafe_field_is_dropped() {
        let guard = FieldGuard::for_entity(Entity::User);
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);

        assert_eq!(compiler.field_value("name) or (1=1", "x"), None);
        assert_eq!(compiler.field_value("password", "x"), None);
        assert_eq!(observer.dropped().len(), 2);
        assert!(
            observer
                .dropped()
                .iter()
                .all(|(_, reason)| *reason == DropReason::Unsafe)
        );
    }

    #[test]
    fn criterion_with_empty_value_still_compiles() {
        let guard = FieldGuard::shape_only();
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::UserTable);

        let predicate = compiler
            .criterion(&FilterCriterion::new("name", ""), false)
            .unwrap();
        assert_eq!(predicate.column(), "a.name");
        assert_eq!(predicate.value(), "");
    }

    #[test]
    fn json_path_compiles_exact_match() {
        let guard = FieldGuard::allowlist(PROFILE_COLUMNS);
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::UserTable);

        assert_eq!(
            compiler.criterion(&FilterCriterion::new("profile.age", "30"), true),
            Some(Predicate::JsonPathEquals {
                column: "a.profile".to_string(),
                path: vec!["age".to_string()],
                value: "30".to_string(),
            })
        );
    }

    #[test]
    fn json_path_nested_segments() {
        let guard = FieldGuard::shape_only();
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);

        let predicate = compiler
            .criterion(&FilterCriterion::new("properties.address.city", "Paris"), true)
            .unwrap();
        assert_eq!(
            predicate,
            Predicate::JsonPathEquals {
                column: "properties".to_string(),
                path: vec!["address".to_string(), "city".to_string()],
                value: "Paris".to_string(),
            }
        );
    }

    #[test]
    fn json_path_rejects_malformed_subpath() {
        let guard = FieldGuard::shape_only();
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);

        for field in [
            "profile.",
            "profile..age",
            "profile.age')--",
            "profile.a b",
            "profile.0",
            "profile.1a",
            "profile.address.2nd",
        ] {
            assert_eq!(
                compiler.criterion(&FilterCriterion::new(field, "1"), true),
                None,
                "{field}"
            );
        }
        assert!(
            observer
                .dropped()
                .iter()
                .all(|(_, reason)| *reason == DropReason::MalformedPath)
        );
    }

    #[test]
    fn json_path_base_must_be_safe() {
        let guard = FieldGuard::allowlist(PROFILE_COLUMNS);
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);

        assert_eq!(
            compiler.criterion(&FilterCriterion::new("secrets.key", "1"), true),
            None
        );
        assert_eq!(
            observer.dropped(),
            vec![("secrets.key".to_string(), DropReason::Unsafe)]
        );
    }

    #[test]
    fn dotted_field_without_json_paths_is_unsafe() {
        let guard = FieldGuard::shape_only();
        let observer = CollectingObserver::new();
        let compiler = FilterCompiler::new(&guard, &observer, JoinStrategy::Direct);

        assert_eq!(
            compiler.criterion(&FilterCriterion::new("profile.age", "30"), false),
            None
        );
        assert_eq!(
            observer.dropped(),
            vec![("profile.age".to_string(), DropReason::Unsafe)]
        );
    }

    #[test]
    fn criterion_deserializes() {
        let criterion: FilterCriterion =
            serde_json::from_str(r#"{"field": "displayName", "value": "ali"}"#).unwrap();
        assert_eq!(criterion, FilterCriterion::new("displayName", "ali"));
    }
}
