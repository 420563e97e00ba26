//! Field-name safety guard
//!
//! Values are always bound as parameters; field names are not, so a field
//! only reaches SQL text after passing [`FieldGuard::is_safe`]. The guard
//! checks identifier shape and, in allowlist mode, membership in a closed
//! per-entity column table.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::string::snake_case;

static FIELD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("Invalid regex"));

// Bare JSON path keys: MySQL and SQLite reject `$.0` and `$.1a`
static PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"));

/// Column allowlists for filterable entities (snake_case).
///
/// Credential columns (password hashes, secrets, tokens) are left out so
/// they cannot be probed through substring filters.
pub mod columns {
    pub const USER: &[&str] = &[
        "owner",
        "name",
        "created_time",
        "updated_time",
        "deleted_time",
        "id",
        "external_id",
        "type",
        "display_name",
        "first_name",
        "last_name",
        "avatar",
        "email",
        "email_verified",
        "phone",
        "country_code",
        "region",
        "location",
        "address",
        "affiliation",
        "title",
        "id_card_type",
        "homepage",
        "bio",
        "tag",
        "language",
        "gender",
        "birthday",
        "education",
        "score",
        "karma",
        "ranking",
        "is_online",
        "is_admin",
        "is_forbidden",
        "is_deleted",
        "signup_application",
        "created_ip",
        "last_signin_time",
        "properties",
        "groups",
    ];

    pub const ORGANIZATION: &[&str] = &[
        "owner",
        "name",
        "created_time",
        "display_name",
        "website_url",
        "logo",
        "favicon",
        "password_type",
        "country_codes",
        "default_avatar",
        "default_application",
        "tags",
        "languages",
        "init_score",
        "enable_soft_deletion",
        "is_profile_public",
    ];

    pub const APPLICATION: &[&str] = &[
        "owner",
        "name",
        "created_time",
        "display_name",
        "logo",
        "homepage_url",
        "description",
        "organization",
        "cert",
        "enable_password",
        "enable_sign_up",
        "client_id",
        "redirect_uris",
        "token_format",
        "expire_in_hours",
        "refresh_expire_in_hours",
    ];

    pub const TOKEN: &[&str] = &[
        "owner",
        "name",
        "created_time",
        "application",
        "organization",
        "user",
        "expires_in",
        "scope",
        "token_type",
    ];
}

/// Entities with a closed column allowlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Organization,
    Application,
    Token,
}

impl Entity {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::User => columns::USER,
            Self::Organization => columns::ORGANIZATION,
            Self::Application => columns::APPLICATION,
            Self::Token => columns::TOKEN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Organization => "organization",
            Self::Application => "application",
            Self::Token => "token",
        }
    }
}

/// Decides which caller field names may become SQL text
#[derive(Debug, Clone, Copy)]
pub struct FieldGuard {
    allowed: Option<&'static [&'static str]>,
}

impl FieldGuard {
    /// Identifier-shape check only, no column table
    pub fn shape_only() -> Self {
        Self { allowed: None }
    }

    /// Shape check plus membership in `allowed` (snake_case columns)
    pub fn allowlist(allowed: &'static [&'static str]) -> Self {
        Self {
            allowed: Some(allowed),
        }
    }

    pub fn for_entity(entity: Entity) -> Self {
        Self::allowlist(entity.columns())
    }

    pub fn is_safe(&self, field: &str) -> bool {
        if !is_identifier(field) {
            return false;
        }
        match self.allowed {
            None => true,
            Some(allowed) => {
                let column = self.normalize(field);
                allowed.contains(&column.as_str())
            }
        }
    }

    /// Map an API field name to the store's column convention
    pub fn normalize(&self, field: &str) -> String {
        snake_case(field)
    }
}

fn is_identifier(s: &str) -> bool {
    FIELD_SHAPE.is_match(s)
}

/// A key usable unquoted in a JSON path expression
pub(crate) fn is_path_segment(s: &str) -> bool {
    PATH_SEGMENT.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_start_with_non_digit() {
        assert!(is_path_segment("age"));
        assert!(is_path_segment("_tmp1"));
        assert!(!is_path_segment("0"));
        assert!(!is_path_segment("1a"));
        assert!(!is_path_segment(""));
        assert!(!is_path_segment("a-b"));
    }

    #[test]
    fn shape_only_accepts_identifiers() {
        let guard = FieldGuard::shape_only();
        assert!(guard.is_safe("displayName"));
        assert!(guard.is_safe("created_time"));
        assert!(guard.is_safe("field2"));
    }

    #[test]
    fn shape_rejects_sql_fragments() {
        let guard = FieldGuard::shape_only();
        for field in [
            "",
            "name;drop table user",
            "name or 1=1",
            "name--",
            "a.name",
            "name'",
            "`name`",
            "na\u{0}me",
            "displayNäme",
        ] {
            assert!(!guard.is_safe(field), "{field:?}");
        }
    }

    #[test]
    fn allowlist_checks_normalized_column() {
        let guard = FieldGuard::for_entity(Entity::User);
        assert!(guard.is_safe("displayName"));
        assert!(guard.is_safe("display_name"));
        assert!(guard.is_safe("createdTime"));
        assert!(!guard.is_safe("password"));
        assert!(!guard.is_safe("accessSecret"));
        assert!(!guard.is_safe("nonexistent"));
    }

    #[test]
    fn allowlist_still_checks_shape() {
        static COLUMNS: &[&str] = &["name", "name or 1=1"];
        let guard = FieldGuard::allowlist(COLUMNS);
        assert!(guard.is_safe("name"));
        assert!(!guard.is_safe("name or 1=1"));
    }

    #[test]
    fn normalize_is_snake_case() {
        let guard = FieldGuard::shape_only();
        assert_eq!(guard.normalize("displayName"), "display_name");
        assert_eq!(guard.normalize("owner"), "owner");
    }

    #[test]
    fn entity_columns_are_normalized() {
        let guard = FieldGuard::shape_only();
        for entity in [
            Entity::User,
            Entity::Organization,
            Entity::Application,
            Entity::Token,
        ] {
            for column in entity.columns() {
                assert_eq!(guard.normalize(column), *column, "{}", entity.name());
                assert!(FieldGuard::for_entity(entity).is_safe(column));
            }
        }
    }
}
