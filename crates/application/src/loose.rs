//! Entry points for loosely-typed JSON input.
//!
//! These wrappers accept whatever the caller holds as a [`Value`] and degrade
//! gracefully instead of failing: malformed user lists become an empty result,
//! a malformed password becomes a validation error, and malformed routes or
//! paths become "no match".

use serde::Deserialize;
use serde_json::Value;
use toolbelt_domain::{
    PasswordRequirements, PasswordValidation, RouteDefinition, RouteMatch, User, UserFilter,
};
use tracing::debug;

use crate::{filter_and_search_users, route_matcher, validate_and_hash_password};

/// Searches users given as JSON. Non-array or malformed input yields `[]`.
/// A non-object `filters` value applies no constraints; a mistyped field
/// inside it drops only that constraint.
#[must_use]
pub fn filter_and_search_users_value(
    users: &Value,
    search_term: Option<&str>,
    filters: &Value,
) -> Vec<User> {
    let users = match Vec::<User>::deserialize(users) {
        Ok(users) => users,
        Err(error) => {
            debug!(error = %error, "ignoring malformed user list");
            return Vec::new();
        }
    };
    let filters = UserFilter::deserialize(filters).ok();

    filter_and_search_users(&users, search_term, filters.as_ref())
}

/// Validates a JSON password. Anything but a string counts as missing, and a
/// null or mistyped requirement disables only its own rule.
#[must_use]
pub fn validate_and_hash_password_value(
    password: &Value,
    requirements: &Value,
) -> PasswordValidation {
    let requirements = PasswordRequirements::deserialize(requirements).unwrap_or_default();
    validate_and_hash_password(password.as_str().unwrap_or_default(), &requirements)
}

/// Matches a JSON path against JSON routes. Non-array routes or a non-string
/// path yield `None`; route entries that do not describe a route are skipped.
#[must_use]
pub fn route_matcher_value(routes: &Value, path: &Value) -> Option<RouteMatch> {
    let path = path.as_str()?;
    let Some(entries) = routes.as_array() else {
        debug!("ignoring non-array route table");
        return None;
    };

    let routes: Vec<RouteDefinition> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match RouteDefinition::deserialize(entry) {
            Ok(route) => Some(route),
            Err(error) => {
                debug!(index, error = %error, "skipping malformed route entry");
                None
            }
        })
        .collect();

    route_matcher(&routes, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolbelt_domain::PASSWORD_EMPTY_ERROR;

    #[test]
    fn non_list_users_yield_empty_result() {
        for users in [json!(null), json!("users"), json!({ "name": "Alice" }), json!(3)] {
            assert!(filter_and_search_users_value(&users, None, &Value::Null).is_empty());
        }
    }

    #[test]
    fn malformed_records_yield_empty_result() {
        let users = json!([{ "name": "Alice" }]);
        assert!(filter_and_search_users_value(&users, None, &Value::Null).is_empty());
    }

    #[test]
    fn users_and_filters_are_read_from_json() {
        let users = json!([
            { "name": "Bob", "email": "bob@x.io", "role": "user", "active": true, "registeredAt": "2024-02-01" },
            { "name": "Alice", "email": "alice@x.io", "role": "admin", "active": true, "registeredAt": "2024-01-01" }
        ]);

        let all = filter_and_search_users_value(&users, None, &json!({}));
        assert_eq!(
            all.iter().map(|user| user.name.as_str()).collect::<Vec<_>>(),
            vec!["Alice", "Bob"]
        );

        let admins = filter_and_search_users_value(&users, None, &json!({ "role": "admin" }));
        assert_eq!(admins.len(), 1);
    }

    #[test]
    fn malformed_filters_apply_no_constraints() {
        let users = json!([
            { "name": "Alice", "email": "a@x.io", "role": "admin", "active": true, "registeredAt": "" }
        ]);
        assert_eq!(
            filter_and_search_users_value(&users, None, &json!("role=admin")).len(),
            1
        );
    }

    #[test]
    fn null_registration_date_keeps_the_record() {
        let users = json!([
            { "name": "Bob", "email": "bob@x.io", "role": "user", "active": true, "registeredAt": null },
            { "name": "Alice", "email": "alice@x.io", "role": "admin", "active": true, "registeredAt": "2024-01-01" }
        ]);

        let all = filter_and_search_users_value(&users, None, &json!({}));
        assert_eq!(all.len(), 2);

        let recent =
            filter_and_search_users_value(&users, None, &json!({ "registeredAfter": "2024-06-01" }));
        assert_eq!(
            recent.iter().map(|user| user.name.as_str()).collect::<Vec<_>>(),
            vec!["Bob"]
        );
    }

    #[test]
    fn mistyped_filter_field_keeps_other_constraints() {
        let users = json!([
            { "name": "Alice", "email": "a@x.io", "role": "admin", "active": true, "registeredAt": "" },
            { "name": "Bob", "email": "b@x.io", "role": "user", "active": true, "registeredAt": "" }
        ]);

        let result =
            filter_and_search_users_value(&users, None, &json!({ "role": "admin", "active": "yes" }));
        assert_eq!(
            result.iter().map(|user| user.name.as_str()).collect::<Vec<_>>(),
            vec!["Alice"]
        );
    }

    #[test]
    fn null_requirement_does_not_disable_the_others() {
        let result = validate_and_hash_password_value(
            &json!("abc"),
            &json!({ "minLength": 12, "requireUppercase": true, "requireNumbers": null }),
        );

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Password must be at least 12 characters long".to_owned(),
                "Password must contain at least one uppercase letter".to_owned(),
            ]
        );
        assert_eq!(result.hash, None);
    }

    #[test]
    fn non_string_password_is_reported_as_missing() {
        for password in [json!(null), json!(12345), json!(["a"]), json!("")] {
            let result = validate_and_hash_password_value(&password, &json!({ "minLength": 3 }));
            assert!(!result.is_valid);
            assert_eq!(result.errors, vec![PASSWORD_EMPTY_ERROR.to_owned()]);
            assert_eq!(result.hash, None);
        }
    }

    #[test]
    fn password_requirements_are_read_from_json() {
        let result = validate_and_hash_password_value(
            &json!("Ab1!"),
            &json!({ "minLength": 4, "requireUppercase": true, "requireNumbers": true, "requireSpecialChars": true }),
        );
        assert!(result.is_valid);
        assert_eq!(result.hash.as_deref(), Some("540"));
    }

    #[test]
    fn malformed_routes_or_path_yield_no_match() {
        assert!(route_matcher_value(&json!(null), &json!("/users")).is_none());
        assert!(route_matcher_value(&json!({ "path": "/users" }), &json!("/users")).is_none());
        assert!(route_matcher_value(&json!([{ "path": "/users" }]), &json!(42)).is_none());
    }

    #[test]
    fn malformed_route_entries_are_skipped() {
        let routes = json!([{ "nopath": true }, { "path": 7 }, { "path": "/users/:id" }]);
        let matched = route_matcher_value(&routes, &json!("/users/9"))
            .unwrap_or_else(|| panic!("valid entry should still match"));
        assert_eq!(matched.params.get("id").map(String::as_str), Some("9"));

        assert!(route_matcher_value(&json!([{ "nopath": true }]), &json!("/users")).is_none());
    }

    #[test]
    fn json_routes_keep_extra_fields() {
        let matched = route_matcher_value(
            &json!([{ "path": "/users/:id", "component": "UserDetail" }]),
            &json!("/users/42?tab=profile"),
        )
        .unwrap_or_else(|| panic!("route should match"));

        assert_eq!(matched.route.extra.get("component"), Some(&json!("UserDetail")));
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(matched.query.get("tab").map(String::as_str), Some("profile"));
    }
}
