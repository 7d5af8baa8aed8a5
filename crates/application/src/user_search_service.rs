//! In-memory user search.
//!
//! Matches a free-text term against names and emails, applies the optional
//! [`UserFilter`] constraints, and returns clones of the survivors ordered by
//! name.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use toolbelt_domain::{User, UserFilter, parse_calendar_instant};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Filters and sorts users.
///
/// A user is kept when the trimmed, case-folded `search_term` occurs in its
/// case-folded name or email, and every constraint present in `filters`
/// holds. `registered_after` is strict and only excludes users when both
/// dates parse. The result is stably sorted by [`locale_compare`] on name.
#[must_use]
pub fn filter_and_search_users(
    users: &[User],
    search_term: Option<&str>,
    filters: Option<&UserFilter>,
) -> Vec<User> {
    let needle = search_term
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty());
    let registered_after = filters
        .and_then(|filters| filters.registered_after.as_deref())
        .and_then(parse_calendar_instant);

    let mut matches: Vec<User> = users
        .iter()
        .filter(|user| matches_search_term(user, needle.as_deref()))
        .filter(|user| filters.is_none_or(|filters| matches_filters(user, filters)))
        .filter(|user| registered_strictly_after(user, registered_after))
        .cloned()
        .collect();

    matches.sort_by(|left, right| locale_compare(&left.name, &right.name));

    debug!(
        total = users.len(),
        matched = matches.len(),
        "user search completed"
    );

    matches
}

/// Orders strings the way a human-facing listing expects.
///
/// Letters compare on their base form first, ignoring accents and case, so
/// `Émile` sorts among the `E`s. Ties fall back to accents (unaccented
/// first) and then case (lowercase first).
#[must_use]
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(&base_letters(right))
        .then_with(|| left.to_lowercase().cmp(&right.to_lowercase()))
        .then_with(|| case_tiebreak(left, right))
}

fn base_letters(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn case_tiebreak(left: &str, right: &str) -> Ordering {
    left.chars()
        .zip(right.chars())
        .map(|(l, r)| l.is_uppercase().cmp(&r.is_uppercase()).then(l.cmp(&r)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| left.len().cmp(&right.len()))
}

fn matches_search_term(user: &User, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };

    user.name.to_lowercase().contains(needle) || user.email.to_lowercase().contains(needle)
}

fn matches_filters(user: &User, filters: &UserFilter) -> bool {
    let role_matches = filters
        .role
        .as_deref()
        .is_none_or(|role| user.role == role);
    let active_matches = filters.active.is_none_or(|active| user.active == active);

    role_matches && active_matches
}

fn registered_strictly_after(user: &User, cutoff: Option<DateTime<Utc>>) -> bool {
    match (cutoff, user.registered_instant()) {
        (Some(cutoff), Some(registered)) => registered > cutoff,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn directory() -> Vec<User> {
        vec![
            User::new("Charlie Brown", "charlie@example.com", "user", true, "2023-06-15"),
            User::new("alice Smith", "alice@corp.io", "admin", true, "2024-01-10"),
            User::new("Bob Jones", "bob@example.com", "user", false, "2022-11-01"),
            User::new("Dana White", "dana@corp.io", "admin", false, "not a date"),
        ]
    }

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|user| user.name.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = filter_and_search_users(&[], Some("x"), Some(&UserFilter::default()));
        assert!(result.is_empty());
    }

    #[test]
    fn no_criteria_returns_everyone_sorted_by_name() {
        let result = filter_and_search_users(&directory(), None, None);
        assert_eq!(
            names(&result),
            vec!["alice Smith", "Bob Jones", "Charlie Brown", "Dana White"]
        );
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let users = vec![User::new("Alice Smith", "a@x.io", "user", true, "2024-01-01")];
        let result = filter_and_search_users(&users, Some("ALICE"), None);
        assert_eq!(names(&result), vec!["Alice Smith"]);
    }

    #[test]
    fn search_matches_email_and_trims_term() {
        let result = filter_and_search_users(&directory(), Some("  CORP.IO "), None);
        assert_eq!(names(&result), vec!["alice Smith", "Dana White"]);
    }

    #[test]
    fn blank_search_term_does_not_constrain() {
        let result = filter_and_search_users(&directory(), Some("   "), None);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn role_and_active_filters_combine() {
        let filters = UserFilter::default().with_role("admin").with_active(true);
        let result = filter_and_search_users(&directory(), None, Some(&filters));
        assert_eq!(names(&result), vec!["alice Smith"]);
    }

    #[test]
    fn active_false_is_a_real_constraint() {
        let filters = UserFilter::default().with_active(false);
        let result = filter_and_search_users(&directory(), None, Some(&filters));
        assert_eq!(names(&result), vec!["Bob Jones", "Dana White"]);
    }

    #[test]
    fn registered_after_is_strict_and_skips_unparsable_dates() {
        let filters = UserFilter::default().with_registered_after("2023-06-15");
        let result = filter_and_search_users(&directory(), None, Some(&filters));
        // Charlie registered on the cutoff itself; Dana's date does not parse.
        assert_eq!(names(&result), vec!["alice Smith", "Dana White"]);
    }

    #[test]
    fn registered_after_compares_instants_not_strings() {
        let users = vec![User::new(
            "Eve",
            "eve@example.com",
            "user",
            true,
            "2023-06-15T00:00:01Z",
        )];
        let filters = UserFilter::default().with_registered_after("2023-06-15");
        assert_eq!(
            filter_and_search_users(&users, None, Some(&filters)).len(),
            1
        );
    }

    #[test]
    fn unparsable_cutoff_does_not_exclude_anyone() {
        let filters = UserFilter::default().with_registered_after("someday");
        let result = filter_and_search_users(&directory(), None, Some(&filters));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn ties_keep_input_order() {
        let users = vec![
            User::new("Sam", "first@example.com", "user", true, ""),
            User::new("Sam", "second@example.com", "user", true, ""),
            User::new("Ann", "third@example.com", "user", true, ""),
        ];
        let result = filter_and_search_users(&users, None, None);
        let emails: Vec<&str> = result.iter().map(|user| user.email.as_str()).collect();
        assert_eq!(
            emails,
            vec!["third@example.com", "first@example.com", "second@example.com"]
        );
    }

    #[test]
    fn input_records_are_left_untouched() {
        let users = directory();
        let snapshot = users.clone();
        let _ = filter_and_search_users(&users, Some("a"), None);
        assert_eq!(users, snapshot);
    }

    #[test]
    fn locale_compare_puts_lowercase_first_on_case_ties() {
        assert_eq!(locale_compare("alice", "Alice"), Ordering::Less);
        assert_eq!(locale_compare("Alice", "bob"), Ordering::Less);
        assert_eq!(locale_compare("zed", "Zed"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let users = vec![
            User::new("Zoe", "zoe@example.com", "user", true, ""),
            User::new("Émile", "emile@example.com", "user", true, ""),
            User::new("Eve", "eve@example.com", "user", true, ""),
            User::new("Ana", "ana@example.com", "user", true, ""),
        ];

        let result = filter_and_search_users(&users, None, None);
        assert_eq!(names(&result), vec!["Ana", "Émile", "Eve", "Zoe"]);
    }

    #[test]
    fn unaccented_form_comes_first_on_accent_ties() {
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("résumé", "Resume"), Ordering::Greater);
        assert_eq!(locale_compare("Émile", "Zoe"), Ordering::Less);
    }

    proptest! {
        #[test]
        fn results_are_sorted_by_name(raw_names in proptest::collection::vec("[a-zA-ZéÉèüÜñ ]{0,12}", 0..24)) {
            let users: Vec<User> = raw_names
                .iter()
                .map(|name| User::new(name.as_str(), "x@example.com", "user", true, ""))
                .collect();

            let result = filter_and_search_users(&users, None, None);
            prop_assert_eq!(result.len(), users.len());
            for pair in result.windows(2) {
                prop_assert_ne!(locale_compare(&pair[0].name, &pair[1].name), Ordering::Greater);
            }
        }
    }
}
