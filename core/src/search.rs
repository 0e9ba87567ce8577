//! Client-side search over the cached user list.

use crate::types::User;

/// Case-insensitive substring match on name or email.
pub fn matches(user: &User, term: &str) -> bool {
    matches_lowercase(user, &term.to_lowercase())
}

fn matches_lowercase(user: &User, term: &str) -> bool {
    user.name.to_lowercase().contains(term) || user.email.to_lowercase().contains(term)
}

/// Users matching `term`, in list order. An empty term keeps everyone.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let term = term.to_lowercase();
    users
        .iter()
        .filter(|user| matches_lowercase(user, &term))
        .collect()
}
