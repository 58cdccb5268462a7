use super::User;

/// Returns the users whose name, username or email contains `query`,
/// ignoring case. An empty query keeps every user.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    if query.is_empty() {
        return users.iter().collect();
    }

    let needle = query.to_lowercase();

    users
        .iter()
        .filter(|user| {
            user.name.to_lowercase().contains(&needle)
                || user.username.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
        })
        .collect()
}
