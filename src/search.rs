use crate::app::AppState;
use crate::model::UserRecord;

/// Case-insensitive substring match on `name`.
pub fn name_matches(user: &UserRecord, term_lower: &str) -> bool {
    user.name.to_lowercase().contains(term_lower)
}

/// Records whose name contains `term`, ignoring case. An empty term keeps all.
pub fn filter_by_name<'a>(users: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    let q = term.to_lowercase();
    users.iter().filter(|u| name_matches(u, &q)).collect()
}

/// Keep the list selection inside the currently visible rows after the
/// search term or the collection changed.
pub fn apply_search(app: &mut AppState) {
    let visible = app.visible_users().len();
    app.selected_user_index = app.selected_user_index.min(visible.saturating_sub(1));
}
