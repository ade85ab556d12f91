use crate::domain::user::User;
use crate::pagination::Paginated;

/// Data required to render the shared list template.
pub struct UsersPage {
    /// Paginated window of users to show in the table.
    pub users: Paginated<User>,
    /// Search term echoed back to the template when present.
    pub search_term: Option<String>,
}

/// Result of resolving a requested page number against the user collection.
pub enum ListOutcome {
    /// The requested window, ready for rendering.
    Page(UsersPage),
    /// The requested page exceeds the collection; callers redirect here.
    OutOfRange { last_page: usize },
}

/// Result of processing a delete confirmation.
pub enum DeleteOutcome {
    /// The user was removed.
    Deleted { username: String },
    /// The confirmation was missing or invalid; nothing was changed.
    Skipped,
}
