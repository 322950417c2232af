pub mod airplane;
pub mod airport;
pub mod booking;
pub mod health;
pub mod route;
pub mod schedule;
pub mod search;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

// Codes are compared case-insensitively everywhere, so they are stored trimmed and uppercased
pub(crate) fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
