//! User entity.

use time::OffsetDateTime;

/// A registered account. `email` is stored normalized (trimmed, NFKC,
/// lowercased) and is unique; `password_hash` is a PHC string and never
/// leaves the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
