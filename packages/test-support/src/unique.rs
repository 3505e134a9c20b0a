//! Unique test data generation.
//!
//! ULID-suffixed values keep tests isolated from each other without any
//! coordination; two calls never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}
