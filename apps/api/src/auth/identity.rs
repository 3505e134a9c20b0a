//! Authenticated caller identity.

/// Who a verified token says the caller is.
///
/// The auth gate inserts exactly one of these into the request's typed
/// extensions after verification; the dispatcher copies it into the call
/// [`crate::context::Context`]. Nothing else writes it, and readers go
/// through [`crate::context::Context::require_identity`], so there is no
/// string-keyed lookup to misspell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}
