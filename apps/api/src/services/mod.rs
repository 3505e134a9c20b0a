//! Business operations invoked by route handlers.

pub mod tasks;
pub mod users;
