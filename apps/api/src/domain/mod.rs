//! Domain entities shared by repositories, services, and routes.

pub mod task;
pub mod user;
