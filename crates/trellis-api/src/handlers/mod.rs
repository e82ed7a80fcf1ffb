//! Handler modules for trellis-api.

pub mod categories;
pub mod context;
pub mod tasks;
pub mod users;
