//! Instagram API service implementations.

mod users;

pub use users::*;
