//! Database module exports.

mod mongo;
mod users;

pub use mongo::Database;
pub use users::UserRepo;
