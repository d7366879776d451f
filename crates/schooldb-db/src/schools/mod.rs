//! Database operations for the `schools` table.

mod read;
mod types;
mod write;

pub use read::list_schools;
pub use types::SchoolRow;
pub use write::insert_school;
