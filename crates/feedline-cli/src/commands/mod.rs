//! Command implementations.

pub mod dashboard;
pub mod delete;
pub mod extract;
pub mod ingest;
pub mod list;

pub use self::dashboard::execute_dashboard;
pub use self::delete::execute_delete;
pub use self::extract::execute_extract;
pub use self::ingest::execute_ingest;
pub use self::list::execute_list;
