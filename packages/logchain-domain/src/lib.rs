pub mod anchor;
pub mod criteria;
pub mod entry;
pub mod query;
pub mod timestamp;
pub mod window;

mod error;

pub use anchor::Anchor;
pub use criteria::{AnchorCriteria, Predicate, SearchScope};
pub use entry::{BackendRecord, ERROR_FIELD, LogEntry};
pub use error::{Error, Result};
pub use query::{ANCHOR_RESULT_CAP, build_anchor_query, build_chain_query};
pub use window::TimeWindow;
