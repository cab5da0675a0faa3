//! Filter and pagination state synchronized with the URL query string.
//!
//! [`QueryState`] is the typed snapshot; [`QueryHandle`] owns the URL and
//! commits every change to it immediately (live filtering). Malformed values
//! in the URL never surface as errors: each key falls back to its default.

mod handle;
mod state;

pub use handle::QueryHandle;
pub use state::{keys, parse_query_date, QueryState, RowsPerPage};
