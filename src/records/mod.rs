//! Achievement record stores.
//!
//! All access to the record collection goes through the four operations of
//! [`RecordStore`]. The in-memory store simulates network latency; the HTTP
//! store talks to a real backend with the same contract.

mod http;
mod memory;
mod store;

pub use http::{HttpStore, HttpStoreConfig};
pub use memory::{MemoryStore, MemoryStoreConfig, Seed};
pub use store::RecordStore;
