//! # sift-db
//!
//! libSQL persistence for Sift dataset snapshots.
//!
//! A single `datasets` table holds one row per save: a name, a
//! server-assigned id and upload timestamp, and the table encoded as
//! delimited text. The store may be a local file, `:memory:`, or a remote
//! libSQL server. Connecting is bounded by a timeout and retried with a fixed
//! delay; see [`retry`].

pub mod error;
pub mod helpers;
pub mod retry;
mod schema;
mod store;

pub use error::DatabaseError;
pub use schema::{DATASETS_TABLE, has_table};
pub use store::{DatasetStore, Location};
