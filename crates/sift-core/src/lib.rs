//! # sift-core
//!
//! Core types and error types for Sift.
//!
//! This crate provides the foundational types shared across all Sift crates:
//! - The in-memory [`Table`] and its typed [`Column`] storage
//! - Column classification into numeric and categorical sets
//! - Stored dataset records and listing entries
//! - Response types rendered by the `sift` binary
//! - Cross-cutting error types

pub mod column;
pub mod column_set;
pub mod dataset;
pub mod errors;
pub mod responses;
pub mod table;

pub use column::{Cell, Column, ColumnData, ColumnKind};
pub use column_set::ColumnSet;
pub use dataset::{DatasetOverview, StoredDataset};
pub use errors::CoreError;
pub use table::{SortOrder, Table};
