//! # Sales Data Source
//!
//! This crate reads the exported `Sales` worksheet and turns it into the
//! immutable collection of `Sale`s every dashboard refresh works from.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All knowledge of the file layout (banner rows, column
//!   headers, date and time cell formats) lives here. The analytics layer only
//!   ever sees `Sale`s.
//! - **Load Once:** `DatasetCache` loads the sheet the first time it is asked
//!   and hands out the same shared snapshot afterwards.
//!
//! ## Public API
//!
//! - `SalesSheet`: where the sheet is and how to read it; `load` parses it.
//! - `DatasetCache` / `DATASET`: one-time, process-wide loading.
//! - `DataSourceError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod cache;
pub mod error;
pub mod sheet;

// Re-export the key components to create a clean, public-facing API.
pub use cache::{DATASET, DatasetCache};
pub use error::DataSourceError;
pub use sheet::SalesSheet;
