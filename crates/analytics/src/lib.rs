//! # Sales Analytics Engine
//!
//! This crate turns a collection of `Sale`s into the numbers a sales dashboard
//! displays: headline KPIs and grouped totals for charts.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   terminals or browsers. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Filtering and every aggregate are pure functions
//!   of their input. Each change of selection recomputes everything from the
//!   immutable record set, so identical selections always give identical reports.
//!
//! ## Public API
//!
//! - `Selection` / `FilterOptions`: which values of each filter dimension are allowed.
//! - `aggregate`: the individual reductions (`total_sales`, `sum_by_hour`, ...).
//! - `AnalyticsEngine`: runs filter and every aggregate into a `DashboardReport`.
//! - `Dashboard`: holds the loaded records and keeps only the newest report.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod report;
pub mod session;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::{FilterOptions, Selection, filter};
pub use report::{DashboardReport, GroupCount, GroupTotal, TrendPoint};
pub use session::{Dashboard, RefreshTicket};
