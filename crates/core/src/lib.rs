//! `stockmerge-core`: keyed stock/catalog merge engine.
//!
//! Pure engine crate: receives pre-loaded rows, returns merged rows and
//! a summary. No CLI or IO dependencies.

pub mod cell;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod reference;
pub mod report;

pub use cell::{Cell, Row};
pub use config::MergeConfig;
pub use error::MergeError;
pub use merge::run;
pub use model::{MergeResult, MergeRun, StockIndex};
