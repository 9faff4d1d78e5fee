//! Federation Redeem Script Classifier - Report Types
//!
//! - `report`: Serializable view of a classification result
//! - `batch`: CSV input/output rows and run totals for batch classification

pub mod batch;
pub mod report;

pub use batch::{BatchInputRow, BatchResultRow, BatchSummary};
pub use report::ClassificationReport;
