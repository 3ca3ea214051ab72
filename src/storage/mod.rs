pub mod input;
pub mod reports;

pub use input::{load_records, Loaded};
pub use reports::{ReportStore, SavedReport};
