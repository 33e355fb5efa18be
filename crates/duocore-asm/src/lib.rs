pub mod model;
pub mod report;

// Re-export commonly used types/functions for the CLI
pub use model::{load_raw_bin, Image};
pub use report::{ListingRow, Report, SymbolKV};
