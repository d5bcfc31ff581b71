pub mod error;
pub mod rows;
pub mod writer;

pub use error::ExportError;
pub use rows::{build_rows, Cell, COLUMNS};
pub use writer::{export_outcome, ExportSummary};
