//! Tabular input/output and the batch driver

pub mod batch;
pub mod parser;
pub mod writer;

pub use batch::{run_batch, run_files, BatchSummary};
pub use parser::{parse_record, ParseError, SampleReader};
pub use writer::ResultWriter;
