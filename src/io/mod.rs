//! File-backed collaborators: candidate source and report sink

pub mod loader;
pub mod writer;

pub use loader::CsvCandidateLoader;
pub use writer::JsonReportWriter;
