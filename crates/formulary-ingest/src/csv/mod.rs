//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::read_formulary;
pub use writer::write_formulary;
