//! Resume ingestion: archive expansion, text extraction, field extraction
//! and record assembly

mod archive;
mod assembler;
pub mod fields;
mod parser;

pub use archive::{check_admission, ArchiveExpander};
pub use assembler::{CandidateAssembler, IdGenerator, UuidGenerator};
pub use fields::{EmailRule, FieldExtractor, FieldRule, NameRule, PhoneRule};
pub use parser::{ExtractionError, TextExtractor};
