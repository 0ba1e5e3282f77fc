//! Transcript text extraction: dates, speaker statements and bill citations.
//!
//! Everything here is a pure function of its input text. Apart from
//! [`BillVocabulary::from_json_file`], nothing reads files or shared state, so
//! callers may run pages and documents in parallel.

mod bills;
mod dates;
mod names;
mod pipeline;
mod speakers;
#[cfg(test)]
mod tests;
mod types;
mod vocabulary;

pub use bills::BillReferenceResolver;
pub use dates::{DateMatch, DateNormalizer, DateShape, ordinal_suffix};
pub use names::{AcceptAllNames, NameNormalizer, NameValidator, collapse_whitespace, title_case};
pub use pipeline::{ProcessedTranscript, TranscriptPipeline};
pub use speakers::{
    DEFAULT_MIN_STATEMENT_CHARS, IntroductionKind, SegmentedDocument, SegmenterConfig,
    SpeakerIntroduction, SpeakerSegmenter,
};
pub use types::{BillReference, EnrichedStatement, PageText, Statement};
pub use vocabulary::{BillVocabulary, MonthTable, PresidingOfficers};
