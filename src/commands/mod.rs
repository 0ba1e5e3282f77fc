pub mod date;
pub mod extract;
pub mod ingest;
pub mod inventory;
pub mod pages;
pub mod segment;
pub mod status;
#[cfg(test)]
mod tests;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::SegmenterArgs;
use crate::model::TranscriptReport;
use crate::transcript::{
    BillReferenceResolver, BillVocabulary, ProcessedTranscript, SegmenterConfig,
    SpeakerSegmenter, TranscriptPipeline,
};
use crate::util::now_utc_string;

pub fn build_pipeline(args: &SegmenterArgs) -> Result<TranscriptPipeline> {
    let config = SegmenterConfig {
        include_presiding_officers: args.include_presiding,
        min_statement_chars: args.min_statement_chars,
        ..SegmenterConfig::default()
    };
    let segmenter = SpeakerSegmenter::new(config)?;

    let resolver = match &args.bill_vocabulary_path {
        Some(path) => {
            let vocabulary = BillVocabulary::from_json_file(path)?;
            info!(
                path = %path.display(),
                words = vocabulary.len(),
                "loaded bill vocabulary"
            );
            BillReferenceResolver::with_vocabulary(vocabulary)?
        }
        None => BillReferenceResolver::new()?,
    };

    Ok(TranscriptPipeline::new(segmenter, resolver))
}

pub struct ReportSource {
    pub source: String,
    pub sha256: Option<String>,
    pub title: Option<String>,
    pub session_date: Option<String>,
    pub page_count: usize,
}

pub fn build_report(source: ReportSource, processed: ProcessedTranscript) -> TranscriptReport {
    if !processed.low_information_pages.is_empty() {
        warn!(
            source = %source.source,
            pages = ?processed.low_information_pages,
            "pages had no detectable speakers"
        );
    }

    let statement_count = processed.statements.len();
    let bill_reference_count = processed.bill_reference_count();

    TranscriptReport {
        report_version: 1,
        generated_at: now_utc_string(),
        source: source.source,
        sha256: source.sha256,
        title: source.title,
        session_date: source.session_date,
        page_count: source.page_count,
        low_information_pages: processed.low_information_pages,
        statement_count,
        bill_reference_count,
        statements: processed.statements,
    }
}
