use serde::Serialize;

use super::bills::BillReferenceResolver;
use super::speakers::SpeakerSegmenter;
use super::types::{EnrichedStatement, PageText};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessedTranscript {
    pub statements: Vec<EnrichedStatement>,
    pub low_information_pages: Vec<u32>,
}

impl ProcessedTranscript {
    pub fn bill_reference_count(&self) -> usize {
        self.statements
            .iter()
            .map(|statement| statement.bill_references.len())
            .sum()
    }
}

/// Segments pages into statements and attaches each statement's bill citations.
pub struct TranscriptPipeline {
    segmenter: SpeakerSegmenter,
    resolver: BillReferenceResolver,
}

impl TranscriptPipeline {
    pub fn new(segmenter: SpeakerSegmenter, resolver: BillReferenceResolver) -> Self {
        Self {
            segmenter,
            resolver,
        }
    }

    pub fn process(&self, pages: &[PageText]) -> ProcessedTranscript {
        let document = self.segmenter.segment_pages(pages);

        let statements = document
            .statements
            .into_iter()
            .map(|statement| {
                let bill_references = self.resolver.resolve(&statement.text);
                EnrichedStatement {
                    statement,
                    bill_references,
                }
            })
            .collect();

        ProcessedTranscript {
            statements,
            low_information_pages: document.low_information_pages,
        }
    }
}
