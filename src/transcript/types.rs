use serde::{Deserialize, Serialize};

/// One page of extracted transcript text, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// A contiguous span of page text attributed to one speaker.
///
/// `start_offset` is where the speaker introduction begins and `end_offset`
/// is where the next introduction begins (or the end of the page). Both are
/// byte offsets into the page text the statement was cut from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub speaker_name: String,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub page_number: Option<u32>,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillReference {
    pub bill_number: Option<String>,
    pub bill_year: Option<String>,
    pub bill_type: Option<String>,
    pub full_matched_text: String,
    pub position: usize,
    pub normalized: String,
}

impl BillReference {
    pub fn is_valid(&self) -> bool {
        let has_number = self
            .bill_number
            .as_deref()
            .map(|value| !value.is_empty())
            .unwrap_or(false);
        let has_type = self
            .bill_type
            .as_deref()
            .map(|value| !value.is_empty())
            .unwrap_or(false);
        has_number || has_type
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedStatement {
    #[serde(flatten)]
    pub statement: Statement,
    pub bill_references: Vec<BillReference>,
}
