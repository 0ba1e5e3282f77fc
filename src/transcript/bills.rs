use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::{Captures, Match, Regex};

use super::types::BillReference;
use super::vocabulary::BillVocabulary;

/// Citation shapes, most specific first. Earlier classes claim text before
/// the more permissive ones get a chance at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BillPatternClass {
    NamedWithArticle,
    Named,
    NumberedNo,
    YearSlashNumber,
    NumberWord,
    BareNumber,
}

impl BillPatternClass {
    fn as_str(self) -> &'static str {
        match self {
            Self::NamedWithArticle => "named bill with article",
            Self::Named => "named bill",
            Self::NumberedNo => "bill no",
            Self::YearSlashNumber => "bill year/number",
            Self::NumberWord => "bill number",
            Self::BareNumber => "bare bill number",
        }
    }

    fn is_named(self) -> bool {
        matches!(self, Self::NamedWithArticle | Self::Named)
    }
}

#[derive(Debug)]
struct BillPattern {
    class: BillPatternClass,
    regex: Regex,
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum DedupKey {
    TypeYear(String, String),
    YearNumber(String, String),
    Number(String),
    Raw(String),
}

#[derive(Debug)]
pub struct BillReferenceResolver {
    vocabulary: BillVocabulary,
    patterns: Vec<BillPattern>,
}

impl BillReferenceResolver {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(BillVocabulary::default())
    }

    pub fn with_vocabulary(vocabulary: BillVocabulary) -> Result<Self> {
        let sources = [
            (
                BillPatternClass::NamedWithArticle,
                r"(?i)\bthe\s+(?P<type>[a-z]+)\s+bill,?\s+(?P<year>\d{4})\b",
            ),
            (
                BillPatternClass::Named,
                r"(?i)\b(?P<type>[a-z]+)\s+bill,?\s+(?:\((?P<paren_year>\d{4})\)|(?P<year>\d{4})\b)",
            ),
            (
                BillPatternClass::NumberedNo,
                r"(?i)\bbill\s+no\.?\s*(?P<number>\d+)(?:\s+of\s+(?P<year>\d{4}))?\b",
            ),
            (
                BillPatternClass::YearSlashNumber,
                r"(?i)\bbill\s+(?P<year>\d{4})[/\-](?P<number>\d+)\b",
            ),
            (
                BillPatternClass::NumberWord,
                r"(?i)\bbill\s+number\s+(?P<number>\d+)\b",
            ),
            (
                BillPatternClass::BareNumber,
                r"(?i)\bbill\s+(?P<number>\d{1,3})\b",
            ),
        ];

        let mut patterns = Vec::with_capacity(sources.len());
        for (class, source) in sources {
            let regex = Regex::new(source)
                .with_context(|| format!("failed to compile {} regex", class.as_str()))?;
            patterns.push(BillPattern { class, regex });
        }

        Ok(Self {
            vocabulary,
            patterns,
        })
    }

    /// Bill citations in `text`, ordered by position, one per distinct bill.
    pub fn resolve(&self, text: &str) -> Vec<BillReference> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut claimed = Vec::<(usize, usize)>::new();
        let mut references = Vec::<BillReference>::new();

        for pattern in &self.patterns {
            let mut claimed_by_class = Vec::<(usize, usize)>::new();

            for captures in pattern.regex.captures_iter(text) {
                let Some(whole) = captures.get(0) else {
                    continue;
                };
                let already_claimed = claimed
                    .iter()
                    .any(|(start, end)| whole.start() >= *start && whole.start() < *end);
                if already_claimed {
                    continue;
                }

                let Some(reference) = self.build_reference(pattern.class, &captures, whole) else {
                    continue;
                };
                if !reference.is_valid() {
                    continue;
                }

                claimed_by_class.push((whole.start(), whole.end()));
                references.push(reference);
            }

            claimed.extend(claimed_by_class);
        }

        references.sort_by_key(|reference| reference.position);

        let mut seen = HashSet::<DedupKey>::new();
        references.retain(|reference| seen.insert(dedup_key(reference)));
        references
    }

    fn build_reference(
        &self,
        class: BillPatternClass,
        captures: &Captures<'_>,
        whole: Match<'_>,
    ) -> Option<BillReference> {
        let bill_type = if class.is_named() {
            let raw_type = captures.name("type")?.as_str();
            // Unknown subject words are ordinary prose ("Random Bill 2024").
            Some(self.vocabulary.canonical(raw_type)?.to_string())
        } else {
            None
        };

        let bill_year = captures
            .name("year")
            .or_else(|| captures.name("paren_year"))
            .map(|value| value.as_str().to_string());
        let bill_number = captures
            .name("number")
            .map(|value| strip_leading_zeros(value.as_str()));

        let full_matched_text = whole.as_str().to_string();
        let normalized = render_normalized(
            bill_type.as_deref(),
            bill_year.as_deref(),
            bill_number.as_deref(),
            &full_matched_text,
        );

        Some(BillReference {
            bill_number,
            bill_year,
            bill_type,
            full_matched_text,
            position: whole.start(),
            normalized,
        })
    }
}

fn strip_leading_zeros(number: &str) -> String {
    let stripped = number.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

fn render_normalized(
    bill_type: Option<&str>,
    bill_year: Option<&str>,
    bill_number: Option<&str>,
    full_matched_text: &str,
) -> String {
    match (bill_type, bill_year, bill_number) {
        (Some(bill_type), Some(year), _) => format!("{bill_type} Bill {year}"),
        (None, Some(year), Some(number)) => format!("Bill {year}/{number}"),
        (None, None, Some(number)) => format!("Bill No. {number}"),
        _ => full_matched_text.to_string(),
    }
}

fn dedup_key(reference: &BillReference) -> DedupKey {
    match (
        reference.bill_type.as_deref(),
        reference.bill_year.as_deref(),
        reference.bill_number.as_deref(),
    ) {
        (Some(bill_type), Some(year), _) => {
            DedupKey::TypeYear(bill_type.to_lowercase(), year.to_string())
        }
        (_, Some(year), Some(number)) => DedupKey::YearNumber(year.to_string(), number.to_string()),
        (_, _, Some(number)) => DedupKey::Number(number.to_string()),
        _ => DedupKey::Raw(reference.full_matched_text.clone()),
    }
}
