use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use super::names::{AcceptAllNames, NameNormalizer, NameValidator};
use super::types::{PageText, Statement};
use super::vocabulary::PresidingOfficers;

pub const DEFAULT_MIN_STATEMENT_CHARS: usize = 10;

// Lower-case words allowed inside a member's name, as in `Kimani wa Ichung'wah`.
const NAME_PARTICLES: &str = "wa|ole|arap|bin|binti|ya|van|von|de|da|al";

const FULL_CONFIDENCE: f32 = 1.0;
const UNVERIFIED_NAME_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    pub include_presiding_officers: bool,
    pub min_statement_chars: usize,
    pub presiding_officers: PresidingOfficers,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            include_presiding_officers: false,
            min_statement_chars: DEFAULT_MIN_STATEMENT_CHARS,
            presiding_officers: PresidingOfficers::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroductionKind {
    Member,
    PresidingOfficer,
}

/// A detected `Name:` line opener. `start` is where the name begins and `end`
/// is just past the colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerIntroduction {
    pub kind: IntroductionKind,
    pub raw_name: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SegmentedDocument {
    pub statements: Vec<Statement>,
    pub low_information_pages: Vec<u32>,
}

pub struct SpeakerSegmenter {
    config: SegmenterConfig,
    member_intro: Regex,
    presiding_intro: Regex,
    names: NameNormalizer,
    validator: Box<dyn NameValidator>,
}

impl SpeakerSegmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        Ok(Self {
            config,
            member_intro: Regex::new(&format!(
                r"(?m)^[ \t]*(?P<name>(?i:hon)\.?[ \t]+(?:\([^)\n]*\)[ \t]*)*[A-Z][\w'’.\-]*(?:[ \t]+(?:\([^)\n]*\)[ \t]*)*(?:[A-Z][\w'’.\-]*|(?:{NAME_PARTICLES})\b))*(?:,[ \t]*MP)?)(?:[ \t]*\([^)\n]*\))*[ \t]*:"
            ))
            .context("failed to compile member introduction regex")?,
            presiding_intro: Regex::new(
                r"(?mi)^[ \t]*(?P<name>The[ \t]+(?:Deputy[ \t]+|Temporary[ \t]+)?Speaker|(?:Mr\.?|Madam)[ \t]+Speaker|The[ \t]+(?:Temporary[ \t]+)?Chairperson)(?:[ \t]*\([^)\n]*\))?[ \t]*:",
            )
            .context("failed to compile presiding officer introduction regex")?,
            names: NameNormalizer::new()?,
            validator: Box::new(AcceptAllNames),
        })
    }

    #[allow(dead_code)]
    pub fn with_name_validator(mut self, validator: Box<dyn NameValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// All introductions in `text`, ordered by start offset. Member patterns
    /// are scanned first; a later pattern starting at an already-seen offset
    /// is dropped.
    pub fn detect_introductions(&self, text: &str) -> Vec<SpeakerIntroduction> {
        let mut seen_starts = HashSet::<usize>::new();
        let mut introductions = Vec::<SpeakerIntroduction>::new();

        let patterns = [
            (IntroductionKind::Member, &self.member_intro),
            (IntroductionKind::PresidingOfficer, &self.presiding_intro),
        ];

        for (kind, regex) in patterns {
            for captures in regex.captures_iter(text) {
                let (Some(name), Some(whole)) = (captures.name("name"), captures.get(0)) else {
                    continue;
                };
                if !seen_starts.insert(name.start()) {
                    continue;
                }

                introductions.push(SpeakerIntroduction {
                    kind,
                    raw_name: name.as_str().to_string(),
                    start: name.start(),
                    end: whole.end(),
                });
            }
        }

        introductions.sort_by_key(|introduction| introduction.start);
        introductions
    }

    #[allow(dead_code)]
    pub fn segment_page(&self, text: &str, page_number: Option<u32>) -> Vec<Statement> {
        let introductions = self.detect_introductions(text);
        self.cut_statements(text, &introductions, page_number)
    }

    fn cut_statements(
        &self,
        text: &str,
        introductions: &[SpeakerIntroduction],
        page_number: Option<u32>,
    ) -> Vec<Statement> {
        if introductions.is_empty() {
            debug!(
                page = page_number.unwrap_or_default(),
                chars = text.len(),
                "page had no detectable speakers"
            );
            return Vec::new();
        }

        let mut statements = Vec::with_capacity(introductions.len());
        for (index, introduction) in introductions.iter().enumerate() {
            let span_end = introductions
                .get(index + 1)
                .map(|next| next.start)
                .unwrap_or(text.len());

            let body = text[introduction.end..span_end]
                .trim()
                .trim_start_matches(':')
                .trim();
            if body.is_empty() || body.chars().count() < self.config.min_statement_chars {
                continue;
            }

            let speaker_name = self.names.normalize(&introduction.raw_name);
            if speaker_name.is_empty() {
                continue;
            }

            let presiding = introduction.kind == IntroductionKind::PresidingOfficer
                || self.config.presiding_officers.contains(&speaker_name);
            if presiding && !self.config.include_presiding_officers {
                continue;
            }

            let confidence = if presiding || self.validator.is_person_name(&speaker_name) {
                FULL_CONFIDENCE
            } else {
                UNVERIFIED_NAME_CONFIDENCE
            };

            statements.push(Statement {
                speaker_name,
                text: body.to_string(),
                start_offset: introduction.start,
                end_offset: span_end,
                page_number,
                confidence,
            });
        }

        statements
    }

    /// Segments each page on its own and concatenates the results in page
    /// order. A statement never continues across a page boundary.
    pub fn segment_pages(&self, pages: &[PageText]) -> SegmentedDocument {
        let mut ordered = pages.iter().collect::<Vec<&PageText>>();
        ordered.sort_by_key(|page| page.page_number);

        let mut document = SegmentedDocument::default();
        for page in ordered {
            let introductions = self.detect_introductions(&page.text);
            if introductions.is_empty() {
                document.low_information_pages.push(page.page_number);
            }
            document.statements.extend(self.cut_statements(
                &page.text,
                &introductions,
                Some(page.page_number),
            ));
        }

        document
    }
}
