use anyhow::{Context, Result};
use regex::Regex;

/// Optional check that a captured speaker name looks like a person's name.
///
/// Statements are never dropped on a failed check; the segmenter lowers the
/// statement confidence instead.
pub trait NameValidator: Send + Sync {
    fn is_person_name(&self, name: &str) -> bool;
}

/// Default validator: every name passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllNames;

impl NameValidator for AcceptAllNames {
    fn is_person_name(&self, _name: &str) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct NameNormalizer {
    parenthetical: Regex,
    honorific: Regex,
    mp_suffix: Regex,
}

impl NameNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parenthetical: Regex::new(r"\([^)]*\)?")
                .context("failed to compile parenthetical regex")?,
            honorific: Regex::new(r"(?i)^(?:hon\.?\s+)+")
                .context("failed to compile honorific regex")?,
            mp_suffix: Regex::new(r"(?i),\s*MP\.?$")
                .context("failed to compile MP suffix regex")?,
        })
    }

    /// `"  Hon. (Dr)  James   Opiyo   Wandayi  "` becomes `"James Opiyo Wandayi"`.
    pub fn normalize(&self, raw: &str) -> String {
        let collapsed = collapse_whitespace(raw);
        let without_parentheticals = self.parenthetical.replace_all(&collapsed, " ");
        let collapsed = collapse_whitespace(&without_parentheticals);
        let without_honorific = self.honorific.replace(&collapsed, "");
        let without_suffix = self.mp_suffix.replace(without_honorific.trim(), "");
        let trimmed = without_suffix.trim().trim_end_matches(',').trim();

        title_case(&collapse_whitespace(trimmed))
    }
}

pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Upper-cases a letter that follows a non-letter and lower-cases the rest,
/// so `o'NEIL-smith` becomes `O'Neil-Smith`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}
