use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DEFAULT_BILL_TYPES: &[&str] = &[
    "Finance",
    "Appropriation",
    "Supplementary",
    "Health",
    "Education",
    "Security",
    "Agriculture",
    "Energy",
    "Housing",
    "Land",
    "Water",
    "Tax",
    "Taxation",
    "Revenue",
    "Budget",
    "Insurance",
    "Banking",
    "Employment",
    "Labour",
    "Pensions",
    "Roads",
    "Transport",
    "Environment",
    "Climate",
    "Mining",
    "Fisheries",
    "Tourism",
    "Trade",
    "Communications",
    "Information",
    "Data",
    "Cybersecurity",
    "Elections",
    "Electoral",
    "County",
    "Counties",
    "Constitution",
    "Police",
    "Defence",
    "Immigration",
    "Citizenship",
    "Children",
    "Gender",
    "Youth",
    "Sports",
    "Culture",
    "Procurement",
    "Cooperatives",
    "Livestock",
    "Irrigation",
    "Forests",
    "Wildlife",
    "Statute",
    "Miscellaneous",
];

const DEFAULT_PRESIDING_OFFICERS: &[&str] = &[
    "The Speaker",
    "The Deputy Speaker",
    "Mr. Speaker",
    "Madam Speaker",
    "The Chairperson",
    "The Temporary Speaker",
    "The Temporary Chairperson",
];

/// Month names keyed for lookup, with the lists the date patterns are built from.
#[derive(Debug, Clone)]
pub struct MonthTable {
    full_names: Vec<String>,
    abbreviations: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl MonthTable {
    /// `full_names` must hold twelve entries in calendar order. Abbreviations
    /// are paired with the month number they stand for.
    #[allow(dead_code)]
    pub fn new(full_names: &[&str], abbreviations: &[(&str, u32)]) -> Result<Self> {
        if full_names.len() != 12 {
            bail!("month table needs 12 full names, got {}", full_names.len());
        }

        for (abbreviation, month) in abbreviations {
            if !(1..=12).contains(month) {
                bail!("abbreviation '{abbreviation}' maps to invalid month {month}");
            }
        }

        Ok(Self::build(full_names, abbreviations))
    }

    pub fn english() -> Self {
        let mut abbreviations = ENGLISH_MONTHS
            .iter()
            .enumerate()
            .map(|(index, name)| (&name[..3], (index + 1) as u32))
            .collect::<Vec<(&str, u32)>>();
        abbreviations.push(("Sept", 9));

        Self::build(&ENGLISH_MONTHS, &abbreviations)
    }

    fn build(full_names: &[&str], abbreviations: &[(&str, u32)]) -> Self {
        let mut lookup = HashMap::new();
        for (index, name) in full_names.iter().enumerate() {
            lookup.insert(name.to_lowercase(), (index + 1) as u32);
        }
        for (abbreviation, month) in abbreviations {
            lookup.insert(abbreviation.to_lowercase(), *month);
        }

        Self {
            full_names: full_names.iter().map(|name| name.to_string()).collect(),
            abbreviations: abbreviations
                .iter()
                .map(|(abbreviation, _)| abbreviation.to_string())
                .collect(),
            lookup,
        }
    }

    pub fn month_number(&self, name: &str) -> Option<u32> {
        self.lookup.get(&name.trim().to_lowercase()).copied()
    }

    pub fn month_name(&self, month: u32) -> Option<&str> {
        let index = month.checked_sub(1)? as usize;
        self.full_names.get(index).map(String::as_str)
    }

    /// Regex alternation over the full names. Longest entries come first so a
    /// name never loses to one of its own prefixes.
    pub(crate) fn full_name_alternation(&self) -> String {
        alternation(&self.full_names)
    }

    pub(crate) fn abbreviation_alternation(&self) -> String {
        alternation(&self.abbreviations)
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::english()
    }
}

fn alternation(values: &[String]) -> String {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted
        .iter()
        .map(|value| regex::escape(value))
        .collect::<Vec<String>>()
        .join("|")
}

/// Closed set of subject words accepted as `<Type>` in named bill citations.
#[derive(Debug, Clone)]
pub struct BillVocabulary {
    canonical: HashMap<String, String>,
}

impl BillVocabulary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_string())
            .filter(|word| !word.is_empty())
            .map(|word| (word.to_lowercase(), word))
            .collect();
        Self { canonical }
    }

    /// Loads a JSON array of words, e.g. `["Finance", "Health"]`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let words: Vec<String> = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let vocabulary = Self::new(words);
        if vocabulary.is_empty() {
            bail!("bill vocabulary is empty: {}", path.display());
        }
        Ok(vocabulary)
    }

    /// Returns the vocabulary's spelling of `word`, if it is a known type.
    pub fn canonical(&self, word: &str) -> Option<&str> {
        self.canonical
            .get(&word.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

impl Default for BillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_BILL_TYPES)
    }
}

/// Presiding-officer roles that are not attributed as Members.
#[derive(Debug, Clone)]
pub struct PresidingOfficers {
    roles: Vec<String>,
}

impl PresidingOfficers {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            roles: roles
                .into_iter()
                .map(|role| role.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, speaker_name: &str) -> bool {
        let candidate = speaker_name.trim().to_lowercase();
        self.roles.iter().any(|role| *role == candidate)
    }
}

impl Default for PresidingOfficers {
    fn default() -> Self {
        Self::new(DEFAULT_PRESIDING_OFFICERS)
    }
}
