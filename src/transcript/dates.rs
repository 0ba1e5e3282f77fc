use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use serde::Serialize;

use super::vocabulary::MonthTable;

const DAY_NAMES: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const ORDINAL: &str = "(?:st|nd|rd|th)?";
// Spaces in titles, hyphens and underscores in URL fragments and file names.
const SEP: &str = r"[\s_\-]+";
// Letters and `_` may touch a date (`sitting_2025-12-04T10:00`); only digits
// may not. Guard characters sit outside the `date` group.
const NON_DIGIT: &str = "[^0-9]";
const END: &str = "(?:[^0-9]|$)";

/// Date shapes in priority order. The first shape with any valid match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateShape {
    DayMonthNameYear,
    IsoNumeric,
    DayFirstNumeric,
    MonthNameDayYear,
    DayAbbreviatedMonthYear,
}

impl DateShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DayMonthNameYear => "day_month_name_year",
            Self::IsoNumeric => "iso_numeric",
            Self::DayFirstNumeric => "day_first_numeric",
            Self::MonthNameDayYear => "month_name_day_year",
            Self::DayAbbreviatedMonthYear => "day_abbreviated_month_year",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateMatch {
    pub canonical: String,
    pub shape: DateShape,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug)]
struct DatePattern {
    shape: DateShape,
    regex: Regex,
}

#[derive(Debug)]
pub struct DateNormalizer {
    months: MonthTable,
    patterns: Vec<DatePattern>,
}

impl DateNormalizer {
    pub fn new() -> Result<Self> {
        Self::with_months(MonthTable::english())
    }

    pub fn with_months(months: MonthTable) -> Result<Self> {
        let full = months.full_name_alternation();
        let abbreviated = months.abbreviation_alternation();

        let mut sources = vec![
            (
                DateShape::DayMonthNameYear,
                format!(
                    r"(?i)(?:^|{NON_DIGIT})(?P<date>(?:(?:{DAY_NAMES}),?{SEP})?(?P<day>\d{{1,2}}){ORDINAL}{SEP}(?P<month>{full}),?{SEP}(?P<year>\d{{4}})){END}"
                ),
            ),
            (
                DateShape::IsoNumeric,
                format!(
                    r"(?:^|{NON_DIGIT})(?P<date>(?P<year>\d{{4}})-(?P<month>\d{{1,2}})-(?P<day>\d{{1,2}})){END}"
                ),
            ),
            (
                DateShape::DayFirstNumeric,
                format!(
                    r"(?:^|{NON_DIGIT})(?P<date>(?P<day>\d{{1,2}})(?:/(?P<month>\d{{1,2}})/|\.(?P<month_dot>\d{{1,2}})\.)(?P<year>\d{{4}})){END}"
                ),
            ),
            (
                DateShape::MonthNameDayYear,
                format!(
                    r"(?i)(?:^|[^a-z])(?P<date>(?P<month>{full}){SEP}(?P<day>\d{{1,2}}){ORDINAL},?{SEP}(?P<year>\d{{4}})){END}"
                ),
            ),
        ];
        if !abbreviated.is_empty() {
            sources.push((
                DateShape::DayAbbreviatedMonthYear,
                format!(
                    r"(?i)(?:^|{NON_DIGIT})(?P<date>(?P<day>\d{{1,2}}){ORDINAL}{SEP}(?P<month>{abbreviated})\.?,?{SEP}(?P<year>\d{{4}})){END}"
                ),
            ));
        }

        let mut patterns = Vec::with_capacity(sources.len());
        for (shape, source) in sources {
            let regex = Regex::new(&source)
                .with_context(|| format!("failed to compile {} date regex", shape.as_str()))?;
            patterns.push(DatePattern { shape, regex });
        }

        Ok(Self { months, patterns })
    }

    /// Canonical `YYYY-MM-DD` for the first recognized date in `input`.
    pub fn parse(&self, input: &str) -> Option<String> {
        self.find(input).map(|found| found.canonical)
    }

    /// Like [`parse`](Self::parse), but only for dates that exist on the calendar.
    pub fn parse_naive(&self, input: &str) -> Option<NaiveDate> {
        let canonical = self.parse(input)?;
        NaiveDate::parse_from_str(&canonical, "%Y-%m-%d").ok()
    }

    pub fn find(&self, input: &str) -> Option<DateMatch> {
        if input.trim().is_empty() {
            return None;
        }

        for pattern in &self.patterns {
            let mut at = 0;
            while let Some(captures) = pattern.regex.captures_at(input, at) {
                let Some(date) = captures.name("date") else {
                    break;
                };
                if let Some(canonical) = self.canonicalize(&captures) {
                    return Some(DateMatch {
                        canonical,
                        shape: pattern.shape,
                        start: date.start(),
                        end: date.end(),
                    });
                }
                // Resume at the trailing guard so it can lead the next candidate.
                at = date.end();
            }
        }

        None
    }

    fn canonicalize(&self, captures: &Captures<'_>) -> Option<String> {
        let year = captures.name("year")?.as_str();
        let day = captures.name("day")?.as_str().parse::<u32>().ok()?;
        let month_raw = captures
            .name("month")
            .or_else(|| captures.name("month_dot"))?
            .as_str();
        let month = match month_raw.parse::<u32>() {
            Ok(value) => value,
            Err(_) => self.months.month_number(month_raw)?,
        };

        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return None;
        }

        Some(format!("{year}-{month:02}-{day:02}"))
    }

    /// Renders `date` the way Hansard titles do, e.g. `Thursday, 4th December 2025`.
    pub fn long_form(&self, date: NaiveDate) -> String {
        let month = self
            .months
            .month_name(date.month())
            .map(str::to_string)
            .unwrap_or_else(|| date.format("%B").to_string());
        format!(
            "{}, {}{} {} {}",
            date.format("%A"),
            date.day(),
            ordinal_suffix(date.day()),
            month,
            date.year()
        )
    }
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
