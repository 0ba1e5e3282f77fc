use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::cli::DateArgs;
use crate::transcript::{DateNormalizer, DateShape};
use crate::util::emit_json;

#[derive(Debug, Serialize)]
struct DateResult<'a> {
    input: &'a str,
    date: Option<String>,
    shape: Option<DateShape>,
    long_form: Option<String>,
}

pub fn run(args: DateArgs) -> Result<()> {
    let dates = DateNormalizer::new()?;

    let results = args
        .inputs
        .iter()
        .map(|input| {
            let found = dates.find(input);
            if found.is_none() {
                warn!(input = %input, "no date found");
            }
            // Only real calendar dates get a long form.
            let long_form = dates.parse_naive(input).map(|date| dates.long_form(date));
            DateResult {
                input,
                date: found.as_ref().map(|value| value.canonical.clone()),
                shape: found.map(|value| value.shape),
                long_form,
            }
        })
        .collect::<Vec<DateResult<'_>>>();

    if args.json {
        return emit_json(None, &results);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    for result in &results {
        writeln!(
            output,
            "{}\t{}\t{}",
            result.date.as_deref().unwrap_or("-"),
            result.long_form.as_deref().unwrap_or("-"),
            result.input
        )
        .context("failed to write date output")?;
    }
    output.flush()?;

    Ok(())
}
