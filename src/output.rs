//! Terminal output for one-shot searches

use crate::catalog::types::Record;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print records as aligned columns, highlighting matched tokens in names
pub fn print_records(records: &[Record], tokens: &[String], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    for record in records {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{:<9}", record.code)?;
        stdout.reset()?;
        write!(stdout, " ")?;

        print_name(&mut stdout, &record.name, tokens)?;
        let padding = name_width.saturating_sub(record.name.chars().count());
        write!(stdout, "{:padding$} ", "", padding = padding)?;

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, "{:<16}", record.strength)?;
        stdout.reset()?;
        writeln!(stdout, " {}", record.form)?;
    }

    Ok(())
}

/// Print a summary line after the results
pub fn print_summary(count: usize, duration_ms: f64, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);

    stderr.set_color(ColorSpec::new().set_dimmed(true))?;
    writeln!(
        stderr,
        "{} {} in {:.2} ms",
        count,
        if count == 1 { "match" } else { "matches" },
        duration_ms
    )?;
    stderr.reset()?;

    Ok(())
}

fn print_name(stdout: &mut StandardStream, name: &str, tokens: &[String]) -> io::Result<()> {
    let mut cursor = 0;

    for (start, end) in match_spans(name, tokens) {
        if start > cursor {
            write!(stdout, "{}", &name[cursor..start])?;
        }
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stdout, "{}", &name[start..end])?;
        stdout.reset()?;
        cursor = end;
    }

    if cursor < name.len() {
        write!(stdout, "{}", &name[cursor..])?;
    }

    Ok(())
}

/// Sorted, merged byte spans of `name` covered by any token
///
/// Matching uses ASCII lower-casing, which keeps byte offsets valid for the
/// original string; tokens that only match after Unicode case folding are
/// simply not highlighted.
fn match_spans(name: &str, tokens: &[String]) -> Vec<(usize, usize)> {
    let haystack = name.to_ascii_lowercase();
    let mut spans: Vec<(usize, usize)> = Vec::new();

    for token in tokens.iter().filter(|t| !t.is_empty()) {
        let mut from = 0;
        while let Some(offset) = haystack[from..].find(token.as_str()) {
            let start = from + offset;
            let end = start + token.len();
            spans.push((start, end));
            from = end;
        }
    }

    spans.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged
}
