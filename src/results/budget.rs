//! Token-budget limiting
//!
//! "Tokens" are approximated by the length of an item's JSON text in the
//! conventional `json.dumps` form: `", "` and `": "` separators, with every
//! non-ASCII character escaped as `\uXXXX` (one escape per UTF-16 unit).
//! No tokenizer is involved.

use super::types::{CleanResult, RawResult};
use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;
use std::io;

/// Formatter emitting spaced separators and ASCII-only strings
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    writer.write_all(format!("\\u{:04x}", unit).as_bytes())?;
                }
            }
        }
        Ok(())
    }
}

/// Length of an item's JSON text in the measured form.
///
/// Items that fail to serialize count as unbounded so they never fit a budget.
pub fn serialized_len<T: Serialize>(item: &T) -> usize {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    match item.serialize(&mut ser) {
        Ok(()) => buf.len(),
        Err(_) => usize::MAX,
    }
}

/// A result as it is measured: a missing score counts as the integer `0`
#[derive(Serialize)]
struct MeasuredResult<'a> {
    title: &'a str,
    url: &'a str,
    content: &'a str,
    #[serde(serialize_with = "score_or_zero")]
    score: Option<f64>,
}

fn score_or_zero<S: Serializer>(score: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match score {
        Some(score) => serializer.serialize_f64(*score),
        None => serializer.serialize_u8(0),
    }
}

/// Budget cost of one raw result's `{title, url, content, score}` projection
pub fn result_len(raw: &RawResult) -> usize {
    serialized_len(&MeasuredResult {
        title: &raw.title,
        url: &raw.url,
        content: &raw.content,
        score: raw.score,
    })
}

/// Keep the longest prefix of `items` whose summed `measure` fits `budget`.
///
/// Stops at the first item that would push the running total past the
/// budget; later items are dropped even if they are smaller.
pub fn take_within_budget_by<T, I, F>(items: I, budget: usize, measure: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> usize,
{
    let mut used = 0usize;
    let mut kept = Vec::new();

    for item in items {
        let size = measure(&item);
        if used.saturating_add(size) > budget {
            break;
        }
        used += size;
        kept.push(item);
    }

    kept
}

/// [`take_within_budget_by`] measuring each item with [`serialized_len`]
pub fn take_within_budget<T, I>(items: I, budget: usize) -> Vec<T>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    take_within_budget_by(items, budget, |item| serialized_len(item))
}

/// Keep the prefix of raw results that fits the budget, projected for output
pub fn limit_to_token_budget(results: &[RawResult], budget: usize) -> Vec<CleanResult> {
    take_within_budget_by(results.iter(), budget, |raw| result_len(raw))
        .into_iter()
        .map(CleanResult::from)
        .collect()
}
