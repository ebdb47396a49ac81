// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDF record tokenizer
//!
//! Line-oriented scanner that discovers record boundaries without any schema.
//! Comments (`!` to end of line) are stripped before looking for separators,
//! and a record may only start on a line with zero indentation.

use crate::record::{Record, SourceSpan};

/// Field separator
pub const SEPARATOR: u8 = b',';
/// Record terminator
pub const TERMINATOR: u8 = b';';
/// Comment marker
pub const COMMENT: u8 = b'!';

/// Code portion of a line: everything before the first `!`
#[inline]
pub fn strip_comment(line: &str) -> &str {
    match memchr::memchr(COMMENT, line.as_bytes()) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// True if the comment-stripped text holds a `;`
#[inline]
fn has_terminator(code: &str) -> bool {
    memchr::memchr(TERMINATOR, code.as_bytes()).is_some()
}

/// True if the comment-stripped text holds a `,` or `;`
#[inline]
fn has_delimiter(code: &str) -> bool {
    memchr::memchr2(SEPARATOR, TERMINATOR, code.as_bytes()).is_some()
}

/// Drop the line ending (`\n` or `\r\n`) from a line
#[inline]
fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split a record body into `(kind, fields)`.
///
/// Terminators act as separators, tokens are trimmed and trailing empty
/// tokens dropped. Returns `None` when nothing remains.
pub fn split_fields<'a, I>(lines: I) -> Option<(String, Vec<String>)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut content = String::new();
    for line in lines {
        content.push_str(strip_comment(trim_line_ending(line)));
        content.push('\n');
    }

    let mut parts: Vec<String> = content
        .split(|c: char| c == ',' || c == ';')
        .map(|part| part.trim().to_string())
        .collect();

    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    if parts.is_empty() {
        return None;
    }

    let kind = parts.remove(0);
    Some((kind, parts))
}

/// Streaming record scanner
///
/// Yields records in document order. Comment-only and blank lines between
/// records are skipped and never represented.
pub struct RecordScanner<'a> {
    lines: std::str::SplitInclusive<'a, char>,
    line_number: usize,
}

impl<'a> RecordScanner<'a> {
    /// Create a new scanner over the full document text
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.split_inclusive('\n'),
            line_number: 0,
        }
    }

    /// Scan for the next record
    pub fn next_record(&mut self) -> Option<Record> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('!') {
                continue;
            }

            // Only unindented lines may open a record
            if line.starts_with(' ') || line.starts_with('\t') {
                continue;
            }

            let code = strip_comment(trimmed).trim();
            if code.is_empty() || !has_delimiter(code) {
                continue;
            }

            let start = self.line_number;
            let mut buffered = vec![line];

            if has_terminator(code) {
                if let Some(record) = finalize(&buffered, start, start, true) {
                    return Some(record);
                }
                continue;
            }

            loop {
                match self.lines.next() {
                    Some(next) => {
                        self.line_number += 1;
                        buffered.push(next);
                        if has_terminator(strip_comment(next)) {
                            break;
                        }
                    }
                    None => {
                        tracing::warn!(
                            line = start,
                            "Unterminated record at end of input"
                        );
                        return finalize(&buffered, start, self.line_number, false);
                    }
                }
            }

            if let Some(record) = finalize(&buffered, start, self.line_number, true) {
                return Some(record);
            }
        }
    }
}

impl Iterator for RecordScanner<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.next_record()
    }
}

/// Build a record from its buffered lines
fn finalize(lines: &[&str], start: usize, end: usize, well_formed: bool) -> Option<Record> {
    let (kind, fields) = split_fields(lines.iter().copied())?;

    Some(Record {
        kind,
        fields,
        raw_text: lines.concat(),
        span: SourceSpan::new(start, end),
        well_formed,
    })
}

/// Parse a whole document into its ordered records
pub fn parse_records(content: &str) -> Vec<Record> {
    let records: Vec<Record> = RecordScanner::new(content).collect();
    tracing::debug!(
        records = records.len(),
        incomplete = records.iter().filter(|r| !r.well_formed).count(),
        "Tokenized IDF content"
    );
    records
}
