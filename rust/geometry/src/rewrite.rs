// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Targeted vertex rewriting
//!
//! Replaces the vertex section of named surface records and copies every
//! other line of the document unchanged. Replacements are computed against
//! the original line buffer and spliced from the bottom of the file upward,
//! so a replacement that changes the line count never shifts a span that
//! is still waiting to be applied.

use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;

use idf_lite_core::{
    parse_number, strip_comment, Document, FormatOptions, LineEnding, Record, RecordKind,
    RecordWriter,
};
use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::surface::collect_vertices;

/// New vertex lists keyed by surface name (case-insensitive)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceEdits {
    edits: FxHashMap<String, Vec<Point3<f64>>>,
}

impl SurfaceEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertices for a surface, replacing any earlier edit
    pub fn insert(&mut self, name: &str, vertices: Vec<Point3<f64>>) {
        self.edits.insert(name.trim().to_ascii_lowercase(), vertices);
    }

    pub fn get(&self, name: &str) -> Option<&[Point3<f64>]> {
        self.edits
            .get(&name.trim().to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Case-folded names with their new vertices, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Point3<f64>])> {
        self.edits.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Add every edit of `other`; later edits win on name collisions
    pub fn merge(&mut self, other: SurfaceEdits) {
        self.edits.extend(other.edits);
    }
}

impl<S: AsRef<str>> FromIterator<(S, Vec<Point3<f64>>)> for SurfaceEdits {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Point3<f64>>)>>(iter: I) -> Self {
        let mut edits = SurfaceEdits::new();
        for (name, vertices) in iter {
            edits.insert(name.as_ref(), vertices);
        }
        edits
    }
}

/// Text that replaces a half-open range of 0-based source lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub lines: Range<usize>,
    pub text: String,
}

/// Splice replacements into the original lines, bottom-up.
///
/// Replacements may be given in any order. One that overlaps an
/// already-applied span or runs past the buffer is skipped with a warning.
pub fn apply_replacements(lines: &[&str], mut replacements: Vec<Replacement>) -> String {
    replacements.sort_by(|a, b| b.lines.start.cmp(&a.lines.start));

    let mut buffer: Vec<Cow<'_, str>> = lines.iter().map(|l| Cow::Borrowed(*l)).collect();
    let mut limit = lines.len();

    for replacement in replacements {
        let Range { start, end } = replacement.lines;
        if start > end || end > limit {
            tracing::warn!(start, end, limit, "Skipping overlapping or out-of-range replacement");
            continue;
        }
        buffer.splice(start..end, std::iter::once(Cow::Owned(replacement.text)));
        limit = start;
    }

    buffer.concat()
}

/// Output of [`rewrite`]
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub text: String,
    /// Number of records whose vertices were replaced
    pub modified: usize,
    /// Rewritten records whose new vertex count differs from the declared
    /// or parsed one, or whose unparsed trailing fields were dropped.
    /// `Number of Vertices` is left as it was in these records.
    pub resized: Vec<String>,
}

impl Rewrite {
    /// Parse the rewritten text into a fresh document
    pub fn into_document(self) -> Document {
        Document::parse(self.text)
    }
}

/// Number of leading raw lines that hold exactly the kind and header fields.
///
/// `None` when the header shares a line with vertex data or the terminator,
/// in which case the header has to be regenerated.
fn header_line_count(raw_lines: &[&str], vertex_start: usize) -> Option<usize> {
    let target = vertex_start + 1;
    let mut delimiters = 0;

    for (i, line) in raw_lines.iter().enumerate() {
        let code = strip_comment(line);
        delimiters += code.bytes().filter(|b| *b == b',' || *b == b';').count();
        if delimiters == target {
            return if code.contains(';') { None } else { Some(i + 1) };
        }
        if delimiters > target {
            return None;
        }
    }
    None
}

/// Replacement text for one surface record
fn replacement_text(
    record: &Record,
    kind: RecordKind,
    vertices: &[Point3<f64>],
    options: &FormatOptions,
) -> String {
    let options = FormatOptions {
        line_ending: LineEnding::detect(&record.raw_text),
        ..options.clone()
    };
    let vertex_start = kind.vertex_start().unwrap_or(0);
    let raw_lines: Vec<&str> = record.raw_text.split_inclusive('\n').collect();

    let kept = if vertices.is_empty() {
        None
    } else {
        header_line_count(&raw_lines, vertex_start)
    };

    let mut text = match kept {
        Some(count) => {
            let mut writer = RecordWriter::new(&record.kind, &options);
            for (i, v) in vertices.iter().enumerate() {
                writer = writer.vertex(i + 1, v.x, v.y, v.z);
            }
            let mut text = raw_lines[..count].concat();
            text.push_str(&writer.body());
            text
        }
        None => {
            let mut writer = RecordWriter::new(&record.kind, &options);
            for (i, label) in kind.header_labels().iter().enumerate() {
                writer = writer.field(record.field(i), *label);
            }
            for (i, v) in vertices.iter().enumerate() {
                writer = writer.vertex(i + 1, v.x, v.y, v.z);
            }
            writer.finish()
        }
    };

    if !record.raw_text.ends_with('\n') {
        let trimmed = text.trim_end_matches(['\r', '\n']).len();
        text.truncate(trimmed);
    }
    text
}

/// Replace the vertices of every surface named in `edits`.
///
/// Only `BuildingSurface:Detailed` and `FenestrationSurface:Detailed`
/// records are touched. Names in `edits` that match nothing are ignored.
pub fn rewrite(document: &Document, edits: &SurfaceEdits, options: &FormatOptions) -> Rewrite {
    let mut replacements = Vec::new();
    let mut resized = Vec::new();

    for record in document.records() {
        let kind = record.record_kind();
        let Some(vertex_start) = kind.vertex_start() else {
            continue;
        };
        if record.fields.is_empty() {
            continue;
        }
        let Some(vertices) = edits.get(record.name()) else {
            continue;
        };

        let existing = collect_vertices(&record.fields, vertex_start);
        let declared = parse_number(record.field(vertex_start - 1));
        let declared_differs = declared.is_some_and(|n| n != vertices.len() as f64);
        let count_differs = existing.vertices.len() != vertices.len();
        if count_differs || !existing.is_complete() || declared_differs {
            tracing::warn!(
                surface = record.name(),
                declared = ?declared,
                parsed = existing.vertices.len(),
                unconsumed = existing.unconsumed,
                written = vertices.len(),
                "Vertex count changes; Number of Vertices is left as written"
            );
            resized.push(record.name().to_string());
        }

        let text = replacement_text(record, kind, vertices, options);
        tracing::debug!(
            surface = record.name(),
            start_line = record.span.start_line,
            end_line = record.span.end_line,
            vertices = vertices.len(),
            "Replacing surface vertices"
        );
        replacements.push(Replacement {
            lines: record.span.line_range(),
            text,
        });
    }

    let modified = replacements.len();
    let text = apply_replacements(&document.lines(), replacements);
    tracing::info!(modified, requested = edits.len(), "Rewrote surface vertices");

    Rewrite {
        text,
        modified,
        resized,
    }
}

/// Read `src`, rewrite it and write the result to `dst`
pub fn rewrite_file(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    edits: &SurfaceEdits,
    options: &FormatOptions,
) -> Result<Rewrite> {
    let document = Document::read(src)?;
    let result = rewrite(&document, edits, options);
    std::fs::write(dst.as_ref(), &result.text).map_err(idf_lite_core::Error::from)?;
    Ok(result)
}
