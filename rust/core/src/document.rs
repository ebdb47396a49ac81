// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed IDF document
//!
//! A [`Document`] owns the original text and the records discovered in it.
//! It is never edited in place: rewrites produce a new text buffer that can
//! be parsed into a fresh document.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::kind::RecordKind;
use crate::parser::parse_records;
use crate::record::Record;
use crate::rules::GeometryRules;

/// A contiguous piece of the source text, in document order
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Text produced by a record
    Record(&'a Record),
    /// Lines between records (comments, blank lines, stray text)
    Gap(String),
}

impl Segment<'_> {
    pub fn text(&self) -> &str {
        match self {
            Segment::Record(record) => &record.raw_text,
            Segment::Gap(text) => text,
        }
    }
}

/// IDF text plus its ordered records
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    records: Vec<Record>,
}

impl Document {
    /// Tokenize a document held in memory
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let records = parse_records(&text);
        Self { text, records }
    }

    /// Read and tokenize a file. Invalid UTF-8 is replaced, not rejected.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "Read IDF file");
        Ok(Self::parse(text))
    }

    /// Original text
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source lines, each with its line ending
    pub fn lines(&self) -> Vec<&str> {
        self.text.split_inclusive('\n').collect()
    }

    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records and the gaps between them, covering the whole text
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let lines = self.lines();
        let mut segments = Vec::with_capacity(self.records.len() * 2 + 1);
        let mut next = 0;

        for record in &self.records {
            let range = record.span.line_range();
            if range.start > next {
                segments.push(Segment::Gap(lines[next..range.start].concat()));
            }
            segments.push(Segment::Record(record));
            next = range.end;
        }

        if next < lines.len() {
            segments.push(Segment::Gap(lines[next..].concat()));
        }

        segments
    }

    /// Concatenation of every segment; equals [`Document::text`]
    pub fn reconstruct(&self) -> String {
        self.segments().iter().map(Segment::text).collect()
    }

    /// Records of the given kind name (case-insensitive)
    pub fn records_of_kind<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.is_kind(kind))
    }

    /// Records of the given tagged kind
    pub fn records_by_kind(&self, kind: RecordKind) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.record_kind() == kind)
    }

    /// Records of a kind, optionally narrowed to one name (both case-insensitive)
    pub fn find(&self, kind: &str, name: Option<&str>) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.is_kind(kind) && name.map_or(true, |n| r.has_name(n)))
            .collect()
    }

    /// The single record of a kind with a given name
    pub fn get(&self, kind: &str, name: &str) -> Result<&Record> {
        self.records
            .iter()
            .find(|r| r.is_kind(kind) && r.has_name(name))
            .ok_or_else(|| Error::not_found(kind, name))
    }

    /// Number of records per kind, keyed by the kind as written
    pub fn count_by_kind(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for record in &self.records {
            *counts.entry(record.kind.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Records cut off by the end of input
    pub fn incomplete_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.well_formed)
    }

    /// `HVACTemplate:*` records, which need template expansion before simulation
    pub fn hvac_templates(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|r| r.kind_starts_with("HVACTemplate:"))
    }

    /// Declared vertex convention, if the document has one
    pub fn geometry_rules(&self) -> Option<Result<GeometryRules>> {
        self.records_by_kind(RecordKind::GlobalGeometryRules)
            .next()
            .map(GeometryRules::from_record)
    }

    /// Text with one more record appended after a blank line
    pub fn with_appended(&self, record_text: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + record_text.len() + 2);
        out.push_str(&self.text);
        if !out.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(record_text);
        out
    }
}
