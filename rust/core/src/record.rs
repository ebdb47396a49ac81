// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed IDF records

use std::ops::Range;

use crate::kind::RecordKind;

/// Line span of a record in its source buffer
///
/// `start_line` is the 1-based first line. `end_line` is the 1-based last
/// line, which doubles as the 0-based exclusive end of the line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSpan {
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceSpan {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// 0-based half-open range of line indices covered by the record
    #[inline]
    pub fn line_range(&self) -> Range<usize> {
        self.start_line.saturating_sub(1)..self.end_line
    }

    /// Number of source lines covered
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_range().len()
    }
}

/// One object in an IDF document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Declared type, as written
    pub kind: String,
    /// Trimmed field values, excluding the kind token
    pub fields: Vec<String>,
    /// Exact source text of every line of the record
    pub raw_text: String,
    pub span: SourceSpan,
    /// False when input ended before the terminating `;`
    pub well_formed: bool,
}

impl Record {
    /// Tagged kind of this record
    #[inline]
    pub fn record_kind(&self) -> RecordKind {
        RecordKind::from_name(&self.kind)
    }

    /// Case-insensitive kind comparison
    #[inline]
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    /// Case-insensitive kind prefix test (`Material` matches `Material:NoMass`)
    #[inline]
    pub fn kind_starts_with(&self, prefix: &str) -> bool {
        let kind = self.kind.as_bytes();
        kind.len() >= prefix.len() && kind[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    }

    /// Field value by position, or `""` when the position is missing
    #[inline]
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// First field, conventionally the object name
    #[inline]
    pub fn name(&self) -> &str {
        self.field(0)
    }

    /// Case-insensitive name comparison
    #[inline]
    pub fn has_name(&self, name: &str) -> bool {
        !self.fields.is_empty() && self.name().eq_ignore_ascii_case(name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_range() {
        let span = SourceSpan::new(3, 7);
        assert_eq!(span.line_range(), 2..7);
        assert_eq!(span.line_count(), 5);

        let single = SourceSpan::new(1, 1);
        assert_eq!(single.line_range(), 0..1);
    }

    #[test]
    fn test_missing_field_is_empty() {
        let record = Record {
            kind: "Zone".to_string(),
            fields: vec!["Office".to_string()],
            raw_text: "Zone,Office;\n".to_string(),
            span: SourceSpan::new(1, 1),
            well_formed: true,
        };
        assert_eq!(record.name(), "Office");
        assert_eq!(record.field(5), "");
        assert!(record.has_name("OFFICE"));
        assert!(record.is_kind("ZONE"));
        assert_eq!(record.record_kind(), RecordKind::Zone);
    }
}
