// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IDF-Lite Core Parser
//!
//! Lossless, schema-free tokenizer for IDF building-description files.
//!
//! ## Overview
//!
//! This crate provides the text layer of IDF-Lite:
//!
//! - **Record Tokenization**: Line-oriented scanning with comment stripping
//!   via [memchr](https://docs.rs/memchr)
//! - **Lossless Round Trip**: Records and the gaps between them reproduce the
//!   input byte-for-byte
//! - **Record Writing**: Conventional one-field-per-line layout with `!-` labels
//! - **Lint and Summary**: Cross-reference checks that need no data dictionary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idf_lite_core::{Document, RecordKind};
//!
//! let doc = Document::parse("Version,23.2;\nZone,\n    Office;  !- Name\n");
//!
//! for record in doc.records() {
//!     println!("{} at line {}: {:?}", record.kind, record.span.start_line, record.fields);
//! }
//!
//! assert_eq!(doc.records_by_kind(RecordKind::Zone).count(), 1);
//! assert_eq!(doc.reconstruct(), doc.text());
//! ```
//!
//! ## Lazy Scanning
//!
//! ```rust,ignore
//! use idf_lite_core::RecordScanner;
//!
//! let mut scanner = RecordScanner::new(content);
//! while let Some(record) = scanner.next_record() {
//!     if !record.well_formed {
//!         eprintln!("unterminated {} at line {}", record.kind, record.span.start_line);
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for records, summaries and reports

pub mod document;
pub mod error;
pub mod fast_parse;
pub mod kind;
pub mod lint;
pub mod parser;
pub mod record;
pub mod rules;
pub mod summary;
pub mod writer;

pub use document::{Document, Segment};
pub use error::{Error, Result};
pub use fast_parse::{parse_number, parse_triple};
pub use kind::{RecordKind, BUILDING_SURFACE_FIELDS, FENESTRATION_FIELDS};
pub use lint::{validate, IdfVersion, Issue, LintConfig, ValidationReport};
pub use parser::{parse_records, split_fields, strip_comment, RecordScanner};
pub use record::{Record, SourceSpan};
pub use rules::{CoordinateSystem, GeometryRules, StartingVertex, VertexEntryDirection};
pub use summary::DocumentSummary;
pub use writer::{
    check_field_value, format_number, is_plain_value, output_variable, FormatOptions, LineEnding,
    RecordWriter, ReportingFrequency,
};
