// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record text generation
//!
//! Produces records in the conventional IDF layout: the kind on its own
//! unindented line, then one indented field per line with an optional
//! `!- label` comment, the last field closed by `;`.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Line terminator written into generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Line ending used by a block of existing text (LF when it has none)
    pub fn detect(text: &str) -> Self {
        match memchr::memchr(b'\n', text.as_bytes()) {
            Some(pos) if pos > 0 && text.as_bytes()[pos - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }
}

/// Formatting options for generated records
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Maximum fractional digits for coordinates
    pub decimals: usize,
    /// Spaces before each field line
    pub indent: usize,
    /// Emit `!- label` comments after each field
    pub field_comments: bool,
    pub line_ending: LineEnding,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimals: 6,
            indent: 4,
            field_comments: true,
            line_ending: LineEnding::Lf,
        }
    }
}

/// Minimal decimal text for a number.
///
/// Integral values have no fractional part, others are rounded to
/// `decimals` digits with trailing zeros removed. Negative zero prints `0`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 {
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", value);
    }

    let text = format!("{:.*}", decimals, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };

    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Whether `value` can be written as a single field.
///
/// Separators, terminators, comment markers and line breaks would split or
/// truncate the record when it is read back.
#[inline]
pub fn is_plain_value(value: &str) -> bool {
    !value
        .bytes()
        .any(|b| matches!(b, b',' | b';' | b'!' | b'\n' | b'\r'))
}

/// [`is_plain_value`] as a `Result`, naming the offending field
pub fn check_field_value(what: &str, value: &str) -> Result<()> {
    if is_plain_value(value) {
        Ok(())
    } else {
        Err(Error::InvalidValue(format!(
            "{} '{}' contains a field delimiter or comment marker",
            what, value
        )))
    }
}

/// Builder for one record's text
pub struct RecordWriter<'a> {
    kind: String,
    fields: Vec<(String, String)>,
    options: &'a FormatOptions,
}

impl<'a> RecordWriter<'a> {
    pub fn new(kind: impl Into<String>, options: &'a FormatOptions) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
            options,
        }
    }

    /// Append a text field
    pub fn field(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.fields.push((value.into(), label.into()));
        self
    }

    /// Append a numeric field in minimal decimal text
    pub fn number(self, value: f64, label: impl Into<String>) -> Self {
        let text = format_number(value, self.options.decimals);
        self.field(text, label)
    }

    /// Append the X, Y and Z fields of one vertex (1-based index in labels)
    pub fn vertex(self, index: usize, x: f64, y: f64, z: f64) -> Self {
        self.number(x, format!("Vertex {} X-coordinate {{m}}", index))
            .number(y, format!("Vertex {} Y-coordinate {{m}}", index))
            .number(z, format!("Vertex {} Z-coordinate {{m}}", index))
    }

    /// Field lines only, without the kind line
    pub fn body(&self) -> String {
        let eol = self.options.line_ending.as_str();
        let indent = " ".repeat(self.options.indent);
        let last = self.fields.len().saturating_sub(1);

        let mut out = String::new();
        for (i, (value, label)) in self.fields.iter().enumerate() {
            let sep = if i == last { ';' } else { ',' };
            out.push_str(&indent);
            out.push_str(value);
            out.push(sep);
            if self.options.field_comments && !label.is_empty() {
                out.push_str("  !- ");
                out.push_str(label);
            }
            out.push_str(eol);
        }
        out
    }

    /// Complete record text, ending with a line terminator
    pub fn finish(&self) -> String {
        let eol = self.options.line_ending.as_str();
        if self.fields.is_empty() {
            return format!("{};{}", self.kind, eol);
        }
        format!("{},{}{}", self.kind, eol, self.body())
    }
}

/// Reporting frequency of an `Output:Variable`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportingFrequency {
    Timestep,
    #[default]
    Hourly,
    Daily,
    Monthly,
    RunPeriod,
    Environment,
    Annual,
}

impl ReportingFrequency {
    pub const ALL: [ReportingFrequency; 7] = [
        ReportingFrequency::Timestep,
        ReportingFrequency::Hourly,
        ReportingFrequency::Daily,
        ReportingFrequency::Monthly,
        ReportingFrequency::RunPeriod,
        ReportingFrequency::Environment,
        ReportingFrequency::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportingFrequency::Timestep => "Timestep",
            ReportingFrequency::Hourly => "Hourly",
            ReportingFrequency::Daily => "Daily",
            ReportingFrequency::Monthly => "Monthly",
            ReportingFrequency::RunPeriod => "RunPeriod",
            ReportingFrequency::Environment => "Environment",
            ReportingFrequency::Annual => "Annual",
        }
    }
}

impl FromStr for ReportingFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                Error::InvalidValue(format!(
                    "invalid frequency '{}', expected one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Text of an `Output:Variable` record
///
/// `key` defaults to `*` (all keys) when empty.
pub fn output_variable(
    key: &str,
    variable: &str,
    frequency: ReportingFrequency,
    options: &FormatOptions,
) -> Result<String> {
    if variable.trim().is_empty() {
        return Err(Error::InvalidValue("output variable name is empty".to_string()));
    }
    let key = if key.trim().is_empty() { "*" } else { key.trim() };
    check_field_value("key value", key)?;
    check_field_value("output variable name", variable)?;

    Ok(RecordWriter::new("Output:Variable", options)
        .field(key, "Key Value")
        .field(variable.trim(), "Variable Name")
        .field(frequency.as_str(), "Reporting Frequency")
        .finish())
}
