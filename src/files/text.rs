// LxStats -- structured access to /proc and /sys for Linux
// Copyright (C) 2026  Laurent Pelecq
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Generic parsers for text files.
//!
//! [`LineSplitter`] splits the first line of a file into tokens and
//! optionally maps them to named and typed fields:
//!
//! ```
//! use lxstats::files::{ContentParser, Value, text::{Field, LineSplitter, Separator}};
//!
//! const FIELDS: &[Field] = &[Field::str("one"), Field::int("two"), Field::float("three")];
//! let splitter = LineSplitter::with_static_fields(Separator::Literal(' '), FIELDS);
//! let value = splitter.parse_content("foo 1 30.3").unwrap();
//! let map = value.as_map().unwrap();
//! assert_eq!(Some(&Value::Int(1)), map.get("two"));
//! ```

use std::borrow::Cow;

use super::{ContentParser, Value, ValueMap};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{token:?}: invalid {kind} value")]
    InvalidValue { kind: Conversion, token: String },
    #[error("syntax error: {0:?}")]
    Syntax(String),
}

impl ParseError {
    pub(crate) fn syntax<S: AsRef<str>>(line: S) -> Self {
        ParseError::Syntax(line.as_ref().to_string())
    }
}

/// Parse an integer, falling back to an unsigned value above `i64::MAX`.
pub(crate) fn parse_int(token: &str) -> Result<Value, ParseError> {
    let token = token.trim();
    token
        .parse::<i64>()
        .map(Value::Int)
        .or_else(|_| token.parse::<u64>().map(Value::UInt))
        .map_err(|_| ParseError::InvalidValue {
            kind: Conversion::Int,
            token: token.to_string(),
        })
}

pub(crate) fn parse_float(token: &str) -> Result<Value, ParseError> {
    let token = token.trim();
    token
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| ParseError::InvalidValue {
            kind: Conversion::Float,
            token: token.to_string(),
        })
}

/// Type of a field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Conversion {
    Str,
    Int,
    Float,
}

impl Conversion {
    pub fn convert(self, token: &str) -> Result<Value, ParseError> {
        match self {
            Conversion::Str => Ok(Value::Str(token.to_string())),
            Conversion::Int => parse_int(token),
            Conversion::Float => parse_float(token),
        }
    }
}

/// Positional field of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Named(&'static str, Conversion),
    /// The token at this position is ignored.
    Skip,
}

impl Field {
    pub const fn str(name: &'static str) -> Self {
        Field::Named(name, Conversion::Str)
    }

    pub const fn int(name: &'static str) -> Self {
        Field::Named(name, Conversion::Int)
    }

    pub const fn float(name: &'static str) -> Self {
        Field::Named(name, Conversion::Float)
    }
}

/// How a line is split into tokens.
#[derive(Clone, Copy, Debug)]
pub enum Separator {
    /// The line is not split.
    None,
    /// The character is stripped at both ends, then the line is split on it.
    Literal(char),
    /// Function called with the whole line.
    Custom(fn(&str) -> Vec<String>),
}

impl Default for Separator {
    fn default() -> Self {
        Separator::Literal(' ')
    }
}

/// Parser of the first line of a file.
#[derive(Clone, Debug, Default)]
pub struct LineSplitter {
    separator: Separator,
    fields: Option<Cow<'static, [Field]>>,
}

impl LineSplitter {
    pub const fn new(separator: Separator) -> Self {
        Self {
            separator,
            fields: None,
        }
    }

    pub const fn with_static_fields(separator: Separator, fields: &'static [Field]) -> Self {
        Self {
            separator,
            fields: Some(Cow::Borrowed(fields)),
        }
    }

    pub fn fields<F>(mut self, fields: F) -> Self
    where
        F: Into<Cow<'static, [Field]>>,
    {
        self.fields = Some(fields.into());
        self
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// Split a line into tokens.
    pub fn split(&self, line: &str) -> Vec<String> {
        if line.is_empty() {
            return Vec::new();
        }
        match self.separator {
            Separator::None => vec![line.to_string()],
            Separator::Literal(sep) => line
                .trim_matches(sep)
                .split(sep)
                .map(str::to_string)
                .collect(),
            Separator::Custom(split) => split(line),
        }
    }

    /// Map tokens to fields.
    ///
    /// The shortest of tokens and fields wins, remaining items are ignored.
    fn map_fields(fields: &[Field], tokens: &[String]) -> Result<ValueMap, ParseError> {
        fields
            .iter()
            .zip(tokens.iter())
            .filter_map(|(field, token)| match field {
                Field::Named(name, conversion) => Some(
                    conversion
                        .convert(token)
                        .map(|value| (name.to_string(), value)),
                ),
                Field::Skip => None,
            })
            .collect()
    }
}

impl ContentParser for LineSplitter {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        let line = content.split('\n').next().unwrap_or_default();
        if let Separator::None = self.separator {
            return Ok(Value::Str(line.trim().to_string()));
        }
        let tokens = self.split(line);
        match self.fields {
            Some(ref fields) => LineSplitter::map_fields(fields, &tokens).map(Value::Map),
            None => Ok(Value::from(tokens)),
        }
    }
}

/// Parser of a file with either one word per line or a single line of words.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordSplitter;

impl WordSplitter {
    pub fn words(content: &str) -> Vec<String> {
        let lines = content.lines().collect::<Vec<&str>>();
        match lines.as_slice() {
            [line] => line.split_whitespace().map(str::to_string).collect(),
            lines => lines.iter().map(|line| line.to_string()).collect(),
        }
    }
}

impl ContentParser for WordSplitter {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        Ok(Value::from(WordSplitter::words(content)))
    }
}
