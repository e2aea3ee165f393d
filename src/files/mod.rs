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

//! Read, parse and write files under /proc and /sys.
//!
//! - [`text`]: generic line and word parsers.
//! - [`types`]: option, value and toggle files, mostly found in /sys.
//! - [`proc`]: parsers for /proc files and directory layouts.
//! - [`sys`]: directory layouts under /sys.

use std::{fmt, path::Path};

use crate::{
    error::{Error, Result},
    fs::{Entity, File},
};

pub mod proc;
pub mod sys;
pub mod text;
pub mod types;

mod value;

pub use self::value::{Value, ValueMap};
use self::text::ParseError;

/// Pure conversion of the content of a file into a value.
///
/// Implementations must not perform I/O.
pub trait ContentParser: fmt::Debug {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError>;
}

impl<P: ContentParser + ?Sized> ContentParser for Box<P> {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        (**self).parse_content(content)
    }
}

impl<P: ContentParser + ?Sized> ContentParser for &P {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        (**self).parse_content(content)
    }
}

/// Parser referenced from a static directory table.
pub type StaticParser = &'static (dyn ContentParser + Sync);

/// An entity that can be parsed.
pub trait Parse: Entity {
    /// Return the parsed value or None if the entity doesn't exist.
    fn parse(&self) -> Result<Option<Value>>;
}

/// A file whose content is read and parsed on each call.
#[derive(Debug)]
pub struct ParsedFile<P = Box<dyn ContentParser>> {
    file: File,
    parser: P,
}

impl<P: ContentParser> ParsedFile<P> {
    pub fn new<Q: AsRef<Path>>(path: Q, parser: P) -> Self {
        Self {
            file: File::new(path),
            parser,
        }
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn read(&self) -> Result<String> {
        self.file.read()
    }

    pub fn write(&self, content: &str) -> Result<()> {
        self.file.write(content)
    }

    /// Parse the content, failing if the file doesn't exist.
    pub(crate) fn parse_existing(&self) -> Result<Value> {
        let content = self.file.read()?;
        self.parser
            .parse_content(&content)
            .map_err(|source| Error::Parse {
                path: self.path().to_path_buf(),
                source,
            })
    }
}

impl<P> Entity for ParsedFile<P> {
    fn path(&self) -> &Path {
        self.file.path()
    }
}

impl<P: ContentParser> Parse for ParsedFile<P> {
    fn parse(&self) -> Result<Option<Value>> {
        if !self.exists() {
            return Ok(None);
        }
        self.parse_existing().map(Some)
    }
}
