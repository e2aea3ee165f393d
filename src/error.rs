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

use std::{io, path::PathBuf};

use crate::files::text::ParseError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}: unknown entry")]
    UnknownEntry(String),
    #[error("{}: not found", .0.display())]
    NotFound(PathBuf),
    #[error("{0}: invalid option")]
    InvalidOption(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("{0}: unexpected entry kind")]
    WrongKind(String),
    #[error("{0}: entry cannot be parsed")]
    NotParsable(String),
    #[error("unsupported tracer type: {0}")]
    UnsupportedTracer(String),
    #[error("configuration: {0}")]
    Config(String),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex_lite::Error),
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Lookup failure in a directory: the name is not declared or its file is absent.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Error::UnknownEntry(_) | Error::NotFound(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
