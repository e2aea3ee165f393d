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

//! Filesystem entities.
//!
//! Predicates are never cached: files under /proc and /sys come and go, so
//! each call queries the filesystem again.

use std::{
    ffi::CString,
    fs,
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Check access to a path with access(2).
fn access(path: &Path, mode: libc::c_int) -> bool {
    match CString::new(path.as_os_str().as_bytes()) {
        // SAFETY: cpath is a NUL-terminated string that outlives the call.
        Ok(cpath) => unsafe { libc::access(cpath.as_ptr(), mode) == 0 },
        Err(_) => false,
    }
}

/// Absolute version of a path, the path itself if it cannot be resolved.
pub(crate) fn absolute<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Something located at a filesystem path.
pub trait Entity {
    fn path(&self) -> &Path;

    /// Base name of the path.
    fn name(&self) -> &str {
        self.path()
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }

    fn readable(&self) -> bool {
        access(self.path(), libc::R_OK)
    }

    fn writable(&self) -> bool {
        access(self.path(), libc::W_OK)
    }
}

/// A plain path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathEntry {
    path: PathBuf,
}

impl PathEntry {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: absolute(path),
        }
    }
}

impl Entity for PathEntry {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// A file read or written as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: absolute(path),
        }
    }

    /// Return the file content.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|err| Error::io(&self.path, err))
    }

    /// Replace the file content.
    ///
    /// For kernel files, the content is usually a command.
    pub fn write(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content).map_err(|err| Error::io(&self.path, err))
    }
}

impl Entity for File {
    fn path(&self) -> &Path {
        &self.path
    }
}
