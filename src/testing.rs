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

// Fixtures for tests working on a fake /proc tree.

use libc::pid_t;
use simplelog::{Config, LevelFilter, TestLogger};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

pub(crate) fn temp_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Permission checks always succeed for root.
pub(crate) fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

pub(crate) fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// Write a file, creating the parent directories.
pub(crate) fn write_file<P: AsRef<Path>>(path: P, content: &str) -> PathBuf {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

/// A temporary directory standing for /proc.
pub(crate) struct ProcTree {
    dir: TempDir,
}

impl ProcTree {
    pub(crate) fn new() -> Self {
        Self { dir: temp_dir() }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create the directory of a process.
    pub(crate) fn process_dir(&self, pid: pid_t) -> PathBuf {
        let path = self.root().join(pid.to_string());
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Create a file in the directory of a process.
    pub(crate) fn process_file(&self, pid: pid_t, name: &str, content: &str) -> PathBuf {
        write_file(self.process_dir(pid).join(name), content)
    }

    /// Create a subdirectory in the directory of a process.
    pub(crate) fn process_subdir(&self, pid: pid_t, name: &str) -> PathBuf {
        let path = self.process_dir(pid).join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }
}
