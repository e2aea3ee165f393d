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

//! Kernel tracing.
//!
//! Each tracing instance is a directory under `instances` in the tracing
//! root. Creating the directory creates the instance.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::Settings,
    error::{Error, Result},
    fs::absolute,
};

mod tracer;
mod types;

pub use self::tracer::Tracer;
pub use self::types::{NopTracer, TracerType, TracerTypes};

const INSTANCES_DIR: &str = "instances";

/// Root of kernel tracing.
#[derive(Debug)]
pub struct Tracing<'a> {
    root: PathBuf,
    types: &'a TracerTypes,
}

impl Tracing<'static> {
    /// Tracing with the builtin tracer types.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Tracing::with_types(root, TracerTypes::builtin_ref())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Tracing::new(settings.tracing_root())
    }
}

impl<'a> Tracing<'a> {
    pub fn with_types<P: AsRef<Path>>(root: P, types: &'a TracerTypes) -> Self {
        Self {
            root: absolute(root),
            types,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn instance_path(&self, name: &str) -> PathBuf {
        self.root.join(INSTANCES_DIR).join(name)
    }

    /// Tracing instances in alphabetical order.
    pub fn tracers(&self) -> Result<Vec<Tracer<'a>>> {
        let instances = self.root.join(INSTANCES_DIR);
        let mut paths = Vec::new();
        for entry in fs::read_dir(&instances).map_err(|err| Error::io(&instances, err))? {
            let entry = entry.map_err(|err| Error::io(&instances, err))?;
            paths.push(entry.path());
        }
        paths.sort();
        Ok(paths
            .into_iter()
            .map(|path| Tracer::new(path, self.types))
            .collect())
    }

    /// Return the tracing instance with the given name, it's created if missing.
    pub fn tracer(&self, name: &str) -> Result<Tracer<'a>> {
        let path = self.instance_path(name);
        if !path.is_dir() {
            log::debug!("creating tracing instance {name}");
            fs::create_dir(&path).map_err(|err| Error::io(&path, err))?;
        }
        Ok(Tracer::new(path, self.types))
    }

    pub fn remove_tracer(&self, name: &str) -> Result<()> {
        let path = self.instance_path(name);
        fs::remove_dir(&path).map_err(|err| Error::io(path, err))
    }
}
