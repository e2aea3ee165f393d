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

use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::{debug, warn};
use std::path::Path;

use crate::{
    directory::Directory,
    files::{Value, ValueMap, proc::process_directory},
    fs::Entity,
};

const STAT_CMDLINE: &str = "cmdline";
const STAT_COMM: &str = "comm";

/// Source of collection timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Stats of a process or task directory as of the last collection.
#[derive(Debug)]
pub(crate) struct Snapshot {
    dir: Directory,
    stats: ValueMap,
    timestamp: Option<DateTime<Utc>>,
    clock: Clock,
}

impl Snapshot {
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            dir: process_directory(path),
            stats: ValueMap::new(),
            timestamp: None,
            clock: Utc::now,
        }
    }

    pub(crate) fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub(crate) fn dir(&self) -> &Directory {
        &self.dir
    }

    pub(crate) fn stats(&self) -> &ValueMap {
        &self.stats
    }

    pub(crate) fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Replace the stats by the current content of the directory.
    ///
    /// A directory that cannot be read leaves the stats empty. Entries that
    /// fail are skipped.
    pub(crate) fn collect(&mut self) {
        self.stats.clear();
        self.timestamp = None;
        if !self.dir.readable() {
            return;
        }
        self.timestamp = Some((self.clock)());
        for (name, entry) in self.dir.entries() {
            if !entry.readable() || !entry.is_parsable() {
                continue;
            }
            match entry.parse() {
                Ok(Some(Value::Map(map))) => {
                    self.stats.extend(
                        map.into_iter()
                            .map(|(key, value)| (format!("{name}.{key}"), value)),
                    );
                }
                Ok(Some(value)) => {
                    self.stats.insert(name.to_string(), value);
                }
                Ok(None) => (),
                Err(err) if err.is_io() || err.is_lookup() => debug!("{err}"),
                Err(err) => warn!("{err}"),
            }
        }
    }

    /// Command line or the name in brackets for kernel tasks.
    pub(crate) fn cmd(&self) -> String {
        match self.stats.get(STAT_CMDLINE).and_then(Value::as_list) {
            Some(args) if !args.is_empty() => args.iter().join(" "),
            _ => match self.stats.get(STAT_COMM).and_then(Value::as_str) {
                Some(comm) if !comm.is_empty() => format!("[{comm}]"),
                _ => String::new(),
            },
        }
    }

    /// Names of the collected stats in sorted order.
    pub(crate) fn available_stats(&self) -> Vec<String> {
        self.stats.keys().cloned().collect()
    }

    /// Derived attributes shared by processes and tasks.
    pub(crate) fn get(&self, name: &str) -> Option<Value> {
        match name {
            "cmd" => Some(Value::Str(self.cmd())),
            "timestamp" => self.timestamp.map(Value::Timestamp),
            _ => self.stats.get(name).cloned(),
        }
    }
}
