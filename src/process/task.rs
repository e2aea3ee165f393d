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
use libc::pid_t;
use std::{
    hash::{Hash, Hasher},
    path::Path,
};

use super::snapshot::{Clock, Snapshot};
use crate::{
    directory::Directory,
    error::Result,
    files::{Value, ValueMap},
    fs::Entity,
};

const TASK_DIR: &str = "task";

macro_rules! snapshot_accessors {
    () => {
        /// Replace the stats with the current content of the directory.
        ///
        /// This never fails. If the directory cannot be read, the stats are
        /// empty. Unreadable entries are skipped.
        pub fn collect_stats(&mut self) {
            self.snapshot.collect();
        }

        /// Use another clock for collection timestamps.
        pub fn with_clock(mut self, clock: Clock) -> Self {
            self.snapshot.set_clock(clock);
            self
        }

        pub fn exists(&self) -> bool {
            self.snapshot.dir().exists()
        }

        /// Time of the last collection, None if no stats are collected.
        pub fn timestamp(&self) -> Option<DateTime<Utc>> {
            self.snapshot.timestamp()
        }

        /// Command line or the name in brackets for kernel tasks.
        pub fn cmd(&self) -> String {
            self.snapshot.cmd()
        }

        pub fn stats(&self) -> ValueMap {
            self.snapshot.stats().clone()
        }

        pub fn stat(&self, name: &str) -> Option<&Value> {
            self.snapshot.stats().get(name)
        }

        pub fn available_stats(&self) -> Vec<String> {
            self.snapshot.available_stats()
        }
    };
}

/// A process under /proc.
///
/// Two processes are equal if they have the same PID whatever their stats.
#[derive(Debug)]
pub struct Process {
    pid: pid_t,
    snapshot: Snapshot,
}

impl Process {
    pub fn new<P: AsRef<Path>>(pid: pid_t, path: P) -> Self {
        Self {
            pid,
            snapshot: Snapshot::new(path),
        }
    }

    pub fn pid(&self) -> pid_t {
        self.pid
    }

    snapshot_accessors!();

    /// Value of a stat or of one of the attributes `pid`, `cmd` and `timestamp`.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "pid" => Some(Value::Int(i64::from(self.pid))),
            _ => self.snapshot.get(name),
        }
    }

    /// Tasks of the process, without stats.
    pub fn tasks(&self) -> Result<Vec<Task<'_>>> {
        let entry = self.snapshot.dir().get(TASK_DIR)?;
        let tasks_dir = Directory::new(entry.path(), &[]);
        let mut tids = tasks_dir
            .listdir()?
            .into_iter()
            .filter_map(|name| name.parse::<pid_t>().ok().map(|tid| (tid, name)))
            .collect::<Vec<(pid_t, String)>>();
        tids.sort_unstable_by_key(|(tid, _)| *tid);
        Ok(tids
            .into_iter()
            .map(|(tid, name)| Task::new(tid, self, tasks_dir.join(&name)))
            .collect())
    }
}

impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        self.pid == other.pid
    }
}

impl Eq for Process {}

impl Hash for Process {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pid.hash(state);
    }
}

/// A thread of a process under /proc/[pid]/task.
#[derive(Debug)]
pub struct Task<'a> {
    tid: pid_t,
    process: &'a Process,
    snapshot: Snapshot,
}

impl<'a> Task<'a> {
    pub fn new<P: AsRef<Path>>(tid: pid_t, process: &'a Process, path: P) -> Self {
        Self {
            tid,
            process,
            snapshot: Snapshot::new(path),
        }
    }

    pub fn tid(&self) -> pid_t {
        self.tid
    }

    /// The process owning the task.
    pub fn process(&self) -> &'a Process {
        self.process
    }

    snapshot_accessors!();

    /// Value of a stat or of one of the attributes `tid`, `cmd` and `timestamp`.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "tid" => Some(Value::Int(i64::from(self.tid))),
            _ => self.snapshot.get(name),
        }
    }
}

impl PartialEq for Task<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.tid == other.tid
    }
}

impl Eq for Task<'_> {}

impl Hash for Task<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tid.hash(state);
    }
}
