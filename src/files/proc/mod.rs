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

//! Files under /proc.
//!
//! The tables map the file names of a directory to their kind. Names
//! missing from a table are not exposed by the corresponding [`Directory`].

use std::path::Path;

use crate::directory::{Directory, EntryKind, EntryTable};

pub mod process;
pub mod system;

/// Entries of /proc/[pid] and /proc/[pid]/task/[tid].
pub static PROCESS_FILES: &EntryTable = &[
    ("cgroup", EntryKind::Parsed(&process::Cgroup)),
    ("cmdline", EntryKind::Parsed(&process::Cmdline)),
    ("comm", EntryKind::Value),
    ("environ", EntryKind::Parsed(&process::Environ)),
    ("io", EntryKind::Parsed(&process::Io)),
    ("ns", EntryKind::Ns),
    ("sched", EntryKind::Parsed(&process::Sched)),
    ("stat", EntryKind::Parsed(&process::Stat)),
    ("statm", EntryKind::Parsed(&process::Statm)),
    ("status", EntryKind::Parsed(&process::Status)),
    ("task", EntryKind::Directory),
    ("wchan", EntryKind::Value),
];

/// System-wide entries of /proc.
pub static SYSTEM_FILES: &EntryTable = &[
    ("cgroups", EntryKind::Parsed(&system::Cgroups)),
    ("diskstats", EntryKind::Parsed(&system::Diskstats)),
    ("loadavg", EntryKind::Parsed(&system::Loadavg)),
    ("meminfo", EntryKind::Parsed(&system::Meminfo)),
    ("stat", EntryKind::Parsed(&system::CpuStat)),
    ("uptime", EntryKind::Parsed(&system::Uptime)),
    ("vmstat", EntryKind::Parsed(&system::Vmstat)),
];

/// Directory of a process or a task.
pub fn process_directory<P: AsRef<Path>>(path: P) -> Directory {
    Directory::new(path, PROCESS_FILES)
}

/// The /proc directory itself.
pub fn system_directory<P: AsRef<Path>>(path: P) -> Directory {
    Directory::new(path, SYSTEM_FILES)
}
