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

//! Structured access to /proc and /sys for Linux.
//!
//! Files of the pseudo-filesystems are read on demand and converted into
//! [`Value`]s. Directories expose a fixed set of known entries:
//!
//! ```no_run
//! use lxstats::files::proc::system_directory;
//!
//! let proc = system_directory("/proc");
//! for (name, entry) in &proc {
//!     println!("{name}: {:?}", entry.parse());
//! }
//! ```
//!
//! Processes are collected, filtered and sorted with a [`Collection`]:
//!
//! ```no_run
//! use lxstats::process::{Collection, CommandNameFilter};
//!
//! let mut collection = Collection::new().sort_by("-stat.utime");
//! collection.add_filter(CommandNameFilter::new("bash"));
//! for process in &collection {
//!     println!("{} {}", process.pid(), process.cmd());
//! }
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod files;
pub mod fs;
pub mod process;
pub mod tracing;

#[cfg(test)]
mod testing;

pub use config::Settings;
pub use directory::{Directory, Entry, EntryKind};
pub use error::{Error, Result};
pub use files::{Value, ValueMap};
pub use process::{Collection, Collector, Process, Task};
pub use tracing::{Tracer, Tracing};
