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

//! Processes and tasks with their stats.
//!
//! Stats are collected from the files of `/proc/[pid]`:
//!
//! ```no_run
//! use lxstats::process::Process;
//!
//! let mut process = Process::new(1, "/proc/1");
//! process.collect_stats();
//! println!("{:?}", process.get("statm.size"));
//! ```

mod collection;
mod collector;
mod filter;
mod snapshot;
mod task;

pub use self::collection::Collection;
pub use self::collector::Collector;
pub use self::filter::{CommandLineFilter, CommandNameFilter, Filter};
pub use self::snapshot::Clock;
pub use self::task::{Process, Task};
