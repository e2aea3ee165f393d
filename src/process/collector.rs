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

use libc::pid_t;
use log::error;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use super::task::Process;
use crate::{config::Settings, fs::absolute};

/// Collect processes either from a list of PIDs or by scanning the proc directory.
#[derive(Clone, Debug)]
pub struct Collector {
    proc_root: PathBuf,
    pids: BTreeSet<pid_t>,
}

impl Default for Collector {
    fn default() -> Self {
        Collector::with_settings(&Settings::default())
    }
}

impl Collector {
    /// Collector of all the processes in the directory.
    pub fn new<P: AsRef<Path>>(proc_root: P) -> Self {
        Self {
            proc_root: absolute(proc_root),
            pids: BTreeSet::new(),
        }
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Collector::new(settings.proc_root())
    }

    /// Restrict collection to some PIDs. An empty list means all processes.
    pub fn pids<I: IntoIterator<Item = pid_t>>(mut self, pids: I) -> Self {
        self.pids = pids.into_iter().collect();
        self
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// PIDs of the numeric entries of the proc directory in ascending order.
    fn scan(&self) -> Vec<pid_t> {
        let entries = match fs::read_dir(&self.proc_root) {
            Ok(entries) => entries,
            Err(err) => {
                error!("{}: {err}", self.proc_root.display());
                return Vec::new();
            }
        };
        let mut pids = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str()?.parse::<pid_t>().ok())
            .collect::<Vec<pid_t>>();
        pids.sort_unstable();
        pids
    }

    /// Processes with their stats collected.
    ///
    /// Processes that no longer exist after collection are skipped.
    pub fn collect(&self) -> impl Iterator<Item = Process> + '_ {
        let pids = if self.pids.is_empty() {
            self.scan()
        } else {
            self.pids.iter().copied().collect()
        };
        pids.into_iter().filter_map(move |pid| {
            let mut process = Process::new(pid, self.proc_root.join(pid.to_string()));
            process.collect_stats();
            process.exists().then_some(process)
        })
    }
}

#[cfg(test)]
mod tests {

    use std::path::Path;

    use super::Collector;
    use crate::{
        config::Settings,
        testing::{ProcTree, init_logger, write_file},
    };

    fn proc_tree() -> ProcTree {
        let tree = ProcTree::new();
        for pid in [10, 20, 30] {
            tree.process_file(pid, "cmdline", &format!("cmd{pid}\0"));
        }
        tree
    }

    #[test]
    fn test_collect_pids() {
        let tree = proc_tree();
        let collector = Collector::new(tree.root()).pids([30, 50, 10]);
        let pids = collector
            .collect()
            .map(|process| process.pid())
            .collect::<Vec<_>>();
        assert_eq!(vec![10, 30], pids);
    }

    #[test]
    fn test_collect_stats() {
        let tree = proc_tree();
        let collector = Collector::new(tree.root()).pids([20]);
        let processes = collector.collect().collect::<Vec<_>>();
        assert_eq!(1, processes.len());
        assert_eq!("cmd20", processes[0].cmd());
    }

    #[test]
    fn test_collect_scan() {
        let tree = proc_tree();
        write_file(tree.root().join("uptime"), "1.0 2.0\n");
        std::fs::create_dir(tree.root().join("self")).unwrap();
        let pids = Collector::new(tree.root())
            .collect()
            .map(|process| process.pid())
            .collect::<Vec<_>>();
        assert_eq!(vec![10, 20, 30], pids);
    }

    #[test]
    fn test_collect_scan_missing_root() {
        init_logger();
        let tree = ProcTree::new();
        let collector = Collector::new(tree.root().join("missing"));
        assert_eq!(0, collector.collect().count());
    }

    #[test]
    fn test_collect_fresh() {
        let tree = proc_tree();
        let collector = Collector::new(tree.root());
        assert_eq!(3, collector.collect().count());
        tree.process_file(40, "cmdline", "cmd40\0");
        assert_eq!(4, collector.collect().count());
    }

    #[test]
    fn test_with_settings() {
        let collector = Collector::with_settings(&Settings::default());
        assert_eq!(Path::new("/proc"), collector.proc_root());
    }
}
