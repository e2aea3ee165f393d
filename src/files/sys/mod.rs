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

//! Files under /sys.

use std::path::Path;

use crate::directory::{Directory, EntryKind, EntryTable};

/// Entries of a kernel tracing directory or of one of its instances.
pub static TRACING_FILES: &EntryTable = &[
    ("available_tracers", EntryKind::Options),
    ("current_tracer", EntryKind::Value),
    ("trace_clock", EntryKind::SelectableOptions),
    ("trace_marker", EntryKind::Raw),
    ("trace_options", EntryKind::TogglableOptions),
    ("tracing_on", EntryKind::Toggle),
];

pub fn tracing_directory<P: AsRef<Path>>(path: P) -> Directory {
    Directory::new(path, TRACING_FILES)
}

#[cfg(test)]
mod tests {

    use super::tracing_directory;
    use crate::testing::{temp_dir, write_file};

    #[test]
    fn test_tracing_directory() {
        let dir = temp_dir();
        write_file(dir.path().join("tracing_on"), "1\n");
        write_file(dir.path().join("trace_clock"), "[local] global\n");
        write_file(dir.path().join("trace"), "");
        let tracing = tracing_directory(dir.path());
        assert_eq!(vec!["trace_clock", "tracing_on"], tracing.list());
        assert!(tracing.get("tracing_on").unwrap().as_toggle().is_some());
        assert!(tracing.get("trace_clock").unwrap().as_selectable_options().is_some());
        assert!(tracing.get("trace").unwrap_err().is_lookup());
    }
}
