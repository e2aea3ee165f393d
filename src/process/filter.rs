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

//! Process filters for [`Collection`](super::Collection).

use regex_lite::Regex;

use super::task::Process;
use crate::{error::Result, files::Value};

/// Predicate selecting processes.
///
/// Any closure taking a process and returning a boolean is a filter.
pub trait Filter {
    fn accept(&self, process: &Process) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&Process) -> bool,
{
    fn accept(&self, process: &Process) -> bool {
        self(process)
    }
}

/// Select processes by command name.
///
/// The name is compared to the first argument of the command line or, if the
/// command line is empty, to the task name.
#[derive(Clone, Debug)]
pub struct CommandNameFilter {
    name: String,
}

impl CommandNameFilter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Filter for CommandNameFilter {
    fn accept(&self, process: &Process) -> bool {
        match process.stat("cmdline").and_then(Value::as_list) {
            Some([first, ..]) => first.as_str() == Some(self.name.as_str()),
            _ => process.stat("comm").and_then(Value::as_str) == Some(self.name.as_str()),
        }
    }
}

/// Select processes whose command matches a regular expression.
///
/// Unless arguments are included, only the first word of the command is matched.
#[derive(Clone, Debug)]
pub struct CommandLineFilter {
    re: Regex,
    include_args: bool,
}

impl CommandLineFilter {
    pub fn new(pattern: &str, include_args: bool) -> Result<Self> {
        Ok(Self {
            re: Regex::new(pattern)?,
            include_args,
        })
    }
}

impl Filter for CommandLineFilter {
    fn accept(&self, process: &Process) -> bool {
        let cmd = process.cmd();
        let cmd = if self.include_args {
            cmd.as_str()
        } else {
            cmd.split_whitespace().next().unwrap_or_default()
        };
        self.re.is_match(cmd)
    }
}
