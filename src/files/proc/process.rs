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

//! Parsers for files under /proc/[pid] and /proc/[pid]/task/[tid].

use memchr::{memchr, memrchr};
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_until1},
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::{delimited, separated_pair},
};
use regex_lite::Regex;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::{
    error::{Error, Result},
    files::{
        ContentParser, Parse, Value, ValueMap,
        text::{Field, LineSplitter, ParseError, Separator, parse_float, parse_int},
    },
    fs::Entity,
};

/// Placeholder replacing the command name while splitting a stat line.
const COMM_PLACEHOLDER: &str = "comm";

/// Index of the command name in a stat line.
const COMM_INDEX: usize = 1;

/// Size of a kB unit in /proc/[pid]/status.
const KILO_BYTES: i64 = 1024;

/// Split a `key: value` line at the first colon followed by spaces.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.match_indices(':').find_map(|(pos, _)| {
        let value = &line[pos + 1..];
        value
            .starts_with(char::is_whitespace)
            .then(|| (&line[..pos], value.trim_start()))
    })
}

/// Parser of /proc/[pid]/cmdline.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cmdline;

impl ContentParser for Cmdline {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        LineSplitter::new(Separator::Literal('\0')).parse_content(content)
    }
}

const STAT_FIELDS: &[Field] = &[
    Field::int("pid"),
    Field::str("comm"),
    Field::str("state"),
    Field::int("ppid"),
    Field::int("pgrp"),
    Field::int("session"),
    Field::int("tty_nr"),
    Field::int("tpgid"),
    Field::int("flags"),
    Field::int("minflt"),
    Field::int("cminflt"),
    Field::int("majflt"),
    Field::int("cmajflt"),
    Field::int("utime"),
    Field::int("stime"),
    Field::int("cutime"),
    Field::int("cstime"),
    Field::int("priority"),
    Field::int("nice"),
    Field::int("num_threads"),
    Field::int("itrealvalue"),
    Field::int("starttime"),
    Field::int("vsize"),
    Field::int("rss"),
    Field::int("rsslim"),
    Field::int("startcode"),
    Field::int("endcode"),
    Field::int("startstack"),
    Field::int("kstkesp"),
    Field::int("kstkeip"),
    Field::Skip,
    Field::Skip,
    Field::Skip,
    Field::Skip,
    Field::Skip,
    Field::Skip,
    Field::Skip,
    Field::int("exit_signal"),
    Field::int("processor"),
    Field::int("rt_priority"),
    Field::int("policy"),
    Field::int("delayacct_blkio_ticks"),
    Field::int("guest_time"),
    Field::int("cguest_time"),
];

/// Split a stat line keeping the command name as a single token.
///
/// The name is between the first `(` and the last `)`, it may contain spaces and
/// parenthesis.
pub fn split_stat_line(line: &str) -> Vec<String> {
    let line = line.trim_matches(' ');
    let bytes = line.as_bytes();
    let bounds = memchr(b'(', bytes)
        .and_then(|start| memrchr(b')', bytes).map(|end| (start, end)))
        .filter(|(start, end)| start + 1 < *end);
    match bounds {
        Some((start, end)) => {
            let comm = &line[start + 1..end];
            let replaced = format!("{}{}{}", &line[..start], COMM_PLACEHOLDER, &line[end + 1..]);
            let mut tokens = replaced
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<String>>();
            if let Some(token) = tokens.get_mut(COMM_INDEX) {
                *token = comm.to_string();
            }
            tokens
        }
        None => line.split_whitespace().map(str::to_string).collect(),
    }
}

/// Parser of /proc/[pid]/stat.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stat;

impl ContentParser for Stat {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        LineSplitter::with_static_fields(Separator::Custom(split_stat_line), STAT_FIELDS)
            .parse_content(content)
    }
}

const STATM_FIELDS: &[Field] = &[
    Field::int("size"),
    Field::int("resident"),
    Field::int("share"),
    Field::int("text"),
    Field::int("lib"),
    Field::int("data"),
    Field::int("dt"),
];

/// Parser of /proc/[pid]/statm.
#[derive(Clone, Copy, Debug, Default)]
pub struct Statm;

impl ContentParser for Statm {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        LineSplitter::with_static_fields(Separator::Literal(' '), STATM_FIELDS)
            .parse_content(content)
    }
}

/// Parser of /proc/[pid]/io.
///
/// Lines are `name: count`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Io;

impl ContentParser for Io {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        content
            .lines()
            .filter_map(split_key_value)
            .map(|(key, value)| parse_int(value).map(|value| (key.to_string(), value)))
            .collect::<std::result::Result<ValueMap, ParseError>>()
            .map(Value::Map)
    }
}

fn sched_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\S+)\s+:\s+(\S+)$").expect("invalid sched line pattern"))
}

/// Parser of /proc/[pid]/sched.
///
/// Only lines `name : value` are kept. Values with a decimal point are floats.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sched;

impl ContentParser for Sched {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        let re = sched_line_regex();
        let mut stats = ValueMap::new();
        for caps in content.lines().filter_map(|line| re.captures(line)) {
            let value = &caps[2];
            let value = if value.contains('.') {
                parse_float(value)?
            } else {
                parse_int(value)?
            };
            stats.insert(caps[1].to_string(), value);
        }
        Ok(Value::Map(stats))
    }
}

/// Parser of /proc/[pid]/environ.
///
/// Variables without `=` have a null value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Environ;

impl ContentParser for Environ {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        Ok(Value::Map(
            content
                .split('\0')
                .filter(|item| !item.is_empty())
                .map(|item| match item.split_once('=') {
                    Some((key, value)) => (key.to_string(), Value::from(value)),
                    None => (item.to_string(), Value::Null),
                })
                .collect(),
        ))
    }
}

/// Parser of /proc/[pid]/cgroup.
///
/// Lines are `hierarchy-id:subsystems:control-group`. The result is keyed by
/// hierarchy id, the value is the list of subsystems and the control group.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cgroup;

impl Cgroup {
    fn parse_line(line: &str) -> std::result::Result<(String, Value), ParseError> {
        let mut parts = line.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(hier_id), Some(subsystems), Some(control_group)) => {
                let hier_id = parse_int(hier_id)?;
                let subsystems = subsystems
                    .split(',')
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<&str>>();
                Ok((
                    hier_id.to_string(),
                    Value::List(vec![Value::from(subsystems), Value::from(control_group)]),
                ))
            }
            _ => Err(ParseError::syntax(line)),
        }
    }
}

impl ContentParser for Cgroup {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        content
            .lines()
            .map(Cgroup::parse_line)
            .collect::<std::result::Result<ValueMap, ParseError>>()
            .map(Value::Map)
    }
}

/// Parser of /proc/[pid]/status.
///
/// Only sizes in kB are kept, converted in bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Status;

impl ContentParser for Status {
    fn parse_content(&self, content: &str) -> std::result::Result<Value, ParseError> {
        let mut sizes = ValueMap::new();
        for (key, value) in content.lines().filter_map(split_key_value) {
            if let Some(count) = value.strip_suffix(" kB") {
                let bytes = parse_int(count)?
                    .as_i64()
                    .and_then(|count| count.checked_mul(KILO_BYTES))
                    .ok_or_else(|| ParseError::syntax(value))?;
                sizes.insert(key.to_string(), Value::Int(bytes));
            }
        }
        Ok(Value::Map(sizes))
    }
}

/// Parse a namespace link target such as `net:[4026531840]`.
fn parse_ns_target(input: &str) -> IResult<&str, (&str, u64)> {
    all_consuming(separated_pair(
        take_until1(":"),
        char(':'),
        delimited(tag("["), map_res(digit1, str::parse::<u64>), tag("]")),
    ))
    .parse(input)
}

/// Directory /proc/[pid]/ns of namespace links.
///
/// Parsing returns the namespace number for each type.
#[derive(Clone, Debug)]
pub struct NsDirectory {
    path: PathBuf,
}

impl NsDirectory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: crate::fs::absolute(path),
        }
    }

    fn read_links(&self) -> Result<ValueMap> {
        let entries = fs::read_dir(&self.path).map_err(|err| Error::io(&self.path, err))?;
        let mut namespaces = ValueMap::new();
        for entry in entries {
            let path = entry.map_err(|err| Error::io(&self.path, err))?.path();
            let target = match fs::read_link(&path) {
                Ok(target) => target,
                Err(err) if err.kind() == io::ErrorKind::InvalidInput => continue, // not a link
                Err(err) => return Err(Error::io(path, err)),
            };
            let target = target.to_string_lossy();
            let (_, (ns_type, number)) =
                parse_ns_target(&target).map_err(|_| Error::Parse {
                    path: path.clone(),
                    source: ParseError::syntax(target.as_ref()),
                })?;
            let number = i64::try_from(number)
                .map(Value::Int)
                .unwrap_or(Value::UInt(number));
            namespaces.insert(ns_type.to_string(), number);
        }
        Ok(namespaces)
    }
}

impl Entity for NsDirectory {
    fn path(&self) -> &Path {
        &self.path
    }
}

impl Parse for NsDirectory {
    fn parse(&self) -> Result<Option<Value>> {
        if !self.exists() {
            return Ok(None);
        }
        self.read_links().map(|namespaces| Some(Value::Map(namespaces)))
    }
}
