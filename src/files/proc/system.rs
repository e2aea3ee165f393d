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

//! Parsers for system-wide files under /proc.

use nom::{
    IResult, Parser,
    bytes::complete::take_until1,
    character::complete::{char, digit1, space1},
    sequence::{preceded, separated_pair},
};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::files::{
    ContentParser, Value, ValueMap,
    text::{Conversion, Field, LineSplitter, ParseError, Separator, parse_int},
};

/// Prefix of CPU lines in /proc/stat.
const CPU_PREFIX: &str = "cpu";

/// Fields of a CPU line in /proc/stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum CpuField {
    User,
    Nice,
    System,
    Idle,
    Iowait,
    Irq,
    Softirq,
    Steal,
    Guest,
    GuestNice,
}

/// Counters of a line in /proc/diskstats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum DiskField {
    Read,
    ReadMerged,
    ReadSect,
    ReadMs,
    Write,
    WriteMerged,
    WriteSect,
    WriteMs,
    IoCurr,
    IoMs,
    IoMsWeighted,
}

/// Parser of /proc/stat.
///
/// Only CPU lines are parsed. Each time is returned as a fraction of the line total.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuStat;

impl CpuStat {
    fn parse_line(line: &str) -> Result<(String, Value), ParseError> {
        let mut tokens = line.split_whitespace();
        let label = tokens.next().ok_or_else(|| ParseError::syntax(line))?;
        let values = tokens
            .map(|token| {
                token.parse::<f64>().map_err(|_| ParseError::InvalidValue {
                    kind: Conversion::Float,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, ParseError>>()?;
        let total: f64 = values.iter().sum();
        let fractions = CpuField::iter()
            .zip(values)
            .map(|(field, value)| {
                let fraction = if total > 0.0 { value / total } else { 0.0 };
                (field.as_ref().to_string(), Value::Float(fraction))
            })
            .collect::<ValueMap>();
        Ok((label.to_string(), Value::Map(fractions)))
    }
}

impl ContentParser for CpuStat {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        content
            .lines()
            .take_while(|line| line.starts_with(CPU_PREFIX))
            .map(CpuStat::parse_line)
            .collect::<Result<ValueMap, ParseError>>()
            .map(Value::Map)
    }
}

const UPTIME_FIELDS: &[Field] = &[Field::float("uptime"), Field::float("idle")];

/// Parser of /proc/uptime.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uptime;

impl ContentParser for Uptime {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        LineSplitter::with_static_fields(Separator::Literal(' '), UPTIME_FIELDS)
            .parse_content(content)
    }
}

const LOADAVG_FIELDS: &[Field] = &[
    Field::float("load1"),
    Field::float("load5"),
    Field::float("load15"),
];

/// Parser of /proc/loadavg.
#[derive(Clone, Copy, Debug, Default)]
pub struct Loadavg;

impl ContentParser for Loadavg {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        LineSplitter::with_static_fields(Separator::Literal(' '), LOADAVG_FIELDS)
            .parse_content(content)
    }
}

/// Parser of /proc/vmstat.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vmstat;

impl ContentParser for Vmstat {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        content
            .lines()
            .map(
                |line| match line.split_whitespace().collect::<Vec<&str>>().as_slice() {
                    [key, value] => parse_int(value).map(|value| (key.to_string(), value)),
                    _ => Err(ParseError::syntax(line)),
                },
            )
            .collect::<Result<ValueMap, ParseError>>()
            .map(Value::Map)
    }
}

/// Parser of /proc/diskstats.
///
/// Major and minor numbers are ignored. The result is keyed by device name.
#[derive(Clone, Copy, Debug, Default)]
pub struct Diskstats;

impl Diskstats {
    fn parse_line(line: &str) -> Result<(String, Value), ParseError> {
        let mut tokens = line.split_whitespace().skip(2);
        let device = tokens.next().ok_or_else(|| ParseError::syntax(line))?;
        let counters = DiskField::iter()
            .zip(tokens)
            .map(|(field, token)| parse_int(token).map(|value| (field.as_ref().to_string(), value)))
            .collect::<Result<ValueMap, ParseError>>()?;
        Ok((device.to_string(), Value::Map(counters)))
    }
}

impl ContentParser for Diskstats {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        content
            .lines()
            .map(Diskstats::parse_line)
            .collect::<Result<ValueMap, ParseError>>()
            .map(Value::Map)
    }
}

/// Parse a line `name:    number [kB]`, the unit is ignored.
fn parse_meminfo_line(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_until1(":"), preceded(char(':'), space1), digit1).parse(input)
}

/// Parser of /proc/meminfo.
#[derive(Clone, Copy, Debug, Default)]
pub struct Meminfo;

impl ContentParser for Meminfo {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        content
            .lines()
            .map(|line| -> Result<(String, Value), ParseError> {
                let (_, (name, value)) =
                    parse_meminfo_line(line).map_err(|_| ParseError::syntax(line))?;
                Ok((name.to_string(), parse_int(value)?))
            })
            .collect::<Result<ValueMap, ParseError>>()
            .map(Value::Map)
    }
}

/// Parser of /proc/cgroups.
///
/// Lines are `subsystem hierarchy-id num-cgroups enabled`, comments start with `#`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cgroups;

impl Cgroups {
    fn parse_line(line: &str) -> Result<(String, Value), ParseError> {
        match line.split_whitespace().collect::<Vec<&str>>().as_slice() {
            [subsys, hier_id, num_cgroups, enabled] => {
                let details = ValueMap::from([
                    ("hierarchy-id".to_string(), parse_int(hier_id)?),
                    ("num-cgroups".to_string(), parse_int(num_cgroups)?),
                    ("enabled".to_string(), Value::Bool(*enabled == "1")),
                ]);
                Ok((subsys.to_string(), Value::Map(details)))
            }
            _ => Err(ParseError::syntax(line)),
        }
    }
}

impl ContentParser for Cgroups {
    fn parse_content(&self, content: &str) -> Result<Value, ParseError> {
        content
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(Cgroups::parse_line)
            .collect::<Result<ValueMap, ParseError>>()
            .map(Value::Map)
    }
}

#[cfg(test)]
mod tests {

    use rstest::rstest;

    use super::{Cgroups, ContentParser, CpuStat, Diskstats, Loadavg, Meminfo, Uptime, Vmstat};
    use crate::files::{Value, ValueMap};

    fn parse_map<P: ContentParser>(parser: P, content: &str) -> ValueMap {
        match parser.parse_content(content).unwrap() {
            Value::Map(map) => map,
            value => panic!("not a map: {value:?}"),
        }
    }

    fn get<'a>(map: &'a ValueMap, path: &[&str]) -> Option<&'a Value> {
        let (last, parents) = path.split_last()?;
        let mut map = map;
        for key in parents {
            map = map.get(*key)?.as_map()?;
        }
        map.get(*last)
    }

    #[test]
    fn test_cpu_stat() {
        let content = "cpu  10 20 30 40 0 0 0 0 0 0\n\
                       cpu0 5 5 0 10\n\
                       intr 1234 0 0\n\
                       cpu1 1 1 1 1\n";
        let stats = parse_map(CpuStat, content);
        assert_eq!(2, stats.len());
        assert_eq!(Some(&Value::Float(0.1)), get(&stats, &["cpu", "user"]));
        assert_eq!(Some(&Value::Float(0.4)), get(&stats, &["cpu", "idle"]));
        assert_eq!(Some(&Value::Float(0.0)), get(&stats, &["cpu", "guest-nice"]));
        assert_eq!(Some(&Value::Float(0.25)), get(&stats, &["cpu0", "nice"]));
        assert_eq!(None, get(&stats, &["cpu0", "iowait"]));
    }

    #[test]
    fn test_cpu_stat_zero_total() {
        let stats = parse_map(CpuStat, "cpu 0 0 0 0\n");
        assert_eq!(Some(&Value::Float(0.0)), get(&stats, &["cpu", "user"]));
    }

    #[test]
    fn test_uptime() {
        let stats = parse_map(Uptime, "695283.06 1376159.44\n");
        assert_eq!(Some(&Value::Float(695283.06)), stats.get("uptime"));
        assert_eq!(Some(&Value::Float(1376159.44)), stats.get("idle"));
    }

    #[test]
    fn test_loadavg() {
        let stats = parse_map(Loadavg, "0.10 0.20 0.30 1/123 4567\n");
        assert_eq!(3, stats.len());
        assert_eq!(Some(&Value::Float(0.1)), stats.get("load1"));
        assert_eq!(Some(&Value::Float(0.2)), stats.get("load5"));
        assert_eq!(Some(&Value::Float(0.3)), stats.get("load15"));
    }

    #[test]
    fn test_vmstat() {
        let stats = parse_map(Vmstat, "nr_free_pages 2715\nnr_alloc_batch 93\n");
        assert_eq!(Some(&Value::Int(2715)), stats.get("nr_free_pages"));
        assert_eq!(Some(&Value::Int(93)), stats.get("nr_alloc_batch"));
    }

    #[test]
    fn test_diskstats() {
        let content = "   8       0 sda 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15\n\
                       8       1 sda1 10 20 30 40 50 60 70 80 90 100 110\n";
        let stats = parse_map(Diskstats, content);
        assert_eq!(2, stats.len());
        assert_eq!(11, stats["sda"].as_map().unwrap().len());
        assert_eq!(Some(&Value::Int(1)), get(&stats, &["sda", "read"]));
        assert_eq!(Some(&Value::Int(2)), get(&stats, &["sda", "read-merged"]));
        assert_eq!(Some(&Value::Int(11)), get(&stats, &["sda", "io-ms-weighted"]));
        assert_eq!(Some(&Value::Int(90)), get(&stats, &["sda1", "io-curr"]));
    }

    #[rstest]
    #[case("MemTotal:        7863464 kB", "MemTotal", 7863464)]
    #[case("HugePages_Total:       0", "HugePages_Total", 0)]
    #[case("Active(anon):     123 kB", "Active(anon)", 123)]
    fn test_meminfo(#[case] line: &str, #[case] name: &str, #[case] expected: i64) {
        let stats = parse_map(Meminfo, line);
        assert_eq!(Some(&Value::Int(expected)), stats.get(name));
    }

    #[test]
    fn test_meminfo_syntax_error() {
        assert!(Meminfo.parse_content("invalid line").is_err());
    }

    #[test]
    fn test_cgroups() {
        let content = "#subsys_name\thierarchy\tnum_cgroups\tenabled\n\
                       cpuset\t2\t1\t1\n\
                       memory\t0\t105\t0\n";
        let stats = parse_map(Cgroups, content);
        assert_eq!(2, stats.len());
        assert_eq!(Some(&Value::Int(2)), get(&stats, &["cpuset", "hierarchy-id"]));
        assert_eq!(Some(&Value::Int(1)), get(&stats, &["cpuset", "num-cgroups"]));
        assert_eq!(Some(&Value::Bool(true)), get(&stats, &["cpuset", "enabled"]));
        assert_eq!(Some(&Value::Bool(false)), get(&stats, &["memory", "enabled"]));
    }
}
