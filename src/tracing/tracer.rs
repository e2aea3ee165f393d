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

use std::{fs, path::Path};

use super::types::{TracerType, TracerTypes};
use crate::{
    directory::Directory,
    error::{Error, Result},
    files::sys::tracing_directory,
    fs::{Entity, File},
};

const AVAILABLE_TRACERS: &str = "available_tracers";
const CURRENT_TRACER: &str = "current_tracer";
const TRACE: &str = "trace";
const TRACE_CLOCK: &str = "trace_clock";
const TRACE_MARKER: &str = "trace_marker";
const TRACE_OPTIONS: &str = "trace_options";
const TRACE_PIPE: &str = "trace_pipe";
const TRACING_ON: &str = "tracing_on";

/// Entry opened with a kind that differs from the table.
fn expect_kind<'e, T>(name: &str, file: Option<&'e T>) -> Result<&'e T> {
    file.ok_or_else(|| Error::WrongKind(name.to_string()))
}

/// A kernel tracing instance.
#[derive(Debug)]
pub struct Tracer<'a> {
    dir: Directory,
    types: &'a TracerTypes,
}

impl<'a> Tracer<'a> {
    pub fn new<P: AsRef<Path>>(path: P, types: &'a TracerTypes) -> Self {
        Self {
            dir: tracing_directory(path),
            types,
        }
    }

    /// Name of the instance directory.
    pub fn name(&self) -> &str {
        self.dir.name()
    }

    pub fn directory(&self) -> &Directory {
        &self.dir
    }

    /// Current tracer type.
    pub fn tracer_type(&self) -> Result<Option<String>> {
        let entry = self.dir.get(CURRENT_TRACER)?;
        expect_kind(CURRENT_TRACER, entry.as_value())?.value()
    }

    /// Change the tracer type, it must be registered.
    pub fn set_tracer_type(&self, name: &str) -> Result<()> {
        if !self.types.contains(name) {
            return Err(Error::UnsupportedTracer(name.to_string()));
        }
        let entry = self.dir.get(CURRENT_TRACER)?;
        expect_kind(CURRENT_TRACER, entry.as_value())?.set(name)
    }

    /// Registered type of the current tracer.
    pub fn kind(&self) -> Result<Option<&'a dyn TracerType>> {
        Ok(self
            .tracer_type()?
            .and_then(|name| self.types.get(&name)))
    }

    /// Tracer types supported by the kernel.
    pub fn available_tracers(&self) -> Result<Vec<String>> {
        let entry = self.dir.get(AVAILABLE_TRACERS)?;
        expect_kind(AVAILABLE_TRACERS, entry.as_options())?.options()
    }

    /// Content of the trace buffer.
    pub fn trace(&self) -> Result<String> {
        File::new(self.dir.join(TRACE)).read()
    }

    /// Open the pipe streaming trace events.
    ///
    /// Reading blocks until events are available.
    pub fn trace_pipe(&self) -> Result<fs::File> {
        let path = self.dir.join(TRACE_PIPE);
        fs::File::open(&path).map_err(|err| Error::io(path, err))
    }

    pub fn enabled(&self) -> Result<bool> {
        let entry = self.dir.get(TRACING_ON)?;
        expect_kind(TRACING_ON, entry.as_toggle())?.enabled()
    }

    pub fn toggle(&self, enabled: bool) -> Result<()> {
        let entry = self.dir.get(TRACING_ON)?;
        expect_kind(TRACING_ON, entry.as_toggle())?.toggle(enabled)
    }

    /// Trace options with their status.
    pub fn options(&self) -> Result<Vec<(String, bool)>> {
        let entry = self.dir.get(TRACE_OPTIONS)?;
        expect_kind(TRACE_OPTIONS, entry.as_togglable_options())?.options()
    }

    pub fn set_option(&self, option: &str, enabled: bool) -> Result<()> {
        let entry = self.dir.get(TRACE_OPTIONS)?;
        expect_kind(TRACE_OPTIONS, entry.as_togglable_options())?.toggle(option, enabled)
    }

    /// Clock used for timestamps.
    pub fn clock(&self) -> Result<Option<String>> {
        let entry = self.dir.get(TRACE_CLOCK)?;
        expect_kind(TRACE_CLOCK, entry.as_selectable_options())?.selected()
    }

    pub fn set_clock(&self, clock: &str) -> Result<()> {
        let entry = self.dir.get(TRACE_CLOCK)?;
        expect_kind(TRACE_CLOCK, entry.as_selectable_options())?.select(clock)
    }

    /// Write a text in the trace buffer.
    pub fn mark(&self, text: &str) -> Result<()> {
        let entry = self.dir.get(TRACE_MARKER)?;
        expect_kind(TRACE_MARKER, entry.as_raw())?.write(text)
    }
}

#[cfg(test)]
mod tests {

    use std::{fs, io::Read};

    use super::{Tracer, expect_kind};
    use crate::{
        error::Error,
        testing::{temp_dir, write_file},
        tracing::TracerTypes,
    };

    #[test]
    fn test_expect_kind() {
        assert_eq!(Some(&1), expect_kind("trace", Some(&1)).ok());
        let err = expect_kind::<u8>("trace", None).unwrap_err();
        assert!(matches!(err, Error::WrongKind(ref name) if name == "trace"));
        assert!(!err.is_lookup());
    }

    #[test]
    fn test_name() {
        let dir = temp_dir();
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert_eq!(
            dir.path().file_name().unwrap().to_str().unwrap(),
            tracer.name()
        );
    }

    #[test]
    fn test_tracer_type() {
        let dir = temp_dir();
        write_file(dir.path().join("current_tracer"), "function\n");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert_eq!(Some("function".to_string()), tracer.tracer_type().unwrap());
        assert!(tracer.kind().unwrap().is_none());
        tracer.set_tracer_type("nop").unwrap();
        assert_eq!(Some("nop".to_string()), tracer.tracer_type().unwrap());
        assert_eq!(Some("nop"), tracer.kind().unwrap().map(|kind| kind.name()));
    }

    #[test]
    fn test_set_unsupported_type() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("current_tracer"), "nop");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert!(matches!(
            tracer.set_tracer_type("unknown"),
            Err(Error::UnsupportedTracer(ref name)) if name == "unknown"
        ));
        assert_eq!("nop", fs::read_to_string(path).unwrap());
    }

    #[test]
    fn test_toggle() {
        let dir = temp_dir();
        write_file(dir.path().join("tracing_on"), "0");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert!(!tracer.enabled().unwrap());
        tracer.toggle(true).unwrap();
        assert!(tracer.enabled().unwrap());
        tracer.toggle(false).unwrap();
        assert!(!tracer.enabled().unwrap());
    }

    #[test]
    fn test_enabled_missing_file() {
        let dir = temp_dir();
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert!(tracer.enabled().unwrap_err().is_lookup());
    }

    #[test]
    fn test_options() {
        let dir = temp_dir();
        write_file(dir.path().join("trace_options"), "noraw\nhex");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert_eq!(
            vec![("raw".to_string(), false), ("hex".to_string(), true)],
            tracer.options().unwrap()
        );
    }

    #[test]
    fn test_set_option() {
        let dir = temp_dir();
        write_file(dir.path().join("trace_options"), "nohex");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        tracer.set_option("hex", true).unwrap();
        assert_eq!(vec![("hex".to_string(), true)], tracer.options().unwrap());
        tracer.set_option("hex", false).unwrap();
        assert_eq!(vec![("hex".to_string(), false)], tracer.options().unwrap());
    }

    #[test]
    fn test_clock() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("trace_clock"), "[local] global counter\n");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert_eq!(Some("local".to_string()), tracer.clock().unwrap());
        tracer.set_clock("global").unwrap();
        assert_eq!("global", fs::read_to_string(path).unwrap());
        assert!(tracer.set_clock("unknown").is_err());
    }

    #[test]
    fn test_available_tracers() {
        let dir = temp_dir();
        write_file(dir.path().join("available_tracers"), "function nop\n");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert_eq!(vec!["function", "nop"], tracer.available_tracers().unwrap());
    }

    #[test]
    fn test_trace_and_mark() {
        let dir = temp_dir();
        write_file(dir.path().join("trace"), "# tracer: nop\n");
        let marker = write_file(dir.path().join("trace_marker"), "");
        write_file(dir.path().join("trace_pipe"), "event\n");
        let types = TracerTypes::builtin();
        let tracer = Tracer::new(dir.path(), &types);
        assert_eq!("# tracer: nop\n", tracer.trace().unwrap());
        tracer.mark("hello").unwrap();
        assert_eq!("hello", fs::read_to_string(marker).unwrap());
        let mut content = String::new();
        tracer
            .trace_pipe()
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!("event\n", content);
    }
}
