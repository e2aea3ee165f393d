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

//! Types of files used mostly under /sys.

use std::path::Path;

use super::{
    Parse, ParsedFile, Value,
    text::{LineSplitter, Separator, WordSplitter},
};
use crate::{
    error::{Error, Result},
    fs::Entity,
};

const DISABLED_PREFIX: &str = "no";

macro_rules! delegate_parse {
    ($type:ty) => {
        impl Entity for $type {
            fn path(&self) -> &Path {
                self.inner.path()
            }
        }

        impl Parse for $type {
            fn parse(&self) -> Result<Option<Value>> {
                self.inner.parse()
            }
        }
    };
}

/// Option name without the brackets marking the selected one.
fn strip_selected(value: &str) -> &str {
    value
        .strip_prefix('[')
        .map(|value| value.strip_suffix(']').unwrap_or(value))
        .unwrap_or(value)
}

/// File listing a set of options.
///
/// For a file containing `foo [bar] baz`, the options are `foo`, `bar` and `baz`.
#[derive(Debug)]
pub struct OptionsFile {
    inner: ParsedFile<WordSplitter>,
}

impl OptionsFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            inner: ParsedFile::new(path, WordSplitter),
        }
    }

    /// Raw words in the file, an absent file has none.
    fn words(&self) -> Result<Vec<String>> {
        if !self.inner.exists() {
            return Ok(Vec::new());
        }
        Ok(WordSplitter::words(&self.inner.read()?))
    }

    /// Available options in file order.
    pub fn options(&self) -> Result<Vec<String>> {
        Ok(self
            .words()?
            .iter()
            .map(|word| strip_selected(word).to_string())
            .collect())
    }

    pub(crate) fn write(&self, content: &str) -> Result<()> {
        self.inner.write(content)
    }
}

delegate_parse!(OptionsFile);

/// File listing a set of options, the selected one being in brackets.
#[derive(Debug)]
pub struct SelectableOptionsFile {
    inner: OptionsFile,
}

impl SelectableOptionsFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            inner: OptionsFile::new(path),
        }
    }

    pub fn options(&self) -> Result<Vec<String>> {
        self.inner.options()
    }

    /// The selected option if any.
    pub fn selected(&self) -> Result<Option<String>> {
        Ok(self
            .inner
            .words()?
            .iter()
            .find(|word| word.starts_with('['))
            .map(|word| strip_selected(word).to_string()))
    }

    /// Select an option, it must be one of the available options.
    pub fn select(&self, value: &str) -> Result<()> {
        if !self.options()?.iter().any(|option| option == value) {
            return Err(Error::InvalidOption(value.to_string()));
        }
        self.inner.write(value)
    }
}

delegate_parse!(SelectableOptionsFile);

/// File with a list of options that can be individually enabled.
///
/// Disabled options are prefixed by `no`.
#[derive(Debug)]
pub struct TogglableOptionsFile {
    inner: OptionsFile,
}

impl TogglableOptionsFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            inner: OptionsFile::new(path),
        }
    }

    /// Options with their status in file order.
    pub fn options(&self) -> Result<Vec<(String, bool)>> {
        Ok(self
            .inner
            .options()?
            .into_iter()
            .map(|option| match option.strip_prefix(DISABLED_PREFIX) {
                Some(name) => (name.to_string(), false),
                None => (option, true),
            })
            .collect())
    }

    /// Enable or disable an option.
    pub fn toggle(&self, option: &str, enabled: bool) -> Result<()> {
        if !self.options()?.iter().any(|(name, _)| name == option) {
            return Err(Error::InvalidOption(option.to_string()));
        }
        let prefix = if enabled { "" } else { DISABLED_PREFIX };
        self.inner.write(&format!("{prefix}{option}"))
    }
}

delegate_parse!(TogglableOptionsFile);

/// File containing a single value.
#[derive(Debug)]
pub struct ValueFile {
    inner: ParsedFile<LineSplitter>,
}

impl ValueFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            inner: ParsedFile::new(path, LineSplitter::new(Separator::None)),
        }
    }

    /// Current value or None if the file doesn't exist.
    pub fn value(&self) -> Result<Option<String>> {
        Ok(self.inner.parse()?.and_then(|value| match value {
            Value::Str(s) => Some(s),
            _ => None,
        }))
    }

    pub fn set(&self, value: &str) -> Result<()> {
        self.inner.write(value)
    }
}

delegate_parse!(ValueFile);

/// File enabling or disabling a feature with `1` or `0`.
#[derive(Debug)]
pub struct ToggleFile {
    inner: ValueFile,
}

impl ToggleFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            inner: ValueFile::new(path),
        }
    }

    pub fn enabled(&self) -> Result<bool> {
        Ok(self.inner.value()?.as_deref() == Some("1"))
    }

    pub fn toggle(&self, enabled: bool) -> Result<()> {
        self.inner.set(if enabled { "1" } else { "0" })
    }
}

delegate_parse!(ToggleFile);

#[cfg(test)]
mod tests {

    use std::fs;

    use super::{
        OptionsFile, SelectableOptionsFile, ToggleFile, TogglableOptionsFile, ValueFile,
    };
    use crate::{
        files::{Parse, Value},
        testing::{temp_dir, write_file},
    };

    #[test]
    fn test_options() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo [bar] baz");
        let file = OptionsFile::new(&path);
        assert_eq!(vec!["foo", "bar", "baz"], file.options().unwrap());
        assert_eq!(
            Some(Value::from(vec!["foo", "[bar]", "baz"])),
            file.parse().unwrap()
        );
    }

    #[test]
    fn test_options_one_per_line() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo\nbar\nbaz\n");
        assert_eq!(
            vec!["foo", "bar", "baz"],
            OptionsFile::new(&path).options().unwrap()
        );
    }

    #[test]
    fn test_selectable_options() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo [bar] baz");
        let file = SelectableOptionsFile::new(&path);
        assert_eq!(vec!["foo", "bar", "baz"], file.options().unwrap());
        assert_eq!(Some("bar".to_string()), file.selected().unwrap());
    }

    #[test]
    fn test_selectable_options_none_selected() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo bar baz");
        let file = SelectableOptionsFile::new(&path);
        assert_eq!(None, file.selected().unwrap());
    }

    #[test]
    fn test_select() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo [bar] baz");
        let file = SelectableOptionsFile::new(&path);
        file.select("baz").unwrap();
        assert_eq!("baz", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_select_invalid() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo [bar] baz");
        let file = SelectableOptionsFile::new(&path);
        assert!(matches!(
            file.select("unknown"),
            Err(crate::Error::InvalidOption(ref name)) if name == "unknown"
        ));
        assert_eq!("foo [bar] baz", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_togglable_options() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo\nnobar\nbaz");
        let file = TogglableOptionsFile::new(&path);
        assert_eq!(
            vec![
                ("foo".to_string(), true),
                ("bar".to_string(), false),
                ("baz".to_string(), true)
            ],
            file.options().unwrap()
        );
    }

    #[test]
    fn test_toggle_option() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo\nnobar\nbaz");
        let file = TogglableOptionsFile::new(&path);
        file.toggle("bar", true).unwrap();
        assert_eq!("bar", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_toggle_option_disable() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo\nnobar\nbaz");
        let file = TogglableOptionsFile::new(&path);
        file.toggle("foo", false).unwrap();
        assert_eq!("nofoo", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_toggle_unknown_option() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "foo\nnobar\nbaz");
        let file = TogglableOptionsFile::new(&path);
        assert!(file.toggle("other", true).is_err());
    }

    #[test]
    fn test_value_file() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "some value\n");
        let file = ValueFile::new(&path);
        assert_eq!(Some("some value".to_string()), file.value().unwrap());
        file.set("other value").unwrap();
        assert_eq!("other value", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_value_file_missing() {
        let dir = temp_dir();
        let file = ValueFile::new(dir.path().join("missing"));
        assert_eq!(None, file.value().unwrap());
    }

    #[test]
    fn test_toggle_file() {
        let dir = temp_dir();
        let path = write_file(dir.path().join("file"), "1\n");
        let file = ToggleFile::new(&path);
        assert!(file.enabled().unwrap());
        file.toggle(false).unwrap();
        assert_eq!("0", fs::read_to_string(&path).unwrap());
        assert!(!file.enabled().unwrap());
        file.toggle(true).unwrap();
        assert_eq!("1", fs::read_to_string(&path).unwrap());
    }
}
