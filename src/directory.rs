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

//! Directories with a static table of known entries.
//!
//! A [`Directory`] only exposes the names declared in its table. Opening a
//! name returns an [`Entry`] bound to the sub-path, whose variant depends on
//! the declared [`EntryKind`].

use std::{
    fs,
    path::{Path, PathBuf},
    vec,
};

use crate::{
    error::{Error, Result},
    files::{
        Parse, ParsedFile, StaticParser, Value,
        proc::process::NsDirectory,
        types::{OptionsFile, SelectableOptionsFile, ToggleFile, TogglableOptionsFile, ValueFile},
    },
    fs::{Entity, File, PathEntry, absolute},
};

/// Kind of a directory entry.
#[derive(Clone, Copy, Debug)]
pub enum EntryKind {
    /// Text file with a format-specific parser.
    Parsed(StaticParser),
    /// Directory of namespace links.
    Ns,
    Value,
    Toggle,
    Options,
    SelectableOptions,
    TogglableOptions,
    /// File that is only read or written as a whole.
    Raw,
    /// Subdirectory with dynamic content.
    Directory,
}

impl EntryKind {
    pub fn open<P: AsRef<Path>>(self, path: P) -> Entry {
        match self {
            EntryKind::Parsed(parser) => Entry::Parsed(ParsedFile::new(path, parser)),
            EntryKind::Ns => Entry::Ns(NsDirectory::new(path)),
            EntryKind::Value => Entry::Value(ValueFile::new(path)),
            EntryKind::Toggle => Entry::Toggle(ToggleFile::new(path)),
            EntryKind::Options => Entry::Options(OptionsFile::new(path)),
            EntryKind::SelectableOptions => {
                Entry::SelectableOptions(SelectableOptionsFile::new(path))
            }
            EntryKind::TogglableOptions => Entry::TogglableOptions(TogglableOptionsFile::new(path)),
            EntryKind::Raw => Entry::Raw(File::new(path)),
            EntryKind::Directory => Entry::Directory(PathEntry::new(path)),
        }
    }
}

/// Table of entry names and kinds.
pub type EntryTable = [(&'static str, EntryKind)];

/// An opened directory entry.
#[derive(Debug)]
pub enum Entry {
    Parsed(ParsedFile<StaticParser>),
    Ns(NsDirectory),
    Value(ValueFile),
    Toggle(ToggleFile),
    Options(OptionsFile),
    SelectableOptions(SelectableOptionsFile),
    TogglableOptions(TogglableOptionsFile),
    Raw(File),
    Directory(PathEntry),
}

macro_rules! entry_accessor {
    ($name:ident, $variant:ident, $type:ty) => {
        pub fn $name(&self) -> Option<&$type> {
            match self {
                Entry::$variant(inner) => Some(inner),
                _ => None,
            }
        }
    };
}

impl Entry {
    fn as_parse(&self) -> Option<&dyn Parse> {
        match self {
            Entry::Parsed(file) => Some(file),
            Entry::Ns(dir) => Some(dir),
            Entry::Value(file) => Some(file),
            Entry::Toggle(file) => Some(file),
            Entry::Options(file) => Some(file),
            Entry::SelectableOptions(file) => Some(file),
            Entry::TogglableOptions(file) => Some(file),
            Entry::Raw(_) | Entry::Directory(_) => None,
        }
    }

    fn as_entity(&self) -> &dyn Entity {
        match self {
            Entry::Parsed(file) => file,
            Entry::Ns(dir) => dir,
            Entry::Value(file) => file,
            Entry::Toggle(file) => file,
            Entry::Options(file) => file,
            Entry::SelectableOptions(file) => file,
            Entry::TogglableOptions(file) => file,
            Entry::Raw(file) => file,
            Entry::Directory(dir) => dir,
        }
    }

    pub fn is_parsable(&self) -> bool {
        self.as_parse().is_some()
    }

    /// Parse the entry, None if it doesn't exist anymore.
    pub fn parse(&self) -> Result<Option<Value>> {
        match self.as_parse() {
            Some(parse) => parse.parse(),
            None => Err(Error::NotParsable(self.name().to_string())),
        }
    }

    entry_accessor!(as_parsed, Parsed, ParsedFile<StaticParser>);
    entry_accessor!(as_ns, Ns, NsDirectory);
    entry_accessor!(as_value, Value, ValueFile);
    entry_accessor!(as_toggle, Toggle, ToggleFile);
    entry_accessor!(as_options, Options, OptionsFile);
    entry_accessor!(as_selectable_options, SelectableOptions, SelectableOptionsFile);
    entry_accessor!(as_togglable_options, TogglableOptions, TogglableOptionsFile);
    entry_accessor!(as_raw, Raw, File);
    entry_accessor!(as_directory, Directory, PathEntry);
}

impl Entity for Entry {
    fn path(&self) -> &Path {
        self.as_entity().path()
    }
}

/// A directory whose known entries are declared in a static table.
#[derive(Clone, Debug)]
pub struct Directory {
    path: PathBuf,
    table: &'static EntryTable,
}

impl Directory {
    pub fn new<P: AsRef<Path>>(path: P, table: &'static EntryTable) -> Self {
        Self {
            path: absolute(path),
            table,
        }
    }

    pub fn table(&self) -> &'static EntryTable {
        self.table
    }

    fn kind(&self, name: &str) -> Option<EntryKind> {
        self.table
            .iter()
            .find(|(entry_name, _)| *entry_name == name)
            .map(|(_, kind)| *kind)
    }

    /// Path of an entry in the directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Sorted names of the declared entries that currently exist.
    pub fn list(&self) -> Vec<&'static str> {
        let mut names = self
            .table
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| self.join(name).exists())
            .collect::<Vec<&'static str>>();
        names.sort_unstable();
        names
    }

    /// Sorted names of all the entries on disk, declared or not.
    pub fn listdir(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(|err| Error::io(&self.path, err))? {
            let entry = entry.map_err(|err| Error::io(&self.path, err))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort_unstable();
        Ok(names)
    }

    /// Open an entry.
    ///
    /// The name must be declared in the table and the sub-path must exist.
    pub fn get(&self, name: &str) -> Result<Entry> {
        let kind = self
            .kind(name)
            .ok_or_else(|| Error::UnknownEntry(name.to_string()))?;
        let path = self.join(name);
        if !path.exists() {
            return Err(Error::NotFound(path));
        }
        Ok(kind.open(path))
    }

    /// Existing entries in the order of [`Directory::list`].
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            dir: self,
            names: self.list().into_iter(),
        }
    }
}

impl Entity for Directory {
    fn path(&self) -> &Path {
        &self.path
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = (&'static str, Entry);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Iterator over the entries of a directory.
pub struct Entries<'a> {
    dir: &'a Directory,
    names: vec::IntoIter<&'static str>,
}

impl Iterator for Entries<'_> {
    type Item = (&'static str, Entry);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.next()?;
        // Names come from the table.
        let kind = self.dir.kind(name)?;
        Some((name, kind.open(self.dir.join(name))))
    }
}
