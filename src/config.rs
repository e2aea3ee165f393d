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

//! Library settings.
//!
//! Settings are read from an INI file:
//!
//! ```ini
//! [paths]
//! proc = /proc
//! tracing = /sys/kernel/debug/tracing
//! ```

use getset::{Getters, Setters};
use light_ini::{IniHandler, IniParser};
use smart_default::SmartDefault;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const APP_NAME: &str = "lxstats";
const CONFIG_FILE_NAME: &str = "lxstats.ini";

const SECTION_PATHS: &str = "paths";
const KEY_PROC: &str = "proc";
const KEY_TRACING: &str = "tracing";

#[derive(thiserror::Error, Debug)]
enum ConfigError {
    #[error("{0}: unknown section")]
    UnknownSection(String),
    #[error("{0}: unknown key")]
    UnknownKey(String),
    #[error("{0}: option outside of a section")]
    NoSection(String),
}

/// Paths of the pseudo-filesystems.
#[derive(Clone, Debug, PartialEq, Eq, SmartDefault, Getters, Setters)]
pub struct Settings {
    #[default(PathBuf::from("/proc"))]
    #[getset(get = "pub", set = "pub")]
    proc_root: PathBuf,
    #[default(PathBuf::from("/sys/kernel/debug/tracing"))]
    #[getset(get = "pub", set = "pub")]
    tracing_root: PathBuf,
}

struct SettingsHandler<'a> {
    settings: &'a mut Settings,
    section: Option<String>,
}

impl IniHandler for SettingsHandler<'_> {
    type Error = ConfigError;

    fn section(&mut self, name: &str) -> std::result::Result<(), Self::Error> {
        if name != SECTION_PATHS {
            return Err(ConfigError::UnknownSection(name.to_string()));
        }
        self.section = Some(name.to_string());
        Ok(())
    }

    fn option(&mut self, key: &str, value: &str) -> std::result::Result<(), Self::Error> {
        if self.section.is_none() {
            return Err(ConfigError::NoSection(key.to_string()));
        }
        match key {
            KEY_PROC => self.settings.set_proc_root(PathBuf::from(value)),
            KEY_TRACING => self.settings.set_tracing_root(PathBuf::from(value)),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(())
    }
}

impl Settings {
    /// Read settings from a file, missing keys keep their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = Settings::default();
        let mut handler = SettingsHandler {
            settings: &mut settings,
            section: None,
        };
        IniParser::new(&mut handler)
            .parse_file(path)
            .map_err(|err| Error::Config(format!("{}: {err:?}", path.display())))?;
        Ok(settings)
    }

    /// Read the first configuration file found in XDG directories.
    ///
    /// Without configuration file, default settings are returned.
    pub fn load() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME);
        match xdg_dirs.find_config_file(CONFIG_FILE_NAME) {
            Some(path) => {
                log::debug!("reading configuration {}", path.display());
                Settings::from_file(path)
            }
            None => Ok(Settings::default()),
        }
    }
}
