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

//! Kernel tracer types.

use std::{collections::BTreeMap, fmt, sync::OnceLock};

/// A kind of kernel tracer such as `nop` or `function`.
pub trait TracerType: fmt::Debug + Send + Sync {
    /// Name written to `current_tracer`.
    fn name(&self) -> &str;
}

/// Tracer that does nothing.
#[derive(Debug, Default)]
pub struct NopTracer;

impl TracerType for NopTracer {
    fn name(&self) -> &str {
        "nop"
    }
}

/// Registry of supported tracer types.
#[derive(Debug, Default)]
pub struct TracerTypes {
    types: BTreeMap<String, Box<dyn TracerType>>,
}

impl TracerTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the tracer types known to the library.
    pub fn builtin() -> Self {
        let mut types = TracerTypes::new();
        types.add(NopTracer);
        types
    }

    /// Shared registry of the builtin types.
    pub fn builtin_ref() -> &'static TracerTypes {
        static BUILTIN: OnceLock<TracerTypes> = OnceLock::new();
        BUILTIN.get_or_init(TracerTypes::builtin)
    }

    /// Register a type, replacing any type with the same name.
    pub fn add<T: TracerType + 'static>(&mut self, tracer_type: T) {
        self.types
            .insert(tracer_type.name().to_string(), Box::new(tracer_type));
    }

    pub fn get(&self, name: &str) -> Option<&dyn TracerType> {
        self.types.get(name).map(|tracer_type| tracer_type.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
