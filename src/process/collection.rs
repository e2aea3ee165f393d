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

use std::cmp::Ordering;

use super::{collector::Collector, filter::Filter, task::Process};
use crate::files::Value;

const DESCENDING_PREFIX: char = '-';

#[derive(Clone, Debug, PartialEq, Eq)]
struct SortKey {
    name: String,
    descending: bool,
}

impl SortKey {
    /// Key name optionally prefixed by `-` for descending order.
    fn parse(key: &str) -> Self {
        match key.strip_prefix(DESCENDING_PREFIX) {
            Some(name) => SortKey {
                name: name.to_string(),
                descending: true,
            },
            None => SortKey {
                name: key.to_string(),
                descending: false,
            },
        }
    }

    fn compare(&self, a: &Process, b: &Process) -> Ordering {
        let (a, b) = (a.get(&self.name), b.get(&self.name));
        let order = compare_values(a.as_ref(), b.as_ref());
        if self.descending { order.reverse() } else { order }
    }
}

/// Missing values come first, incomparable values are equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Processes returned by a collector, filtered and sorted.
///
/// Processes are collected again each time the collection is iterated.
pub struct Collection {
    collector: Collector,
    filters: Vec<Box<dyn Filter>>,
    sort_key: Option<SortKey>,
}

impl Default for Collection {
    fn default() -> Self {
        Collection::new()
    }
}

impl Collection {
    /// Collection of all the processes in /proc.
    pub fn new() -> Self {
        Collection::with_collector(Collector::default())
    }

    pub fn with_collector(collector: Collector) -> Self {
        Self {
            collector,
            filters: Vec::new(),
            sort_key: None,
        }
    }

    /// Sort by a stat or an attribute, descending if prefixed by `-`.
    pub fn sort_by(mut self, key: &str) -> Self {
        self.sort_key = Some(SortKey::parse(key));
        self
    }

    /// Add a filter, only processes accepted by all filters are returned.
    pub fn add_filter<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    fn accept(&self, process: &Process) -> bool {
        self.filters.iter().all(|filter| filter.accept(process))
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Process> + '_> {
        let processes = self
            .collector
            .collect()
            .filter(move |process| self.accept(process));
        match self.sort_key {
            Some(ref key) => {
                let mut processes = processes.collect::<Vec<Process>>();
                processes.sort_by(|a, b| key.compare(a, b));
                Box::new(processes.into_iter())
            }
            None => Box::new(processes),
        }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = Process;
    type IntoIter = Box<dyn Iterator<Item = Process> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {

    use rstest::rstest;
    use std::cmp::Ordering;

    use super::{Collection, SortKey, compare_values};
    use crate::{
        files::Value,
        process::{CommandNameFilter, Collector, Process},
        testing::ProcTree,
    };

    fn proc_tree() -> ProcTree {
        let tree = ProcTree::new();
        for (pid, comm) in [(10, "foo"), (20, "zza"), (30, "bar")] {
            tree.process_file(pid, "comm", &format!("{comm}\n"));
            tree.process_file(pid, "cmdline", &format!("{comm}\0"));
        }
        tree
    }

    fn pids(collection: &Collection) -> Vec<i32> {
        collection.iter().map(|process| process.pid()).collect()
    }

    #[rstest]
    #[case("comm", "comm", false)]
    #[case("-comm", "comm", true)]
    #[case("-", "", true)]
    fn test_sort_key(#[case] key: &str, #[case] name: &str, #[case] descending: bool) {
        let key = SortKey::parse(key);
        assert_eq!(name, key.name);
        assert_eq!(descending, key.descending);
    }

    #[test]
    fn test_compare_mixed_numbers() {
        let mut values = vec![Value::Int(100), Value::Float(0.5), Value::UInt(3), Value::Int(-2)];
        values.sort_by(|a, b| compare_values(Some(a), Some(b)));
        assert_eq!(
            vec![Value::Int(-2), Value::Float(0.5), Value::UInt(3), Value::Int(100)],
            values
        );
        assert_eq!(Ordering::Less, compare_values(None, Some(&Value::Float(0.0))));
    }

    #[test]
    fn test_unsorted() {
        let tree = proc_tree();
        let collection = Collection::with_collector(Collector::new(tree.root()));
        assert_eq!(vec![10, 20, 30], pids(&collection));
    }

    #[rstest]
    #[case("comm", vec![30, 10, 20])]
    #[case("-comm", vec![20, 10, 30])]
    #[case("-pid", vec![30, 20, 10])]
    fn test_sort_by(#[case] key: &str, #[case] expected: Vec<i32>) {
        let tree = proc_tree();
        let collection = Collection::with_collector(Collector::new(tree.root())).sort_by(key);
        assert_eq!(expected, pids(&collection));
    }

    #[test]
    fn test_sort_missing_values_first() {
        let tree = proc_tree();
        tree.process_file(40, "cmdline", "other\0");
        let collection = Collection::with_collector(Collector::new(tree.root())).sort_by("comm");
        assert_eq!(vec![40, 30, 10, 20], pids(&collection));
    }

    #[test]
    fn test_sort_stable() {
        let tree = ProcTree::new();
        for pid in [10, 20, 30] {
            tree.process_file(pid, "comm", "same\n");
        }
        let collection = Collection::with_collector(Collector::new(tree.root())).sort_by("-comm");
        assert_eq!(vec![10, 20, 30], pids(&collection));
    }

    #[test]
    fn test_filters() {
        let tree = proc_tree();
        let mut collection = Collection::with_collector(Collector::new(tree.root()));
        collection.add_filter(|process: &Process| process.pid() > 10);
        assert_eq!(vec![20, 30], pids(&collection));
        collection.add_filter(CommandNameFilter::new("bar"));
        assert_eq!(vec![30], pids(&collection));
    }

    #[test]
    fn test_iterate_again() {
        let tree = proc_tree();
        let collection = Collection::with_collector(Collector::new(tree.root()));
        assert_eq!(3, (&collection).into_iter().count());
        tree.process_file(40, "comm", "new\n");
        assert_eq!(4, (&collection).into_iter().count());
    }
}
