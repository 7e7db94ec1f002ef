// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Dataset Resolution
//!
//! The solver writes its CSV exports either directly into an output directory or into
//! one of its run-specific subdirectories. Renderers never search the filesystem
//! themselves; they ask a [`DatasetResolver`] for the path of a named dataset.

use crate::err::DatasetNotFoundError;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_SUBDIR_PREFIX: &str = "output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetName {
    SlotAllocations,
    BerthAssignment,
    ShipStartTimes,
    CompartmentStartTimes,
}

impl DatasetName {
    #[inline]
    pub const fn file_name(self) -> &'static str {
        match self {
            DatasetName::SlotAllocations => "slot_allocations.csv",
            DatasetName::BerthAssignment => "berth_assignment.csv",
            DatasetName::ShipStartTimes => "e_s.csv",
            DatasetName::CompartmentStartTimes => "e_sk.csv",
        }
    }
}

impl Display for DatasetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

pub trait DatasetResolver {
    fn resolve(&self, name: DatasetName) -> Result<PathBuf, DatasetNotFoundError>;
}

impl<R: DatasetResolver + ?Sized> DatasetResolver for &R {
    #[inline]
    fn resolve(&self, name: DatasetName) -> Result<PathBuf, DatasetNotFoundError> {
        (**self).resolve(name)
    }
}

/// Looks for `base/<file>` first, then for `base/<dir>/<file>` in every first-level
/// directory whose name starts with the prefix. Directories are visited in sorted
/// name order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResolver {
    base: PathBuf,
    prefix: String,
}

impl DirectoryResolver {
    #[inline]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            prefix: DEFAULT_SUBDIR_PREFIX.to_owned(),
        }
    }

    #[inline]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[inline]
    pub fn base(&self) -> &Path {
        &self.base
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn candidate_dirs(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(base = %self.base.display(), error = %e, "Base directory not listable");
                return Vec::new();
            }
        };

        let mut dirs: Vec<(String, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let path = entry.path();
                (name.starts_with(&self.prefix) && path.is_dir()).then_some((name, path))
            })
            .collect();
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        dirs.into_iter().map(|(_, path)| path).collect()
    }
}

impl DatasetResolver for DirectoryResolver {
    fn resolve(&self, name: DatasetName) -> Result<PathBuf, DatasetNotFoundError> {
        let direct = self.base.join(name.file_name());
        if direct.is_file() {
            return Ok(direct);
        }

        self.candidate_dirs()
            .into_iter()
            .map(|dir| dir.join(name.file_name()))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| DatasetNotFoundError::new(name, self.base.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, create_dir_all};
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            create_dir_all(parent).expect("create parent");
        }
        File::create(path).expect("create file");
    }

    #[test]
    fn direct_file_wins() {
        let tmp = TempDir::new().expect("tmp dir");
        touch(&tmp.path().join("slot_allocations.csv"));
        touch(&tmp.path().join("output_1/slot_allocations.csv"));

        let resolver = DirectoryResolver::new(tmp.path());
        let found = resolver.resolve(DatasetName::SlotAllocations).unwrap();
        assert_eq!(found, tmp.path().join("slot_allocations.csv"));
    }

    #[test]
    fn prefixed_subdirectory_is_searched() {
        let tmp = TempDir::new().expect("tmp dir");
        touch(&tmp.path().join("other/e_s.csv"));
        touch(&tmp.path().join("output_b/e_s.csv"));
        touch(&tmp.path().join("output_a/e_s.csv"));

        let resolver = DirectoryResolver::new(tmp.path());
        let found = resolver.resolve(DatasetName::ShipStartTimes).unwrap();
        assert_eq!(found, tmp.path().join("output_a/e_s.csv"));
    }

    #[test]
    fn non_prefixed_directories_are_ignored() {
        let tmp = TempDir::new().expect("tmp dir");
        touch(&tmp.path().join("runs/berth_assignment.csv"));

        let resolver = DirectoryResolver::new(tmp.path());
        let err = resolver.resolve(DatasetName::BerthAssignment).unwrap_err();
        assert_eq!(err.name(), DatasetName::BerthAssignment);

        let custom = DirectoryResolver::new(tmp.path()).with_prefix("run");
        assert_eq!(custom.base(), tmp.path());
        assert_eq!(custom.prefix(), "run");
        assert!(custom.resolve(DatasetName::BerthAssignment).is_ok());
    }

    #[test]
    fn only_first_level_is_searched() {
        let tmp = TempDir::new().expect("tmp dir");
        touch(&tmp.path().join("output_1/nested/e_sk.csv"));

        let resolver = DirectoryResolver::new(tmp.path());
        assert!(resolver.resolve(DatasetName::CompartmentStartTimes).is_err());
    }

    #[test]
    fn missing_base_is_not_found() {
        let tmp = TempDir::new().expect("tmp dir");
        let resolver = DirectoryResolver::new(tmp.path().join("does-not-exist"));
        let err = resolver.resolve(DatasetName::SlotAllocations).unwrap_err();
        assert!(err.to_string().contains("slot_allocations.csv"));
    }

    #[test]
    fn file_named_like_prefix_is_not_a_directory() {
        let tmp = TempDir::new().expect("tmp dir");
        touch(&tmp.path().join("output.txt"));
        let resolver = DirectoryResolver::new(tmp.path());
        assert!(resolver.resolve(DatasetName::SlotAllocations).is_err());
    }
}
