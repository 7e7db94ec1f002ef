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

use crate::grid::GridDims;
use crate::resolve::DatasetName;
use std::{fmt::Display, path::PathBuf};

#[derive(Debug)]
pub struct OpenDatasetError {
    path: PathBuf,
    source: std::io::Error,
}

impl OpenDatasetError {
    #[inline]
    pub fn new(path: PathBuf, source: std::io::Error) -> Self {
        Self { path, source }
    }

    #[inline]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Display for OpenDatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not open dataset {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for OpenDatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Failure to load a whole table. Problems with single rows never end up here.
#[derive(Debug)]
pub enum LoadError {
    Open(OpenDatasetError),
    Header(csv::Error),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Open(e) => write!(f, "{e}"),
            LoadError::Header(e) => write!(f, "Could not read header row: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Open(e) => Some(e),
            LoadError::Header(e) => Some(e),
        }
    }
}

impl From<OpenDatasetError> for LoadError {
    fn from(err: OpenDatasetError) -> Self {
        Self::Open(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        Self::Header(err)
    }
}

/// Why a single row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    Undecodable(String),
    MissingField(&'static str),
    InvalidInteger { column: &'static str, value: String },
    InvalidNumber { column: &'static str, value: String },
    NonFinite { column: &'static str, value: String },
}

impl Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RowError::*;
        match self {
            Undecodable(e) => write!(f, "Undecodable row: {e}"),
            MissingField(column) => write!(f, "Missing field `{column}`"),
            InvalidInteger { column, value } => {
                write!(f, "Field `{column}` is not an integer: {value:?}")
            }
            InvalidNumber { column, value } => {
                write!(f, "Field `{column}` is not a number: {value:?}")
            }
            NonFinite { column, value } => {
                write!(f, "Field `{column}` is not finite: {value:?}")
            }
        }
    }
}

impl std::error::Error for RowError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetNotFoundError {
    name: DatasetName,
    base: PathBuf,
}

impl DatasetNotFoundError {
    #[inline]
    pub fn new(name: DatasetName, base: PathBuf) -> Self {
        Self { name, base }
    }

    #[inline]
    pub fn name(&self) -> DatasetName {
        self.name
    }

    #[inline]
    pub fn base(&self) -> &PathBuf {
        &self.base
    }
}

impl Display for DatasetNotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not find {} under {} or its subdirectories",
            self.name.file_name(),
            self.base.display()
        )
    }
}

impl std::error::Error for DatasetNotFoundError {}

/// The data spans more cells than a grid may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTooLargeError {
    dims: GridDims,
    limit: usize,
}

impl GridTooLargeError {
    #[inline]
    pub fn new(dims: GridDims, limit: usize) -> Self {
        Self { dims, limit }
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Display for GridTooLargeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot grid of {} exceeds the limit of {} cells",
            self.dims, self.limit
        )
    }
}

impl std::error::Error for GridTooLargeError {}
