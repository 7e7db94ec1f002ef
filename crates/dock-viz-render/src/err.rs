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

use dock_viz_model::resolve::DatasetName;
use resvg::usvg;
use std::{fmt::Display, path::PathBuf};

/// Why a chart produced no image. Skipping is an expected outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoData,
    EmptyLegend,
    DatasetMissing(DatasetName),
    DatasetUnreadable(DatasetName),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data to draw"),
            SkipReason::EmptyLegend => write!(f, "no ships to list in the legend"),
            SkipReason::DatasetMissing(name) => write!(f, "{name} not found"),
            SkipReason::DatasetUnreadable(name) => write!(f, "{name} could not be read"),
        }
    }
}

#[derive(Debug)]
pub enum RasterError {
    Parse(usvg::Error),
    Allocation { width: u32, height: u32 },
    Encode { path: PathBuf, message: String },
}

impl Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::Parse(e) => write!(f, "Generated SVG could not be parsed: {e}"),
            RasterError::Allocation { width, height } => {
                write!(f, "Could not allocate a {width}x{height} pixmap")
            }
            RasterError::Encode { path, message } => {
                write!(f, "Could not write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for RasterError {}

impl From<usvg::Error> for RasterError {
    fn from(err: usvg::Error) -> Self {
        Self::Parse(err)
    }
}

#[derive(Debug)]
pub enum RenderError {
    Skipped(SkipReason),
    Raster(RasterError),
}

impl RenderError {
    #[inline]
    pub fn is_skipped(&self) -> bool {
        matches!(self, RenderError::Skipped(_))
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Skipped(reason) => write!(f, "Skipped: {reason}"),
            RenderError::Raster(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<SkipReason> for RenderError {
    fn from(reason: SkipReason) -> Self {
        Self::Skipped(reason)
    }
}

impl From<RasterError> for RenderError {
    fn from(err: RasterError) -> Self {
        Self::Raster(err)
    }
}
