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

//! # Dock Visualization Rendering (`dock-viz-render`)
//!
//! Turns slot grids, berth assignments and start times into PNG charts. Every chart is
//! composed as SVG first and rasterized with `resvg`, so layout code never touches
//! pixels directly.
//!
//! ## Key Data Structures
//!
//! - **`StyleContext`**: fonts, resolution and number formatting for one run, built once
//!   from a `StyleConfig` and passed to every chart.
//!
//! - **`Chart`**: the seam every image implements. `compose` either returns an
//!   `SvgDocument` or a `SkipReason` explaining why there is nothing to draw.
//!
//! - **`RowChart`**, **`OverviewChart`**, **`LegendChart`**, **`BerthChart`**,
//!   **`StartTimeChart`**: the five images of a run.
//!
//! - **`RunSummary`**: per-chart outcome of [`pipeline::run`], printable as the lines a
//!   user sees.
//!
//! Skipping a chart is an ordinary outcome. A chart that fails to rasterize is recorded
//! and the run goes on with the next one.

pub mod axes;
pub mod chart;
pub mod err;
pub mod pipeline;
pub mod raster;
pub mod style;
pub mod svg;

pub mod prelude {
    pub use crate::chart::{
        BerthChart, Chart, LegendChart, OverviewChart, RowChart, StartTimeChart, render_chart,
    };
    pub use crate::err::{RasterError, RenderError, SkipReason};
    pub use crate::pipeline::{
        ChartKind, ChartOutcome, ChartReport, RunConfig, RunStatus, RunSummary, run, run_with,
    };
    pub use crate::style::{StyleConfig, StyleConfigBuilder, StyleContext};
}
