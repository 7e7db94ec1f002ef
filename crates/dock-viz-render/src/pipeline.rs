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

//! # Run Pipeline
//!
//! One run finds the slot allocation export, renders every chart next to it and
//! reports what happened to each image. Only a missing, empty or oversized primary
//! dataset ends the run early; every other problem is confined to the chart it affects.

use crate::chart::{
    BerthChart, Chart, LegendChart, OverviewChart, RowChart, StartTimeChart, render_chart,
};
use crate::err::{RasterError, RenderError, SkipReason};
use crate::style::{StyleConfig, StyleContext};
use dock_viz_core::color::ColorAssignment;
use dock_viz_model::err::{DatasetNotFoundError, GridTooLargeError, LoadError};
use dock_viz_model::grid::SlotGrid;
use dock_viz_model::load::load_slot_allocations;
use dock_viz_model::resolve::{
    DEFAULT_SUBDIR_PREFIX, DatasetName, DatasetResolver, DirectoryResolver,
};
use serde::Deserialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Row images beyond this many are written but not echoed.
pub const ROW_ECHO_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    base_dir: PathBuf,
    subdir_prefix: String,
    style: StyleConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("output"),
            subdir_prefix: DEFAULT_SUBDIR_PREFIX.to_owned(),
            style: StyleConfig::default(),
        }
    }
}

impl RunConfig {
    #[inline]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[inline]
    pub fn subdir_prefix(&self) -> &str {
        &self.subdir_prefix
    }

    #[inline]
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    #[inline]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    #[inline]
    pub fn with_subdir_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.subdir_prefix = prefix.into();
        self
    }

    #[inline]
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }
}

impl Display for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RunConfig {{ base_dir: {}, subdir_prefix: {}, style: {} }}",
            self.base_dir.display(),
            self.subdir_prefix,
            self.style
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartKind {
    Overview,
    Row(usize),
    Legend,
    Berth,
    StartTimes,
}

#[derive(Debug)]
pub enum ChartOutcome {
    Generated(PathBuf),
    Skipped(SkipReason),
    Failed(RasterError),
}

impl ChartOutcome {
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ChartOutcome::Generated(path) => Some(path),
            _ => None,
        }
    }
}

impl From<Result<PathBuf, RenderError>> for ChartOutcome {
    fn from(result: Result<PathBuf, RenderError>) -> Self {
        match result {
            Ok(path) => ChartOutcome::Generated(path),
            Err(RenderError::Skipped(reason)) => ChartOutcome::Skipped(reason),
            Err(RenderError::Raster(e)) => ChartOutcome::Failed(e),
        }
    }
}

#[derive(Debug)]
pub struct ChartReport {
    kind: ChartKind,
    file_name: String,
    outcome: ChartOutcome,
}

impl ChartReport {
    #[inline]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn outcome(&self) -> &ChartOutcome {
        &self.outcome
    }
}

#[derive(Debug)]
pub enum RunStatus {
    Completed { out_dir: PathBuf },
    PrimaryMissing(DatasetNotFoundError),
    PrimaryUnreadable(LoadError),
    NoSlotData(PathBuf),
    GridTooLarge(GridTooLargeError),
}

/// What a run produced. `Display` gives the lines printed for the user.
#[derive(Debug)]
pub struct RunSummary {
    status: RunStatus,
    reports: Vec<ChartReport>,
}

impl RunSummary {
    #[inline]
    fn aborted(status: RunStatus) -> Self {
        Self {
            status,
            reports: Vec::new(),
        }
    }

    #[inline]
    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        !matches!(self.status, RunStatus::Completed { .. })
    }

    #[inline]
    pub fn reports(&self) -> &[ChartReport] {
        &self.reports
    }

    pub fn report(&self, kind: ChartKind) -> Option<&ChartReport> {
        self.reports.iter().find(|r| r.kind == kind)
    }

    pub fn generated(&self) -> impl Iterator<Item = &Path> + '_ {
        self.reports.iter().filter_map(|r| r.outcome.path())
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.status {
            RunStatus::PrimaryMissing(e) => return writeln!(f, "{e}"),
            RunStatus::PrimaryUnreadable(e) => return writeln!(f, "{e}"),
            RunStatus::GridTooLarge(e) => return writeln!(f, "{e}"),
            RunStatus::NoSlotData(path) => {
                return writeln!(f, "No slot data found in {}", path.display());
            }
            RunStatus::Completed { .. } => {}
        }

        let mut ordered: Vec<&ChartReport> = self.reports.iter().collect();
        ordered.sort_by_key(|r| r.kind);
        let mut rows_echoed = 0;
        for report in ordered {
            match (&report.kind, &report.outcome) {
                (ChartKind::Row(_), ChartOutcome::Generated(path)) => {
                    if rows_echoed < ROW_ECHO_LIMIT {
                        writeln!(f, "Row image: {}", path.display())?;
                        rows_echoed += 1;
                    }
                }
                (_, ChartOutcome::Generated(path)) => writeln!(f, "Generated {}", path.display())?,
                (_, ChartOutcome::Skipped(reason)) => {
                    writeln!(f, "Skipped {}: {reason}", report.file_name)?
                }
                (_, ChartOutcome::Failed(e)) => writeln!(f, "Failed {}: {e}", report.file_name)?,
            }
        }
        Ok(())
    }
}

/// Runs with directory-based dataset lookup as described by `config`.
pub fn run(config: &RunConfig) -> RunSummary {
    let style = StyleContext::new(config.style.clone());
    let primary =
        DirectoryResolver::new(&config.base_dir).with_prefix(config.subdir_prefix.clone());
    info!(
        base = %primary.base().display(),
        prefix = primary.prefix(),
        "Searching for slot allocations"
    );
    run_with(
        &primary,
        |out_dir| DirectoryResolver::new(out_dir).with_prefix(primary.prefix()),
        &style,
    )
}

/// Runs against arbitrary resolvers. `secondary` builds the resolver for the berth and
/// start-time datasets once the output directory is known.
#[instrument(level = "info", skip_all)]
pub fn run_with<P, S, F>(primary: &P, secondary: F, style: &StyleContext) -> RunSummary
where
    P: DatasetResolver + ?Sized,
    S: DatasetResolver,
    F: FnOnce(&Path) -> S,
{
    let csv_path = match primary.resolve(DatasetName::SlotAllocations) {
        Ok(path) => path,
        Err(e) => {
            warn!(%e, "No slot allocation dataset");
            return RunSummary::aborted(RunStatus::PrimaryMissing(e));
        }
    };
    let table = match load_slot_allocations(&csv_path) {
        Ok(table) => table,
        Err(e) => {
            warn!(%e, "Slot allocation dataset unreadable");
            return RunSummary::aborted(RunStatus::PrimaryUnreadable(e));
        }
    };
    if table.has_no_data() {
        warn!(path = %csv_path.display(), skipped = table.skipped(), "No slot data");
        return RunSummary::aborted(RunStatus::NoSlotData(csv_path));
    }

    let grid = match SlotGrid::build(table.records(), table.dims()) {
        Ok(grid) => grid,
        Err(e) => {
            warn!(path = %csv_path.display(), %e, "Slot grid too large");
            return RunSummary::aborted(RunStatus::GridTooLarge(e));
        }
    };
    let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
    let out_dir = csv_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    info!(
        path = %csv_path.display(),
        dims = %grid.dims(),
        stats = %grid.stats(),
        skipped = table.skipped(),
        "Slot allocations loaded"
    );

    let mut reports = Vec::with_capacity(grid.dims().rows() + 4);
    let mut record = |kind: ChartKind, file_name: String, outcome: ChartOutcome| {
        match &outcome {
            ChartOutcome::Generated(path) => info!(chart = %file_name, path = %path.display(), "Generated"),
            ChartOutcome::Skipped(reason) => info!(chart = %file_name, %reason, "Skipped"),
            ChartOutcome::Failed(e) => warn!(chart = %file_name, error = %e, "Failed"),
        }
        reports.push(ChartReport {
            kind,
            file_name,
            outcome,
        });
    };

    for r in 0..grid.dims().rows() {
        let chart = RowChart::new(&grid, r, &colors);
        record(
            ChartKind::Row(r),
            chart.file_name(),
            render_chart(&chart, style, &out_dir).into(),
        );
    }

    let overview = OverviewChart::new(&grid, &colors);
    record(
        ChartKind::Overview,
        overview.file_name(),
        render_chart(&overview, style, &out_dir).into(),
    );

    let legend = LegendChart::new(&colors);
    record(
        ChartKind::Legend,
        legend.file_name(),
        render_chart(&legend, style, &out_dir).into(),
    );

    let datasets = secondary(&out_dir);
    let berth_outcome = match BerthChart::locate(&datasets, &colors) {
        Ok(chart) => render_chart(&chart, style, &out_dir).into(),
        Err(reason) => ChartOutcome::Skipped(reason),
    };
    record(ChartKind::Berth, "berth_assignment.png".to_owned(), berth_outcome);

    let timeline_outcome = match StartTimeChart::locate(&datasets, &colors) {
        Ok(chart) => render_chart(&chart, style, &out_dir).into(),
        Err(reason) => ChartOutcome::Skipped(reason),
    };
    record(ChartKind::StartTimes, "start_times.png".to_owned(), timeline_outcome);

    RunSummary {
        status: RunStatus::Completed { out_dir },
        reports,
    }
}
