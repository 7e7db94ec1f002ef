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

use crate::axes::{Axes, PixelRect, tick_band};
use crate::chart::Chart;
use crate::err::SkipReason;
use crate::style::StyleContext;
use crate::svg::{Stroke, SvgCanvas, SvgDocument, TextStyle, approx_text_width};
use dock_viz_core::color::{ColorAssignment, Rgba, UNKNOWN_CELL};
use dock_viz_core::contrast::text_color;
use dock_viz_core::primitives::Interval;
use dock_viz_model::load::load_berth_assignments;
use dock_viz_model::rec::BerthRecord;
use dock_viz_model::resolve::{DatasetName, DatasetResolver};
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

const BAR_WIDTH: f64 = 0.6;
const BAR_HEIGHT: f64 = 0.8;
const X_PADDING: f64 = 0.8;
const BAR_LABEL_PT: f64 = 9.0;
const TICK_LABEL_PT: f64 = 10.0;
const TITLE_PT: f64 = 12.0;

// Subplot margins as fractions of the figure.
const MARGIN_LEFT: f64 = 0.18;
const MARGIN_RIGHT: f64 = 0.96;
const MARGIN_TOP: f64 = 0.88;
const MARGIN_BOTTOM: f64 = 0.18;

/// One bar per ship at its berth, ships stacked by id.
#[derive(Debug, Clone)]
pub struct BerthChart<'a> {
    records: Vec<BerthRecord>,
    colors: &'a ColorAssignment,
}

impl<'a> BerthChart<'a> {
    /// Records are ordered by ship id; ties keep their input order.
    pub fn new(mut records: Vec<BerthRecord>, colors: &'a ColorAssignment) -> Self {
        records.sort_by_key(|r| r.ship());
        Self { records, colors }
    }

    /// Finds and loads `berth_assignment.csv`. A missing or unreadable file skips the chart.
    #[instrument(level = "debug", skip_all)]
    pub fn locate<R: DatasetResolver>(
        resolver: &R,
        colors: &'a ColorAssignment,
    ) -> Result<Self, SkipReason> {
        let name = DatasetName::BerthAssignment;
        let path = resolver.resolve(name).map_err(|e| {
            info!(%e, "Berth chart skipped");
            SkipReason::DatasetMissing(name)
        })?;
        let table = load_berth_assignments(&path).map_err(|e| {
            warn!(%e, "Berth chart skipped");
            SkipReason::DatasetUnreadable(name)
        })?;
        Ok(Self::new(table.into_records(), colors))
    }

    #[inline]
    pub fn records(&self) -> &[BerthRecord] {
        &self.records
    }

    /// Distinct berths present in the data, ascending.
    pub fn berths(&self) -> Vec<i64> {
        self.records
            .iter()
            .map(|r| r.berth().value())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Chart for BerthChart<'_> {
    fn name(&self) -> &'static str {
        "berth"
    }

    fn file_name(&self) -> String {
        "berth_assignment.png".to_owned()
    }

    #[instrument(level = "debug", skip_all, fields(ships = self.records.len()))]
    fn compose(&self, style: &StyleContext) -> Result<SvgDocument, SkipReason> {
        let berths = self.berths();
        let (Some(&lo), Some(&hi)) = (berths.first(), berths.last()) else {
            return Err(SkipReason::NoData);
        };
        let n = self.records.len();

        let fig_width = style.inches(6.0);
        let fig_height = style.inches((n as f64 * 0.6).max(3.0));
        let tick_px = style.points(TICK_LABEL_PT);
        let title_px = style.points(TITLE_PT);

        let y_labels: Vec<(f64, String)> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, format!("Ship {}", r.ship().value())))
            .collect();
        let x_labels: Vec<(f64, String)> = berths
            .iter()
            .map(|&b| (b as f64, format!("berth{b}")))
            .collect();

        // Keep the subplot margins unless the tick labels need more room.
        let band = tick_band(style, tick_px);

        let widest = y_labels
            .iter()
            .map(|(_, l)| approx_text_width(l, tick_px))
            .fold(0.0, f64::max);
        let left = (fig_width * MARGIN_LEFT).max(band - tick_px + widest + style.points(6.0));
        let plot_width = fig_width * (MARGIN_RIGHT - MARGIN_LEFT);
        let top = fig_height * (1.0 - MARGIN_TOP);
        let plot_height = fig_height * (MARGIN_TOP - MARGIN_BOTTOM);
        let bottom = (fig_height * MARGIN_BOTTOM).max(band + tick_px * 2.5);

        let width = left + plot_width + fig_width * (1.0 - MARGIN_RIGHT);
        let height = top + plot_height + bottom;
        let mut canvas = SvgCanvas::new(style, width, height);

        let axes = Axes::new(
            PixelRect::new(left, top, plot_width, plot_height),
            Interval::new(lo as f64 - X_PADDING, hi as f64 + X_PADDING),
            Interval::new(-0.6, n as f64 - 0.4),
        );

        let edge = Stroke::new(Rgba::BLACK, style.points(1.0));
        let bar_label_px = style.points(BAR_LABEL_PT);
        for (i, rec) in self.records.iter().enumerate() {
            let b = rec.berth().value() as f64;
            let y = i as f64;
            let fill = self.colors.get_or(rec.ship(), UNKNOWN_CELL);
            let bar = axes.data_rect(
                b - BAR_WIDTH / 2.0,
                y - BAR_HEIGHT / 2.0,
                BAR_WIDTH,
                BAR_HEIGHT,
            );
            canvas.rect(bar.left(), bar.top(), bar.width(), bar.height(), fill, Some(edge));
            canvas.text(
                axes.px(b),
                axes.py(y),
                &format!("Ship {}", rec.ship().value()),
                &TextStyle::new(bar_label_px).color(text_color(fill)),
            );
        }

        axes.draw_frame(&mut canvas);
        axes.draw_y_ticks(&mut canvas, &y_labels, tick_px);
        axes.draw_x_ticks(&mut canvas, &x_labels, tick_px);
        axes.draw_x_label(&mut canvas, "Berth", band + tick_px * 0.8, tick_px);
        axes.draw_title(&mut canvas, "Berth assignment", title_px);
        Ok(canvas.finish())
    }
}
