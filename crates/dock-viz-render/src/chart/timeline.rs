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
use crate::chart::legend::{LegendBox, LegendEntry, LegendMarker};
use crate::err::SkipReason;
use crate::style::StyleContext;
use crate::svg::{Anchor, Stroke, SvgCanvas, SvgDocument, TextStyle, approx_text_width};
use dock_viz_core::color::{ColorAssignment, Rgba, UNKNOWN_MARKER};
use dock_viz_core::id::ShipId;
use dock_viz_core::primitives::Interval;
use dock_viz_model::load::{load_compartment_start_times, load_ship_start_times};
use dock_viz_model::rec::{CompartmentStartRecord, ShipStartRecord};
use dock_viz_model::resolve::{DatasetName, DatasetResolver};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

const TITLE: &str = "Start times: e_s (diamond) and e_sk (circle)";
const TITLE_PT: f64 = 12.0;
const TICK_LABEL_PT: f64 = 10.0;
const ANNOTATION_PT: f64 = 7.0;
const ANNOTATION_OFFSET_PT: f64 = 4.0;
/// Marker areas in square points.
const SHIP_MARKER_AREA: f64 = 80.0;
const COMPARTMENT_MARKER_AREA: f64 = 30.0;
const GUIDE: Rgba = Rgba::from_rgb8(0xb0, 0xb0, 0xb0);

/// Vertical label positions tried in turn, in label heights.
const STAGGER: [f64; 3] = [0.0, -0.9, 0.9];

/// Ship and compartment start times on a shared time axis, one line per ship.
#[derive(Debug, Clone)]
pub struct StartTimeChart<'a> {
    ships: Vec<ShipId>,
    ship_starts: Vec<ShipStartRecord>,
    compartment_starts: BTreeMap<ShipId, Vec<CompartmentStartRecord>>,
    dropped: usize,
    colors: &'a ColorAssignment,
}

impl<'a> StartTimeChart<'a> {
    /// Compartment starts of ships without a ship-level start have no line to sit on
    /// and are dropped.
    pub fn new(
        ship_starts: Vec<ShipStartRecord>,
        compartment_starts: Vec<CompartmentStartRecord>,
        colors: &'a ColorAssignment,
    ) -> Self {
        let mut ships: Vec<ShipId> = ship_starts.iter().map(|r| r.ship()).collect();
        ships.sort_unstable();
        ships.dedup();

        let mut grouped: BTreeMap<ShipId, Vec<CompartmentStartRecord>> = BTreeMap::new();
        let mut dropped = 0;
        for rec in compartment_starts {
            if ships.binary_search(&rec.ship()).is_ok() {
                grouped.entry(rec.ship()).or_default().push(rec);
            } else {
                dropped += 1;
            }
        }
        for recs in grouped.values_mut() {
            recs.sort_by(|a, b| a.start().total_cmp(&b.start()));
        }
        if dropped > 0 {
            debug!(dropped, "Compartment starts without a ship start ignored");
        }

        Self {
            ships,
            ship_starts,
            compartment_starts: grouped,
            dropped,
            colors,
        }
    }

    /// Finds and loads `e_s.csv` and `e_sk.csv`. Both are required.
    #[instrument(level = "debug", skip_all)]
    pub fn locate<R: DatasetResolver>(
        resolver: &R,
        colors: &'a ColorAssignment,
    ) -> Result<Self, SkipReason> {
        let ship_path = find(resolver, DatasetName::ShipStartTimes)?;
        let compartment_path = find(resolver, DatasetName::CompartmentStartTimes)?;

        let ship_starts = load_ship_start_times(&ship_path).map_err(|e| {
            warn!(%e, "Start-time chart skipped");
            SkipReason::DatasetUnreadable(DatasetName::ShipStartTimes)
        })?;
        let compartment_starts = load_compartment_start_times(&compartment_path).map_err(|e| {
            warn!(%e, "Start-time chart skipped");
            SkipReason::DatasetUnreadable(DatasetName::CompartmentStartTimes)
        })?;
        Ok(Self::new(
            ship_starts.into_records(),
            compartment_starts.into_records(),
            colors,
        ))
    }

    /// Ships with a line of their own, ascending; index is the line.
    #[inline]
    pub fn ships(&self) -> &[ShipId] {
        &self.ships
    }

    /// Compartment starts of `ship`, earliest first.
    #[inline]
    pub fn compartment_starts(&self, ship: ShipId) -> &[CompartmentStartRecord] {
        self.compartment_starts
            .get(&ship)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of compartment starts dropped for lack of a ship line.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn line_of(&self, ship: ShipId) -> Option<f64> {
        self.ships.binary_search(&ship).ok().map(|i| i as f64)
    }

    fn time_range(&self) -> Option<Interval<f64>> {
        let ship_times = self.ship_starts.iter().map(|r| r.start());
        let compartment_times = self
            .compartment_starts
            .values()
            .flatten()
            .map(|r| r.start());
        Interval::hull(ship_times.chain(compartment_times))
    }
}

fn find<R: DatasetResolver>(resolver: &R, name: DatasetName) -> Result<PathBuf, SkipReason> {
    resolver.resolve(name).map_err(|e| {
        info!(%e, "Start-time chart skipped");
        SkipReason::DatasetMissing(name)
    })
}

/// Stagger level of each label in a left-to-right sequence of `[start, end]` spans.
///
/// A label that would overlap the previous one moves to the next level; anything else
/// stays on the line.
pub(crate) fn stagger_levels(spans: &[(f64, f64)]) -> Vec<usize> {
    let mut levels = Vec::with_capacity(spans.len());
    let mut prev: Option<(f64, usize)> = None;
    for &(start, end) in spans {
        let level = match prev {
            Some((prev_end, prev_level)) if start < prev_end => (prev_level + 1) % STAGGER.len(),
            _ => 0,
        };
        levels.push(level);
        prev = Some((end, level));
    }
    levels
}

/// Diameter in pixels of a marker with `area` square points.
#[inline]
fn marker_diameter(style: &StyleContext, area: f64) -> f64 {
    style.points(area.sqrt())
}

impl Chart for StartTimeChart<'_> {
    fn name(&self) -> &'static str {
        "start_times"
    }

    fn file_name(&self) -> String {
        "start_times.png".to_owned()
    }

    #[instrument(level = "debug", skip_all, fields(ships = self.ships.len()))]
    fn compose(&self, style: &StyleContext) -> Result<SvgDocument, SkipReason> {
        let Some(times) = self.time_range() else {
            return Err(SkipReason::NoData);
        };
        if self.ships.is_empty() {
            return Err(SkipReason::NoData);
        }
        let m = self.ships.len();

        let fig_width = style.inches(10.0);
        let fig_height = style.inches((m as f64 * 0.6).max(3.0));
        let tick_px = style.points(TICK_LABEL_PT);
        let title_px = style.points(TITLE_PT);
        let band = tick_band(style, tick_px);
        let pad = style.points(6.0);

        let y_labels: Vec<(f64, String)> = self
            .ships
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, format!("Ship {}", s.value())))
            .collect();
        let widest = y_labels
            .iter()
            .map(|(_, l)| approx_text_width(l, tick_px))
            .fold(0.0, f64::max);

        let left = pad + widest + band - tick_px;
        let top = pad + title_px * 1.6;
        let bottom = band + tick_px * 2.5;
        let frame = PixelRect::new(
            left,
            top,
            fig_width - left - pad,
            fig_height - top - bottom,
        );

        let legend = LegendBox::new(
            vec![
                LegendEntry::new(LegendMarker::Diamond(UNKNOWN_MARKER), "e_s (ship start)"),
                LegendEntry::new(LegendMarker::Circle(Rgba::BLACK), "e_sk (compartment)"),
            ],
            style,
        );
        let legend_gap = style.points(10.0);
        let width = fig_width + legend_gap + legend.width();
        let height = fig_height.max(legend.height() + 2.0 * pad);
        let mut canvas = SvgCanvas::new(style, width, height);

        let axes = Axes::new(
            frame,
            times.with_margin(0.05, 1.0),
            Interval::new(0.0, (m - 1) as f64).with_margin(0.05, 0.5),
        );

        let guide = Stroke::new(GUIDE.with_alpha(0.3), style.points(0.8)).dashed(
            style.points(3.7),
            style.points(1.6),
        );
        for i in 0..m {
            axes.draw_y_guide(&mut canvas, i as f64, guide);
        }

        let diamond_half = marker_diameter(style, SHIP_MARKER_AREA) / 2.0;
        for rec in &self.ship_starts {
            if let Some(y) = self.line_of(rec.ship()) {
                let color = self.colors.get_or(rec.ship(), UNKNOWN_MARKER);
                canvas.diamond(axes.px(rec.start()), axes.py(y), diamond_half, color, None);
            }
        }

        let circle_r = marker_diameter(style, COMPARTMENT_MARKER_AREA) / 2.0;
        let note_px = style.points(ANNOTATION_PT);
        let note_offset = style.points(ANNOTATION_OFFSET_PT);
        let note_style = TextStyle::new(note_px).anchor(Anchor::Start);
        for (ship, recs) in &self.compartment_starts {
            let Some(y) = self.line_of(*ship) else {
                continue;
            };
            let cy = axes.py(y);
            for rec in recs {
                canvas.circle(axes.px(rec.start()), cy, circle_r, Rgba::BLACK, None);
            }

            let notes: Vec<(f64, String)> = recs
                .iter()
                .filter_map(|r| {
                    r.compartment()
                        .map(|k| (axes.px(r.start()) + note_offset, format!("k{}", k.value())))
                })
                .collect();
            let spans: Vec<(f64, f64)> = notes
                .iter()
                .map(|(x, label)| (*x, x + approx_text_width(label, note_px)))
                .collect();
            for ((x, label), level) in notes.iter().zip(stagger_levels(&spans)) {
                let dy = STAGGER[level] * note_px;
                canvas.text(*x, cy + dy, label, &note_style);
            }
        }

        axes.draw_frame(&mut canvas);
        axes.draw_y_ticks(&mut canvas, &y_labels, tick_px);
        let x_ticks = axes.numeric_x_ticks(&canvas, 8);
        axes.draw_x_ticks(&mut canvas, &x_ticks, tick_px);
        axes.draw_x_label(&mut canvas, "Time (hours)", band + tick_px * 0.8, tick_px);
        axes.draw_title(&mut canvas, TITLE, title_px);
        legend.draw(
            &mut canvas,
            fig_width + legend_gap - pad,
            (height - legend.height()) / 2.0,
        );
        Ok(canvas.finish())
    }
}
