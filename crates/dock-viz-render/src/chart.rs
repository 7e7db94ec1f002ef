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

//! # Charts
//!
//! Every image the tool writes is a [`Chart`]: it composes an SVG document from data it
//! already holds, or explains why there is nothing to draw. [`render_chart`] turns a
//! composed chart into a PNG next to the input data.

pub mod berth;
pub mod legend;
pub mod overview;
pub mod row;
pub mod timeline;

use crate::axes::Axes;
use crate::err::{RenderError, SkipReason};
use crate::raster::rasterize;
use crate::style::StyleContext;
use crate::svg::{Stroke, SvgCanvas, SvgDocument, TextStyle};
use dock_viz_core::color::{ColorAssignment, EMPTY_CELL, Rgba, UNKNOWN_CELL};
use dock_viz_core::contrast::text_color;
use dock_viz_model::grid::Cell;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub use berth::BerthChart;
pub use legend::LegendChart;
pub use overview::OverviewChart;
pub use row::RowChart;
pub use timeline::StartTimeChart;

/// Cell outline width in points.
const CELL_EDGE_PT: f64 = 0.3;

pub trait Chart {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// File name of the image inside the output directory.
    fn file_name(&self) -> String;

    fn compose(&self, style: &StyleContext) -> Result<SvgDocument, SkipReason>;
}

impl<C: Chart + ?Sized> Chart for &C {
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn file_name(&self) -> String {
        (**self).file_name()
    }

    #[inline]
    fn compose(&self, style: &StyleContext) -> Result<SvgDocument, SkipReason> {
        (**self).compose(style)
    }
}

/// Composes `chart` and writes it as PNG into `out_dir`, returning the image path.
#[instrument(level = "debug", skip_all, fields(chart = chart.name()))]
pub fn render_chart<C: Chart + ?Sized>(
    chart: &C,
    style: &StyleContext,
    out_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let doc = chart.compose(style)?;
    let path = out_dir.join(chart.file_name());
    rasterize(&doc, style, &path)?;
    debug!(path = %path.display(), "Chart rendered");
    Ok(path)
}

/// Cell label size in points: `base - n / divisor`, truncated, never below `floor`.
#[inline]
pub(crate) fn label_font_size(n: usize, base: f64, divisor: f64, floor: f64) -> f64 {
    (base - n as f64 / divisor).trunc().max(floor)
}

#[inline]
pub(crate) fn cell_label(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Occupied { ship, compartment } => {
            Some(format!("S{}K{}", ship.value(), compartment.value()))
        }
    }
}

#[inline]
pub(crate) fn cell_fill(cell: &Cell, colors: &ColorAssignment) -> Rgba {
    match cell {
        Cell::Empty => EMPTY_CELL,
        Cell::Occupied { ship, .. } => colors.get_or(*ship, UNKNOWN_CELL),
    }
}

/// Draws `cells` as unit squares `[v, v + 1] x [0, 1]` of `axes`, labelling occupied
/// ones in a color that stays readable on the fill.
pub(crate) fn draw_cell_row(
    canvas: &mut SvgCanvas<'_>,
    axes: &Axes,
    cells: &[Cell],
    colors: &ColorAssignment,
    label_px: f64,
) {
    let edge = Stroke::new(Rgba::BLACK, canvas.style().points(CELL_EDGE_PT));
    for (v, cell) in cells.iter().enumerate() {
        let x = v as f64;
        let fill = cell_fill(cell, colors);
        let r = axes.data_rect(x, 0.0, 1.0, 1.0);
        canvas.rect(r.left(), r.top(), r.width(), r.height(), fill, Some(edge));
        if let Some(label) = cell_label(cell) {
            canvas.text(
                axes.px(x + 0.5),
                axes.py(0.5),
                &label,
                &TextStyle::new(label_px).color(text_color(fill)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_viz_core::id::{CompartmentId, ShipId};

    #[test]
    fn label_size_shrinks_with_cell_count_down_to_floor() {
        assert_eq!(label_font_size(4, 12.0, 4.0, 6.0), 11.0);
        assert_eq!(label_font_size(10, 12.0, 4.0, 6.0), 9.0);
        assert_eq!(label_font_size(40, 12.0, 4.0, 6.0), 6.0);
        assert_eq!(label_font_size(12, 10.0, 6.0, 5.0), 8.0);
        assert_eq!(label_font_size(200, 10.0, 6.0, 5.0), 5.0);
    }

    #[test]
    fn labels_name_ship_and_compartment() {
        let cell = Cell::Occupied {
            ship: ShipId::new(2),
            compartment: CompartmentId::UNSET,
        };
        assert_eq!(cell_label(&cell).as_deref(), Some("S2K-1"));
        assert_eq!(cell_label(&Cell::Empty), None);
    }

    #[test]
    fn unknown_ships_get_neutral_fill() {
        let colors = ColorAssignment::from_sorted([ShipId::new(1)]);
        let known = Cell::Occupied {
            ship: ShipId::new(1),
            compartment: CompartmentId::new(0),
        };
        let unknown = Cell::Occupied {
            ship: ShipId::new(9),
            compartment: CompartmentId::new(0),
        };
        assert_eq!(cell_fill(&known, &colors), colors.get(ShipId::new(1)).unwrap());
        assert_eq!(cell_fill(&unknown, &colors), UNKNOWN_CELL);
        assert_eq!(cell_fill(&Cell::Empty, &colors), EMPTY_CELL);
    }
}
