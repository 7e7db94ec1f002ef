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

use crate::axes::{Axes, PixelRect};
use crate::chart::legend::{LegendBox, ship_entries};
use crate::chart::{Chart, draw_cell_row, label_font_size};
use crate::err::SkipReason;
use crate::style::StyleContext;
use crate::svg::{Anchor, Baseline, SvgCanvas, SvgDocument, TextStyle, approx_text_width};
use dock_viz_core::{color::ColorAssignment, primitives::Interval};
use dock_viz_model::grid::SlotGrid;
use tracing::instrument;

const TITLE: &str = "Slot allocations overview (rows stacked)";
const TITLE_PT: f64 = 12.0;
const ROW_LABEL_PT: f64 = 10.0;
const ROW_LABEL_PAD_PT: f64 = 20.0;
/// Vertical share of each row band left blank between strips.
const ROW_GAP: f64 = 0.2;

/// All grid rows stacked top to bottom, with the ship legend to the right.
#[derive(Debug, Clone, Copy)]
pub struct OverviewChart<'a> {
    grid: &'a SlotGrid,
    colors: &'a ColorAssignment,
}

impl<'a> OverviewChart<'a> {
    #[inline]
    pub fn new(grid: &'a SlotGrid, colors: &'a ColorAssignment) -> Self {
        Self { grid, colors }
    }
}

impl Chart for OverviewChart<'_> {
    fn name(&self) -> &'static str {
        "overview"
    }

    fn file_name(&self) -> String {
        "slots_overview.png".to_owned()
    }

    #[instrument(level = "debug", skip_all, fields(dims = %self.grid.dims()))]
    fn compose(&self, style: &StyleContext) -> Result<SvgDocument, SkipReason> {
        if self.grid.is_empty() {
            return Err(SkipReason::NoData);
        }
        let rows = self.grid.dims().rows();
        let n = self.grid.dims().slots_per_row();

        let plot_width = style.inches((n as f64 / 4.0).max(6.0));
        let plot_height = style.inches((rows as f64 * 0.6).max(2.0));

        let pad = style.points(6.0);
        let title_px = style.points(TITLE_PT);
        let row_label_px = style.points(ROW_LABEL_PT);
        let widest_label = format!("R{}", rows.saturating_sub(1));
        let left = pad + approx_text_width(&widest_label, row_label_px) + style.points(ROW_LABEL_PAD_PT);
        let top = pad + title_px * 1.6;

        // The legend sits in its own column so it never covers a cell.
        let legend = LegendBox::new(ship_entries(self.colors), style);
        let legend_gap = if legend.is_empty() { 0.0 } else { style.points(10.0) };
        let width = plot_width + legend_gap + legend.width();
        let height = plot_height.max(legend.height() + 2.0 * pad);
        let mut canvas = SvgCanvas::new(style, width, height);

        let strips_width = (plot_width - left - pad).max(1.0);
        let band = (height - top - pad) / rows as f64;
        let strip_height = band * (1.0 - ROW_GAP);
        let label_px = style.points(label_font_size(n, 10.0, 6.0, 5.0));
        let row_label = TextStyle::new(row_label_px).anchor(Anchor::End);

        for (r, cells) in self.grid.rows().enumerate() {
            let strip_top = top + r as f64 * band + (band - strip_height) / 2.0;
            let axes = Axes::new(
                PixelRect::new(left, strip_top, strips_width, strip_height),
                Interval::new(0.0, n as f64),
                Interval::new(0.0, 1.0),
            );
            draw_cell_row(&mut canvas, &axes, cells, self.colors, label_px);
            axes.draw_frame(&mut canvas);
            canvas.text(
                left - style.points(ROW_LABEL_PAD_PT) / 2.0,
                axes.frame().center_y(),
                &format!("R{r}"),
                &row_label,
            );
        }

        canvas.text(
            left + strips_width / 2.0,
            pad + title_px,
            TITLE,
            &TextStyle::new(title_px).baseline(Baseline::Alphabetic),
        );
        legend.draw(
            &mut canvas,
            plot_width + legend_gap - pad,
            (height - legend.height()) / 2.0,
        );
        Ok(canvas.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfigBuilder;
    use dock_viz_core::id::{CompartmentId, ShipId};
    use dock_viz_model::grid::GridDims;
    use dock_viz_model::rec::AllocationRecord;

    fn style() -> StyleContext {
        StyleContext::new(StyleConfigBuilder::new().load_system_fonts(false).build())
    }

    fn grid(records: &[AllocationRecord]) -> SlotGrid {
        SlotGrid::build(records, GridDims::infer(records)).unwrap()
    }

    #[test]
    fn stacks_every_row_with_labels_and_legend() {
        let records = [
            AllocationRecord::new(ShipId::new(1), CompartmentId::new(0), 0, 0),
            AllocationRecord::new(ShipId::new(1), CompartmentId::new(1), 0, 1),
            AllocationRecord::new(ShipId::new(2), CompartmentId::UNSET, 1, 0),
            AllocationRecord::new(ShipId::new(3), CompartmentId::new(2), 2, 1),
        ];
        let grid = grid(&records);
        let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
        let doc = OverviewChart::new(&grid, &colors).compose(&style()).unwrap();
        let svg = doc.as_str();

        for needle in [">R0<", ">R1<", ">R2<", ">S1K0<", ">S2K-1<", ">S3K2<", ">Ship 3<", TITLE] {
            assert!(svg.contains(needle), "missing {needle}");
        }
        // The legend column widens the canvas beyond the six-inch plot area.
        assert!(doc.width() > 900);
        assert_eq!(doc.height(), 300);
    }

    #[test]
    fn single_row_grid_renders() {
        let records = [AllocationRecord::new(ShipId::new(5), CompartmentId::new(0), 0, 3)];
        let grid = grid(&records);
        let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
        let doc = OverviewChart::new(&grid, &colors).compose(&style()).unwrap();
        assert!(doc.as_str().contains(">R0<"));
        assert!(!doc.as_str().contains(">R1<"));
        assert_eq!(doc.as_str().matches(">S5K0<").count(), 1);
    }

    #[test]
    fn empty_grid_is_no_data() {
        let grid = grid(&[]);
        let colors = ColorAssignment::default();
        assert_eq!(
            OverviewChart::new(&grid, &colors).compose(&style()).unwrap_err(),
            SkipReason::NoData
        );
    }
}
