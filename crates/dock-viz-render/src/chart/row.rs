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
use crate::chart::{Chart, draw_cell_row, label_font_size};
use crate::err::SkipReason;
use crate::style::StyleContext;
use crate::svg::{SvgCanvas, SvgDocument};
use dock_viz_core::{color::ColorAssignment, primitives::Interval};
use dock_viz_model::grid::SlotGrid;
use tracing::instrument;

const TITLE_PT: f64 = 12.0;

/// One grid row as a horizontal strip of cells.
#[derive(Debug, Clone, Copy)]
pub struct RowChart<'a> {
    grid: &'a SlotGrid,
    row: usize,
    colors: &'a ColorAssignment,
}

impl<'a> RowChart<'a> {
    #[inline]
    pub fn new(grid: &'a SlotGrid, row: usize, colors: &'a ColorAssignment) -> Self {
        Self { grid, row, colors }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }
}

impl Chart for RowChart<'_> {
    fn name(&self) -> &'static str {
        "row"
    }

    fn file_name(&self) -> String {
        format!("row_{:02}.png", self.row)
    }

    #[instrument(level = "debug", skip_all, fields(row = self.row))]
    fn compose(&self, style: &StyleContext) -> Result<SvgDocument, SkipReason> {
        let cells = match self.grid.row(self.row) {
            Some(cells) if !cells.is_empty() => cells,
            _ => return Err(SkipReason::NoData),
        };
        let n = cells.len();

        let width = style.inches((n as f64 / 4.0).max(6.0));
        let height = style.inches(1.2);
        let mut canvas = SvgCanvas::new(style, width, height);

        let pad = style.points(6.0);
        let title_px = style.points(TITLE_PT);
        let top = pad + title_px * 1.4;
        let axes = Axes::new(
            PixelRect::new(pad, top, width - 2.0 * pad, height - top - pad),
            Interval::new(0.0, n as f64),
            Interval::new(0.0, 1.0),
        );

        let label_px = style.points(label_font_size(n, 12.0, 4.0, 6.0));
        draw_cell_row(&mut canvas, &axes, cells, self.colors, label_px);
        axes.draw_frame(&mut canvas);
        axes.draw_title(&mut canvas, &format!("Row {}", self.row), title_px);
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

    fn grid() -> SlotGrid {
        let records = vec![
            AllocationRecord::new(ShipId::new(1), CompartmentId::new(0), 0, 0),
            AllocationRecord::new(ShipId::new(1), CompartmentId::new(1), 0, 1),
            AllocationRecord::new(ShipId::new(2), CompartmentId::UNSET, 1, 0),
        ];
        let dims = GridDims::infer(&records);
        SlotGrid::build(&records, dims).unwrap()
    }

    #[test]
    fn file_names_are_zero_padded() {
        let grid = grid();
        let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
        assert_eq!(RowChart::new(&grid, 0, &colors).file_name(), "row_00.png");
        assert_eq!(RowChart::new(&grid, 7, &colors).file_name(), "row_07.png");
        assert_eq!(RowChart::new(&grid, 123, &colors).file_name(), "row_123.png");
    }

    #[test]
    fn draws_labels_only_for_occupied_cells() {
        let grid = grid();
        let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
        let style = style();

        let doc = RowChart::new(&grid, 0, &colors).compose(&style).unwrap();
        assert!(doc.as_str().contains(">S1K0<"));
        assert!(doc.as_str().contains(">S1K1<"));
        assert!(doc.as_str().contains(">Row 0<"));
        // Minimum figure width is six inches.
        assert_eq!(doc.width(), 900);
        assert_eq!(doc.height(), 180);

        let doc = RowChart::new(&grid, 1, &colors).compose(&style).unwrap();
        assert!(doc.as_str().contains(">S2K-1<"));
        assert!(!doc.as_str().contains(">S1K"));
        assert!(doc.as_str().contains("#f2f2f2"));
    }

    #[test]
    fn wide_rows_grow_the_figure() {
        let records: Vec<_> = (0..40)
            .map(|slot| AllocationRecord::new(ShipId::new(1), CompartmentId::new(slot), 0, slot))
            .collect();
        let grid = SlotGrid::build(&records, GridDims::infer(&records)).unwrap();
        let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
        let doc = RowChart::new(&grid, 0, &colors).compose(&style()).unwrap();
        assert_eq!(doc.width(), 1500);
    }

    #[test]
    fn missing_row_is_no_data() {
        let grid = grid();
        let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
        assert_eq!(
            RowChart::new(&grid, 5, &colors).compose(&style()).unwrap_err(),
            SkipReason::NoData
        );
    }
}
