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

use crate::chart::Chart;
use crate::err::SkipReason;
use crate::style::StyleContext;
use crate::svg::{Anchor, Stroke, SvgCanvas, SvgDocument, TextStyle, approx_text_width};
use dock_viz_core::color::{ColorAssignment, Rgba};
use tracing::instrument;

pub(crate) const LEGEND_FONT_PT: f64 = 8.0;
const LEGEND_EDGE: Rgba = Rgba::rgb(0.8, 0.8, 0.8);

// Box metrics in multiples of the font size.
const BORDER_PAD: f64 = 0.4;
const HANDLE_LENGTH: f64 = 2.0;
const HANDLE_TEXT_PAD: f64 = 0.8;
const LABEL_SPACING: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LegendMarker {
    Swatch(Rgba),
    Diamond(Rgba),
    Circle(Rgba),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LegendEntry {
    marker: LegendMarker,
    label: String,
}

impl LegendEntry {
    #[inline]
    pub(crate) fn new(marker: LegendMarker, label: impl Into<String>) -> Self {
        Self {
            marker,
            label: label.into(),
        }
    }
}

/// One swatch per ship, in assignment order.
pub(crate) fn ship_entries(colors: &ColorAssignment) -> Vec<LegendEntry> {
    colors
        .iter()
        .map(|(ship, color)| {
            LegendEntry::new(LegendMarker::Swatch(color), format!("Ship {}", ship.value()))
        })
        .collect()
}

/// Framed list of legend entries, measured before it is placed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LegendBox {
    entries: Vec<LegendEntry>,
    font_px: f64,
}

impl LegendBox {
    pub(crate) fn new(entries: Vec<LegendEntry>, style: &StyleContext) -> Self {
        Self {
            entries,
            font_px: style.points(LEGEND_FONT_PT),
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn width(&self) -> f64 {
        let text = self
            .entries
            .iter()
            .map(|e| approx_text_width(&e.label, self.font_px))
            .fold(0.0, f64::max);
        self.font_px * (2.0 * BORDER_PAD + HANDLE_LENGTH + HANDLE_TEXT_PAD) + text
    }

    pub(crate) fn height(&self) -> f64 {
        let n = self.entries.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        self.font_px * (2.0 * BORDER_PAD + n + (n - 1.0) * LABEL_SPACING)
    }

    /// Draws the box with its top-left corner at `(left, top)`.
    pub(crate) fn draw(&self, canvas: &mut SvgCanvas<'_>, left: f64, top: f64) {
        if self.is_empty() {
            return;
        }
        let f = self.font_px;
        let edge = Stroke::new(LEGEND_EDGE, canvas.style().points(1.0));
        canvas.rect(left, top, self.width(), self.height(), Rgba::WHITE, Some(edge));

        let handle_left = left + BORDER_PAD * f;
        let text_left = handle_left + (HANDLE_LENGTH + HANDLE_TEXT_PAD) * f;
        let label = TextStyle::new(f).anchor(Anchor::Start);
        for (i, entry) in self.entries.iter().enumerate() {
            let cy = top + BORDER_PAD * f + i as f64 * (1.0 + LABEL_SPACING) * f + f / 2.0;
            let cx = handle_left + HANDLE_LENGTH * f / 2.0;
            match entry.marker {
                LegendMarker::Swatch(color) => {
                    canvas.rect(handle_left, cy - 0.35 * f, HANDLE_LENGTH * f, 0.7 * f, color, None)
                }
                LegendMarker::Diamond(color) => canvas.diamond(cx, cy, 0.45 * f, color, None),
                LegendMarker::Circle(color) => canvas.circle(cx, cy, 0.35 * f, color, None),
            }
            canvas.text(text_left, cy, &entry.label, &label);
        }
    }
}

/// Standalone image listing every ship next to its color.
#[derive(Debug, Clone, Copy)]
pub struct LegendChart<'a> {
    colors: &'a ColorAssignment,
}

impl<'a> LegendChart<'a> {
    #[inline]
    pub fn new(colors: &'a ColorAssignment) -> Self {
        Self { colors }
    }
}

impl Chart for LegendChart<'_> {
    fn name(&self) -> &'static str {
        "legend"
    }

    fn file_name(&self) -> String {
        "legend.png".to_owned()
    }

    #[instrument(level = "debug", skip_all, fields(ships = self.colors.len()))]
    fn compose(&self, style: &StyleContext) -> Result<SvgDocument, SkipReason> {
        if self.colors.is_empty() {
            return Err(SkipReason::EmptyLegend);
        }
        let legend = LegendBox::new(ship_entries(self.colors), style);
        let margin = style.points(4.0);
        let width = style
            .inches(2.5)
            .max(legend.width() + 2.0 * margin);
        let height = style
            .inches((0.25 * self.colors.len() as f64).max(1.5))
            .max(legend.height() + 2.0 * margin);

        let mut canvas = SvgCanvas::new(style, width, height);
        let left = (canvas.width() - legend.width()) / 2.0;
        let top = (canvas.height() - legend.height()) / 2.0;
        legend.draw(&mut canvas, left, top);
        Ok(canvas.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfigBuilder;
    use dock_viz_core::id::ShipId;

    fn style() -> StyleContext {
        StyleContext::new(StyleConfigBuilder::new().load_system_fonts(false).build())
    }

    #[test]
    fn lists_every_ship_in_order() {
        let colors = ColorAssignment::from_sorted([1, 4, 7].map(ShipId::new));
        let doc = LegendChart::new(&colors).compose(&style()).unwrap();
        let svg = doc.as_str();
        let p1 = svg.find(">Ship 1<").unwrap();
        let p4 = svg.find(">Ship 4<").unwrap();
        let p7 = svg.find(">Ship 7<").unwrap();
        assert!(p1 < p4 && p4 < p7);
        assert!(svg.contains(&colors.get(ShipId::new(4)).unwrap().to_hex()));
    }

    #[test]
    fn legend_box_is_centered_on_the_canvas() {
        let style = style();
        let colors = ColorAssignment::from_sorted([ShipId::new(3)]);
        let legend = LegendBox::new(ship_entries(&colors), &style);
        let doc = LegendChart::new(&colors).compose(&style).unwrap();
        let left = (doc.width() as f64 - legend.width()) / 2.0;
        let top = (doc.height() as f64 - legend.height()) / 2.0;
        let frame = format!(r#"<rect x="{left:.2}" y="{top:.2}""#);
        assert!(doc.as_str().contains(&frame), "no frame at {left:.2},{top:.2}");
    }

    #[test]
    fn size_follows_ship_count() {
        let style = style();
        let few = ColorAssignment::from_sorted([ShipId::new(1)]);
        let doc = LegendChart::new(&few).compose(&style).unwrap();
        assert_eq!(doc.width(), 375);
        assert_eq!(doc.height(), 225);

        let many = ColorAssignment::from_sorted((0..12).map(ShipId::new));
        let doc = LegendChart::new(&many).compose(&style).unwrap();
        assert!(doc.height() >= 450);
    }

    #[test]
    fn empty_ship_set_is_skipped() {
        let colors = ColorAssignment::from_sorted(std::iter::empty());
        assert_eq!(
            LegendChart::new(&colors).compose(&style()).unwrap_err(),
            SkipReason::EmptyLegend
        );
    }

    #[test]
    fn legend_box_measures_its_entries() {
        let style = style();
        let small = LegendBox::new(
            vec![LegendEntry::new(LegendMarker::Circle(Rgba::BLACK), "k")],
            &style,
        );
        let large = LegendBox::new(
            vec![
                LegendEntry::new(LegendMarker::Diamond(Rgba::BLACK), "e_s (ship start)"),
                LegendEntry::new(LegendMarker::Circle(Rgba::BLACK), "e_sk (compartment)"),
            ],
            &style,
        );
        assert!(large.width() > small.width());
        assert!(large.height() > small.height());
        assert_eq!(LegendBox::new(Vec::new(), &style).height(), 0.0);
    }
}
