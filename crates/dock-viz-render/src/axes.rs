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

//! # Axes
//!
//! Maps data coordinates onto a pixel frame (y pointing up, as on a plot) and draws
//! the usual decorations: frame, ticks, tick labels, axis labels and title.

use crate::style::StyleContext;
use crate::svg::{Anchor, Baseline, Stroke, SvgCanvas, TextStyle};
use dock_viz_core::{color::Rgba, primitives::Interval};

/// Tick mark length in points.
const TICK_LENGTH_PT: f64 = 3.5;
/// Gap between a tick mark and its label, in points.
const TICK_PAD_PT: f64 = 3.5;
const FRAME_WIDTH_PT: f64 = 0.8;

/// Axis-aligned rectangle in pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PixelRect {
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Step of roughly `span / target` rounded to 1, 2 or 5 times a power of ten.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Tick positions inside `range`, all multiples of one nice step.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    step: f64,
    values: Vec<f64>,
}

impl Ticks {
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

pub fn nice_ticks(range: Interval<f64>, target: usize) -> Ticks {
    let step = nice_step(range.length(), target);
    let first = (range.start() / step).ceil() as i64;
    let last = (range.end() / step).floor() as i64;
    let values = if first <= last && last - first <= 1_000 {
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        Vec::new()
    };
    Ticks { step, values }
}

/// A data window drawn into a pixel frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    frame: PixelRect,
    x: Interval<f64>,
    y: Interval<f64>,
}

impl Axes {
    #[inline]
    pub fn new(frame: PixelRect, x: Interval<f64>, y: Interval<f64>) -> Self {
        Self { frame, x, y }
    }

    #[inline]
    pub fn frame(&self) -> PixelRect {
        self.frame
    }

    #[inline]
    pub fn x_range(&self) -> Interval<f64> {
        self.x
    }

    #[inline]
    pub fn y_range(&self) -> Interval<f64> {
        self.y
    }

    /// Pixel column of data `x`.
    #[inline]
    pub fn px(&self, x: f64) -> f64 {
        self.frame.left + self.x.normalize(x) * self.frame.width
    }

    /// Pixel row of data `y`; larger values are drawn higher up.
    #[inline]
    pub fn py(&self, y: f64) -> f64 {
        self.frame.bottom() - self.y.normalize(y) * self.frame.height
    }

    /// Pixel length of a data distance along x.
    #[inline]
    pub fn sx(&self, dx: f64) -> f64 {
        scale(dx, self.x, self.frame.width)
    }

    #[inline]
    pub fn sy(&self, dy: f64) -> f64 {
        scale(dy, self.y, self.frame.height)
    }

    /// Pixel rectangle of the data rectangle with lower-left corner `(x, y)`.
    pub fn data_rect(&self, x: f64, y: f64, w: f64, h: f64) -> PixelRect {
        PixelRect::new(self.px(x), self.py(y + h), self.sx(w), self.sy(h))
    }

    pub fn draw_frame(&self, canvas: &mut SvgCanvas<'_>) {
        let width = canvas.style().points(FRAME_WIDTH_PT);
        canvas.rect(
            self.frame.left,
            self.frame.top,
            self.frame.width,
            self.frame.height,
            Rgba::WHITE.with_alpha(0.0),
            Some(Stroke::new(Rgba::BLACK, width)),
        );
    }

    /// Tick marks below the frame with their labels underneath.
    pub fn draw_x_ticks(&self, canvas: &mut SvgCanvas<'_>, ticks: &[(f64, String)], font_px: f64) {
        let style = canvas.style();
        let len = style.points(TICK_LENGTH_PT);
        let pad = style.points(TICK_PAD_PT);
        let stroke = Stroke::new(Rgba::BLACK, style.points(FRAME_WIDTH_PT));
        let text = TextStyle::new(font_px).baseline(Baseline::Hanging);
        let bottom = self.frame.bottom();
        for (value, label) in ticks {
            let x = self.px(*value);
            canvas.line(x, bottom, x, bottom + len, stroke);
            canvas.text(x, bottom + len + pad, label, &text);
        }
    }

    /// Tick marks left of the frame with right-aligned labels.
    pub fn draw_y_ticks(&self, canvas: &mut SvgCanvas<'_>, ticks: &[(f64, String)], font_px: f64) {
        let style = canvas.style();
        let len = style.points(TICK_LENGTH_PT);
        let pad = style.points(TICK_PAD_PT);
        let stroke = Stroke::new(Rgba::BLACK, style.points(FRAME_WIDTH_PT));
        let text = TextStyle::new(font_px).anchor(Anchor::End);
        let left = self.frame.left;
        for (value, label) in ticks {
            let y = self.py(*value);
            canvas.line(left - len, y, left, y, stroke);
            canvas.text(left - len - pad, y, label, &text);
        }
    }

    /// Evenly spaced numeric ticks along x, formatted by the style.
    pub fn numeric_x_ticks(&self, canvas: &SvgCanvas<'_>, target: usize) -> Vec<(f64, String)> {
        let ticks = nice_ticks(self.x, target);
        ticks
            .values()
            .iter()
            .map(|&v| (v, canvas.style().format_tick(v, ticks.step())))
            .collect()
    }

    /// Dashed horizontal guide spanning the frame at data `y`.
    pub fn draw_y_guide(&self, canvas: &mut SvgCanvas<'_>, y: f64, stroke: Stroke) {
        let y = self.py(y);
        canvas.line(self.frame.left, y, self.frame.right(), y, stroke);
    }

    /// Centered label `offset` pixels below the frame.
    pub fn draw_x_label(&self, canvas: &mut SvgCanvas<'_>, label: &str, offset: f64, font_px: f64) {
        canvas.text(
            self.frame.center_x(),
            self.frame.bottom() + offset,
            label,
            &TextStyle::new(font_px).baseline(Baseline::Hanging),
        );
    }

    pub fn draw_title(&self, canvas: &mut SvgCanvas<'_>, title: &str, font_px: f64) {
        let gap = canvas.style().points(6.0);
        canvas.text(
            self.frame.center_x(),
            self.frame.top - gap,
            title,
            &TextStyle::new(font_px).baseline(Baseline::Alphabetic),
        );
    }
}

#[inline]
fn scale(d: f64, range: Interval<f64>, pixels: f64) -> f64 {
    let len = range.length();
    if len > 0.0 { d / len * pixels } else { 0.0 }
}

/// Pixel space a tick label row needs below (or beside) a frame.
#[inline]
pub fn tick_band(style: &StyleContext, font_px: f64) -> f64 {
    style.points(TICK_LENGTH_PT) + style.points(TICK_PAD_PT) + font_px
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfigBuilder;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn nice_step_rounds_to_one_two_five() {
        assert!(approx(nice_step(10.0, 6), 2.0));
        assert!(approx(nice_step(100.0, 6), 20.0));
        assert!(approx(nice_step(30.0, 6), 5.0));
        assert!(approx(nice_step(1.0, 6), 0.2));
        assert!(approx(nice_step(7.0, 6), 1.0));
        assert_eq!(nice_step(0.0, 6), 1.0);
        assert_eq!(nice_step(f64::NAN, 6), 1.0);
    }

    #[test]
    fn ticks_stay_inside_range() {
        let ticks = nice_ticks(Interval::new(-0.5, 10.5), 6);
        assert_eq!(ticks.step(), 2.0);
        assert_eq!(ticks.values(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn y_axis_points_up() {
        let axes = Axes::new(
            PixelRect::new(10.0, 20.0, 100.0, 50.0),
            Interval::new(0.0, 10.0),
            Interval::new(0.0, 1.0),
        );
        assert!(approx(axes.px(0.0), 10.0));
        assert!(approx(axes.px(10.0), 110.0));
        assert!(approx(axes.py(0.0), 70.0));
        assert!(approx(axes.py(1.0), 20.0));
        assert!(approx(axes.sx(1.0), 10.0));

        let cell = axes.data_rect(2.0, 0.0, 1.0, 1.0);
        assert!(approx(cell.left(), 30.0));
        assert!(approx(cell.top(), 20.0));
        assert!(approx(cell.width(), 10.0));
        assert!(approx(cell.height(), 50.0));
    }

    #[test]
    fn degenerate_range_maps_to_center() {
        let axes = Axes::new(
            PixelRect::new(0.0, 0.0, 100.0, 100.0),
            Interval::new(3.0, 3.0),
            Interval::new(0.0, 1.0),
        );
        assert!(approx(axes.px(3.0), 50.0));
        assert_eq!(axes.sx(1.0), 0.0);
    }

    #[test]
    fn draws_ticks_and_labels() {
        let style = StyleContext::new(StyleConfigBuilder::new().load_system_fonts(false).build());
        let mut canvas = SvgCanvas::new(&style, 200.0, 100.0);
        let axes = Axes::new(
            PixelRect::new(40.0, 10.0, 150.0, 60.0),
            Interval::new(0.0, 4.0),
            Interval::new(0.0, 1.0),
        );
        axes.draw_frame(&mut canvas);
        let ticks = axes.numeric_x_ticks(&canvas, 4);
        axes.draw_x_ticks(&mut canvas, &ticks, 10.0);
        axes.draw_title(&mut canvas, "Title", 12.0);
        let svg = canvas.finish();
        for label in [">0<", ">1<", ">2<", ">3<", ">4<", ">Title<"] {
            assert!(svg.as_str().contains(label), "missing {label}");
        }
    }
}
