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

//! # SVG Drawing Surface
//!
//! Charts draw onto an [`SvgCanvas`] in pixel coordinates (origin top-left). The canvas
//! is owned by the drawing function and consumed by [`SvgCanvas::finish`]; an early
//! return simply drops it.

use crate::style::StyleContext;
use dock_viz_core::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    color: Rgba,
    width: f64,
    dash: Option<(f64, f64)>,
}

impl Stroke {
    #[inline]
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    #[inline]
    pub const fn dashed(mut self, on: f64, off: f64) -> Self {
        self.dash = Some((on, off));
        self
    }

    fn attrs(&self) -> String {
        let mut out = format!(
            r#" stroke="{}" stroke-width="{:.2}""#,
            self.color.to_hex(),
            self.width
        );
        if self.color.opacity() < 1.0 {
            out.push_str(&format!(r#" stroke-opacity="{:.3}""#, self.color.opacity()));
        }
        if let Some((on, off)) = self.dash {
            out.push_str(&format!(r#" stroke-dasharray="{on:.2} {off:.2}""#));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    const fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Central,
    Hanging,
    Alphabetic,
}

impl Baseline {
    const fn as_str(self) -> &'static str {
        match self {
            Baseline::Central => "central",
            Baseline::Hanging => "hanging",
            Baseline::Alphabetic => "alphabetic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    size: f64,
    color: Rgba,
    anchor: Anchor,
    baseline: Baseline,
    rotate: Option<f64>,
}

impl TextStyle {
    /// Black, centered text of `size` pixels.
    #[inline]
    pub const fn new(size: f64) -> Self {
        Self {
            size,
            color: Rgba::BLACK,
            anchor: Anchor::Middle,
            baseline: Baseline::Central,
            rotate: None,
        }
    }

    #[inline]
    pub const fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[inline]
    pub const fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Rotation in degrees around the anchor point.
    #[inline]
    pub const fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }
}

/// Rough advance width of `text` at `size` pixels. Good enough to reserve room for
/// labels and legends without shaping the text.
#[inline]
pub fn approx_text_width(text: &str, size: f64) -> f64 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.6 } else { 1.0 })
        .sum::<f64>()
        * size
}

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn fill_attrs(fill: Rgba) -> String {
    let mut out = format!(r#" fill="{}""#, fill.to_hex());
    if fill.opacity() < 1.0 {
        out.push_str(&format!(r#" fill-opacity="{:.3}""#, fill.opacity()));
    }
    out
}

fn stroke_attrs(stroke: Option<Stroke>) -> String {
    stroke.map(|s| s.attrs()).unwrap_or_default()
}

/// A finished SVG document with integral pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    content: String,
}

impl SvgDocument {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

pub struct SvgCanvas<'s> {
    style: &'s StyleContext,
    width: u32,
    height: u32,
    body: String,
}

impl<'s> SvgCanvas<'s> {
    /// A white canvas of at least 1x1 pixels.
    pub fn new(style: &'s StyleContext, width: f64, height: f64) -> Self {
        let width = pixels(width);
        let height = pixels(height);
        let mut canvas = Self {
            style,
            width,
            height,
            body: String::new(),
        };
        canvas.rect(0.0, 0.0, width as f64, height as f64, Rgba::WHITE, None);
        canvas
    }

    #[inline]
    pub fn style(&self) -> &'s StyleContext {
        self.style
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width as f64
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height as f64
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Rgba, stroke: Option<Stroke>) {
        self.body.push_str(&format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{:.2}" height="{:.2}"{}{}/>"#,
            w.max(0.0),
            h.max(0.0),
            fill_attrs(fill),
            stroke_attrs(stroke)
        ));
        self.body.push('\n');
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
        self.body.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}"{}/>"#,
            stroke.attrs()
        ));
        self.body.push('\n');
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: Rgba, stroke: Option<Stroke>) {
        self.body.push_str(&format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}"{}{}/>"#,
            r.max(0.0),
            fill_attrs(fill),
            stroke_attrs(stroke)
        ));
        self.body.push('\n');
    }

    /// A square standing on its corner; `half` is the center-to-corner distance.
    pub fn diamond(&mut self, cx: f64, cy: f64, half: f64, fill: Rgba, stroke: Option<Stroke>) {
        self.body.push_str(&format!(
            r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}"{}{}/>"#,
            cx,
            cy - half,
            cx + half,
            cy,
            cx,
            cy + half,
            cx - half,
            cy,
            fill_attrs(fill),
            stroke_attrs(stroke)
        ));
        self.body.push('\n');
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        let mut attrs = format!(
            r#" x="{x:.2}" y="{y:.2}" font-size="{:.2}" text-anchor="{}" dominant-baseline="{}""#,
            style.size,
            style.anchor.as_str(),
            style.baseline.as_str()
        );
        attrs.push_str(&fill_attrs(style.color));
        if let Some(deg) = style.rotate {
            attrs.push_str(&format!(r#" transform="rotate({deg:.1} {x:.2} {y:.2})""#));
        }
        self.body.push_str(&format!(
            "<text{attrs}>{}</text>",
            escape_xml(content)
        ));
        self.body.push('\n');
    }

    pub fn finish(self) -> SvgDocument {
        let content = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" "#,
                r#"viewBox="0 0 {w} {h}" font-family="{font}">"#,
                "\n{body}</svg>\n"
            ),
            w = self.width,
            h = self.height,
            font = escape_xml(self.style.svg_font_family()),
            body = self.body
        );
        SvgDocument {
            width: self.width,
            height: self.height,
            content,
        }
    }
}

#[inline]
fn pixels(v: f64) -> u32 {
    if v.is_finite() && v >= 1.0 {
        // Absorb float noise from inch conversions (1.2 * 150 must stay 180).
        (v - 1e-6).ceil().min(u32::MAX as f64) as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfigBuilder;

    fn style() -> StyleContext {
        StyleContext::new(StyleConfigBuilder::new().load_system_fonts(false).build())
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_xml(r#"<a & 'b' "c">"#),
            "&lt;a &amp; &apos;b&apos; &quot;c&quot;&gt;"
        );
    }

    #[test]
    fn document_has_root_and_dimensions() {
        let style = style();
        let mut canvas = SvgCanvas::new(&style, 100.4, 20.0);
        canvas.rect(1.0, 2.0, 3.0, 4.0, Rgba::BLACK, Some(Stroke::new(Rgba::WHITE, 0.5)));
        canvas.text(5.0, 5.0, "S1K<2>", &TextStyle::new(10.0));
        let doc = canvas.finish();

        assert_eq!((doc.width(), doc.height()), (101, 20));
        let svg = doc.as_str();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"101\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("S1K&lt;2&gt;"));
        assert!(svg.contains(r##"stroke="#ffffff" stroke-width="0.50""##));
        assert!(svg.contains("font-family=\"&apos;PingFang SC&apos;"));
    }

    #[test]
    fn degenerate_sizes_clamp_to_one_pixel() {
        let style = style();
        let doc = SvgCanvas::new(&style, 0.0, f64::NAN).finish();
        assert_eq!((doc.width(), doc.height()), (1, 1));
    }

    #[test]
    fn translucent_and_dashed_strokes() {
        let style = style();
        let mut canvas = SvgCanvas::new(&style, 10.0, 10.0);
        canvas.line(
            0.0,
            5.0,
            10.0,
            5.0,
            Stroke::new(Rgba::BLACK.with_alpha(0.3), 1.0).dashed(4.0, 2.0),
        );
        let doc = canvas.finish();
        assert!(doc.as_str().contains(r#"stroke-opacity="0.300""#));
        assert!(doc.as_str().contains(r#"stroke-dasharray="4.00 2.00""#));
    }

    #[test]
    fn rotated_text_turns_around_its_anchor() {
        let style = style();
        let mut canvas = SvgCanvas::new(&style, 50.0, 50.0);
        canvas.text(10.0, 20.0, "Berth", &TextStyle::new(8.0).rotate(-90.0));
        let doc = canvas.finish();
        assert!(doc.as_str().contains(r#"transform="rotate(-90.0 10.00 20.00)""#));
    }

    #[test]
    fn text_width_estimate_grows_with_length() {
        assert!(approx_text_width("Ship 10", 10.0) > approx_text_width("Ship 1", 10.0));
        assert_eq!(approx_text_width("", 10.0), 0.0);
    }
}
