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

//! # Style Context
//!
//! Rendering defaults are configured once per run and threaded explicitly into every
//! chart. Nothing here is process-global: two contexts with different fonts can be
//! used side by side.

use resvg::usvg::fontdb;
use serde::Deserialize;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

const UNICODE_MINUS: char = '\u{2212}';

/// Configuration of fonts, resolution and number formatting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub(crate) preferred_fonts: Vec<String>,
    pub(crate) unicode_minus_disabled: bool,
    pub(crate) dpi: f64,
    pub(crate) load_system_fonts: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            // CJK-capable families first so Chinese labels render; DejaVu Sans as the last resort.
            preferred_fonts: [
                "PingFang SC",
                "Heiti TC",
                "Hiragino Sans GB",
                "STHeiti",
                "Arial Unicode MS",
                "DejaVu Sans",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            unicode_minus_disabled: true,
            dpi: 150.0,
            load_system_fonts: true,
        }
    }
}

impl StyleConfig {
    #[inline]
    pub fn preferred_fonts(&self) -> &[String] {
        &self.preferred_fonts
    }

    #[inline]
    pub fn unicode_minus_disabled(&self) -> bool {
        self.unicode_minus_disabled
    }

    #[inline]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    #[inline]
    pub fn load_system_fonts(&self) -> bool {
        self.load_system_fonts
    }
}

impl Display for StyleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StyleConfig {{ preferred_fonts: [{}], unicode_minus_disabled: {}, dpi: {}, load_system_fonts: {} }}",
            self.preferred_fonts.join(", "),
            self.unicode_minus_disabled,
            self.dpi,
            self.load_system_fonts
        )
    }
}

/// Builder for `StyleConfig`.
#[derive(Debug, Clone, Default)]
pub struct StyleConfigBuilder {
    config: StyleConfig,
}

impl StyleConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preferred_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.preferred_fonts = fonts.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn unicode_minus_disabled(mut self, yes: bool) -> Self {
        self.config.unicode_minus_disabled = yes;
        self
    }

    /// Non-finite or non-positive values keep the current resolution.
    #[inline]
    pub fn dpi(mut self, dpi: f64) -> Self {
        if dpi.is_finite() && dpi > 0.0 {
            self.config.dpi = dpi;
        }
        self
    }

    #[inline]
    pub fn load_system_fonts(mut self, yes: bool) -> Self {
        self.config.load_system_fonts = yes;
        self
    }

    #[inline]
    pub fn build(self) -> StyleConfig {
        self.config
    }
}

/// Everything a chart needs to turn data units into pixels and text.
#[derive(Debug, Clone)]
pub struct StyleContext {
    config: StyleConfig,
    fontdb: Arc<fontdb::Database>,
    primary_family: Option<String>,
    svg_font_family: String,
}

impl StyleContext {
    pub fn new(mut config: StyleConfig) -> Self {
        if !(config.dpi.is_finite() && config.dpi > 0.0) {
            config.dpi = StyleConfig::default().dpi;
        }

        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }

        let primary_family = resolve_family(&db, &config.preferred_fonts);
        if let Some(family) = &primary_family {
            db.set_sans_serif_family(family.clone());
        }
        debug!(
            faces = db.len(),
            primary = primary_family.as_deref().unwrap_or("sans-serif"),
            "Font database ready"
        );

        // An installed fallback family goes right before the generic name.
        let fallback = primary_family
            .as_ref()
            .filter(|family| !config.preferred_fonts.contains(*family));
        let svg_font_family = config
            .preferred_fonts
            .iter()
            .chain(fallback)
            .map(|family| format!("'{}'", family.replace('\'', "")))
            .chain(std::iter::once("sans-serif".to_owned()))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            config,
            fontdb: Arc::new(db),
            primary_family,
            svg_font_family,
        }
    }

    #[inline]
    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    #[inline]
    pub fn fontdb(&self) -> &Arc<fontdb::Database> {
        &self.fontdb
    }

    /// First preferred family the font database actually has, otherwise the first
    /// family it has at all. `None` only for an empty database.
    #[inline]
    pub fn primary_family(&self) -> Option<&str> {
        self.primary_family.as_deref()
    }

    /// Value for the SVG `font-family` attribute.
    #[inline]
    pub fn svg_font_family(&self) -> &str {
        &self.svg_font_family
    }

    #[inline]
    pub fn inches(&self, v: f64) -> f64 {
        v * self.config.dpi
    }

    #[inline]
    pub fn points(&self, pt: f64) -> f64 {
        pt * self.config.dpi / 72.0
    }

    #[inline]
    pub fn minus_sign(&self) -> char {
        if self.config.unicode_minus_disabled {
            '-'
        } else {
            UNICODE_MINUS
        }
    }

    fn with_minus(&self, s: String) -> String {
        if self.config.unicode_minus_disabled {
            s
        } else {
            s.replace('-', &UNICODE_MINUS.to_string())
        }
    }

    #[inline]
    pub fn format_int(&self, v: i64) -> String {
        self.with_minus(v.to_string())
    }

    /// Tick label for `v` on an axis stepping by `step`; as many decimals as the step needs.
    pub fn format_tick(&self, v: f64, step: f64) -> String {
        let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
            ((-step.log10() - 1e-9).ceil() as usize).min(6)
        } else {
            0
        };
        let mut s = format!("{v:.decimals$}");
        if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
            s.remove(0);
        }
        self.with_minus(s)
    }
}

/// Picks the family text is drawn with. Falls back to any installed family so labels
/// never vanish when none of the preferences is present.
fn resolve_family(db: &fontdb::Database, preferred: &[String]) -> Option<String> {
    let has_family =
        |family: &str| db.faces().any(|face| face.families.iter().any(|(name, _)| name == family));
    preferred
        .iter()
        .find(|family| has_family(family))
        .cloned()
        .or_else(|| {
            db.faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        })
}
