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

//! # Label Contrast
//!
//! Chooses between light and dark label text for a filled background.

use crate::color::Rgba;

pub const LUMINANCE_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Backgrounds at or above this luminance get dark text.
pub const LIGHT_TEXT_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTone {
    Light,
    Dark,
}

impl TextTone {
    #[inline]
    pub fn for_luminance(luminance: f32) -> Self {
        if luminance.is_finite() && luminance < LIGHT_TEXT_THRESHOLD {
            TextTone::Light
        } else {
            TextTone::Dark
        }
    }

    #[inline]
    pub const fn color(self) -> Rgba {
        match self {
            TextTone::Light => Rgba::WHITE,
            TextTone::Dark => Rgba::BLACK,
        }
    }
}

#[inline]
pub fn relative_luminance(bg: Rgba) -> f32 {
    LUMINANCE_WEIGHTS[0] * bg.r() + LUMINANCE_WEIGHTS[1] * bg.g() + LUMINANCE_WEIGHTS[2] * bg.b()
}

#[inline]
pub fn text_tone(bg: Rgba) -> TextTone {
    TextTone::for_luminance(relative_luminance(bg))
}

/// Like [`text_tone`] for raw channel slices; anything shorter than RGB is dark.
pub fn text_tone_from_channels(channels: &[f32]) -> TextTone {
    match channels {
        [r, g, b, ..] => text_tone(Rgba::rgb(*r, *g, *b)),
        _ => TextTone::Dark,
    }
}

#[inline]
pub fn text_color(bg: Rgba) -> Rgba {
    text_tone(bg).color()
}
