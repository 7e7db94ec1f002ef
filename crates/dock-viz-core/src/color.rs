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

//! # Colors
//!
//! Straight RGBA colors with channels in `[0, 1]`, the categorical palette used to tell
//! ships apart, and the deterministic ship-to-color assignment derived from it.

use crate::id::ShipId;
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    #[inline]
    pub const fn r(&self) -> f32 {
        self.r
    }

    #[inline]
    pub const fn g(&self) -> f32 {
        self.g
    }

    #[inline]
    pub const fn b(&self) -> f32 {
        self.b
    }

    #[inline]
    pub const fn a(&self) -> f32 {
        self.a
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// `#rrggbb`, alpha dropped. Channels outside `[0, 1]` are clamped.
    pub fn to_hex(&self) -> String {
        #[inline]
        fn byte(v: f32) -> u8 {
            if v.is_nan() {
                return 0;
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b)
        )
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        if self.a.is_nan() {
            1.0
        } else {
            self.a.clamp(0.0, 1.0)
        }
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rgba({:.3}, {:.3}, {:.3}, {:.3})",
            self.r, self.g, self.b, self.a
        )
    }
}

/// Fill for grid cells no ship occupies.
pub const EMPTY_CELL: Rgba = Rgba::rgb(0.95, 0.95, 0.95);

/// Fill for cells and berth bars whose ship has no assigned color.
pub const UNKNOWN_CELL: Rgba = Rgba::rgb(0.6, 0.6, 0.6);

/// Fill for ship start markers whose ship has no assigned color.
pub const UNKNOWN_MARKER: Rgba = Rgba::rgb(0.2, 0.2, 0.8);

/// The 20-color categorical palette (`tab20`): ten hues, each as a dark/light pair.
pub const TAB20: [Rgba; 20] = [
    Rgba::from_rgb8(0x1f, 0x77, 0xb4),
    Rgba::from_rgb8(0xae, 0xc7, 0xe8),
    Rgba::from_rgb8(0xff, 0x7f, 0x0e),
    Rgba::from_rgb8(0xff, 0xbb, 0x78),
    Rgba::from_rgb8(0x2c, 0xa0, 0x2c),
    Rgba::from_rgb8(0x98, 0xdf, 0x8a),
    Rgba::from_rgb8(0xd6, 0x27, 0x28),
    Rgba::from_rgb8(0xff, 0x98, 0x96),
    Rgba::from_rgb8(0x94, 0x67, 0xbd),
    Rgba::from_rgb8(0xc5, 0xb0, 0xd5),
    Rgba::from_rgb8(0x8c, 0x56, 0x4b),
    Rgba::from_rgb8(0xc4, 0x9c, 0x94),
    Rgba::from_rgb8(0xe3, 0x77, 0xc2),
    Rgba::from_rgb8(0xf7, 0xb6, 0xd2),
    Rgba::from_rgb8(0x7f, 0x7f, 0x7f),
    Rgba::from_rgb8(0xc7, 0xc7, 0xc7),
    Rgba::from_rgb8(0xbc, 0xbd, 0x22),
    Rgba::from_rgb8(0xdb, 0xdb, 0x8d),
    Rgba::from_rgb8(0x17, 0xbe, 0xcf),
    Rgba::from_rgb8(0x9e, 0xda, 0xe5),
];

/// Palette color for the ship at `rank` in the sorted ship set.
#[inline]
pub fn palette_color(rank: usize) -> Rgba {
    TAB20[rank % TAB20.len()]
}

/// Ship-to-color mapping shared by every chart of a run.
///
/// The color of a ship depends only on its position in the sequence the
/// assignment was built from. With more than 20 ships the palette wraps and
/// colors repeat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorAssignment {
    order: Vec<(ShipId, Rgba)>,
    by_ship: HashMap<ShipId, Rgba>,
}

impl ColorAssignment {
    pub fn from_sorted<I>(ships: I) -> Self
    where
        I: IntoIterator<Item = ShipId>,
    {
        let order: Vec<(ShipId, Rgba)> = ships
            .into_iter()
            .enumerate()
            .map(|(rank, ship)| (ship, palette_color(rank)))
            .collect();
        let by_ship = order.iter().copied().collect();
        Self { order, by_ship }
    }

    #[inline]
    pub fn get(&self, ship: ShipId) -> Option<Rgba> {
        self.by_ship.get(&ship).copied()
    }

    #[inline]
    pub fn get_or(&self, ship: ShipId, fallback: Rgba) -> Rgba {
        self.get(ship).unwrap_or(fallback)
    }

    /// Ships and their colors in assignment order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ShipId, Rgba)> + '_ {
        self.order.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
