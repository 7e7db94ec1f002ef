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

//! # Dock Visualization Core (`dock-viz-core`)
//!
//! Foundational, type-safe building blocks shared by the loading and rendering crates.
//!
//! ## Key Data Structures
//!
//! - **`ShipId`**, **`CompartmentId`**, **`BerthId`**: identifiers read from the solver output.
//!   A ship is the unit that gets a distinct color across every chart.
//!
//! - **`Rgba`** and **`ColorAssignment`**: a fixed 20-color categorical palette indexed
//!   cyclically by the rank of a ship in the sorted ship set.
//!
//! - **`TextTone`**: readable label color for a given background, based on relative luminance.
//!
//! - **`Interval<T>`**: an ordered pair of bounds, used for axis data ranges.

pub mod color;
pub mod contrast;
pub mod id;
pub mod primitives;
