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

use dock_viz_core::id::{BerthId, CompartmentId, ShipId};
use std::fmt::Display;

/// One placement of a ship compartment into a `(row, slot)` position.
///
/// Row and slot are kept signed as read; the grid builder decides what falls inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocationRecord {
    ship: ShipId,
    compartment: CompartmentId,
    row: i64,
    slot: i64,
}

impl AllocationRecord {
    #[inline]
    pub fn new(ship: ShipId, compartment: CompartmentId, row: i64, slot: i64) -> Self {
        Self {
            ship,
            compartment,
            row,
            slot,
        }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn compartment(&self) -> CompartmentId {
        self.compartment
    }

    #[inline]
    pub fn row(&self) -> i64 {
        self.row
    }

    #[inline]
    pub fn slot(&self) -> i64 {
        self.slot
    }
}

impl Display for AllocationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Allocation {{ ship: {}, compartment: {}, row: {}, slot: {} }}",
            self.ship, self.compartment, self.row, self.slot
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BerthRecord {
    ship: ShipId,
    berth: BerthId,
}

impl BerthRecord {
    #[inline]
    pub fn new(ship: ShipId, berth: BerthId) -> Self {
        Self { ship, berth }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn berth(&self) -> BerthId {
        self.berth
    }
}

impl Display for BerthRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Berth {{ ship: {}, berth: {} }}", self.ship, self.berth)
    }
}

/// Start time of a ship as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipStartRecord {
    ship: ShipId,
    start: f64,
}

impl ShipStartRecord {
    #[inline]
    pub fn new(ship: ShipId, start: f64) -> Self {
        Self { ship, start }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }
}

/// Start time of a single compartment of a ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompartmentStartRecord {
    ship: ShipId,
    compartment: Option<CompartmentId>,
    start: f64,
}

impl CompartmentStartRecord {
    #[inline]
    pub fn new(ship: ShipId, compartment: Option<CompartmentId>, start: f64) -> Self {
        Self {
            ship,
            compartment,
            start,
        }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn compartment(&self) -> Option<CompartmentId> {
        self.compartment
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }
}
