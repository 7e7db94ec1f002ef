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

//! # Slot Grid
//!
//! Dense `rows x slots_per_row` occupancy built from sparse allocation records.

use crate::err::GridTooLargeError;
use crate::rec::AllocationRecord;
use dock_viz_core::id::{CompartmentId, ShipId};
use std::collections::BTreeSet;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied {
        ship: ShipId,
        compartment: CompartmentId,
    },
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied { ship, .. } => Some(*ship),
        }
    }
}

/// Largest grid `SlotGrid::build` allocates.
pub const MAX_GRID_CELLS: usize = 1 << 22;

/// Grid size inferred from the data as `max(index) + 1` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridDims {
    rows: usize,
    slots_per_row: usize,
}

impl GridDims {
    #[inline]
    pub const fn new(rows: usize, slots_per_row: usize) -> Self {
        Self {
            rows,
            slots_per_row,
        }
    }

    /// Bounding box of all records. Negative indices never raise a maximum, so a
    /// table without any non-negative row (or slot) yields zero on that axis.
    pub fn infer<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AllocationRecord>,
    {
        let (max_row, max_slot) = records
            .into_iter()
            .fold((-1i64, -1i64), |(mr, ms), r| (mr.max(r.row()), ms.max(r.slot())));
        Self::new(extent(max_row), extent(max_slot))
    }

    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub const fn slots_per_row(&self) -> usize {
        self.slots_per_row
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.slots_per_row == 0
    }

    /// `rows * slots_per_row`, or `None` if that overflows `usize`.
    #[inline]
    pub const fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.slots_per_row)
    }

    #[inline]
    fn index_of(&self, row: i64, slot: i64) -> Option<usize> {
        let r = usize::try_from(row).ok().filter(|r| *r < self.rows)?;
        let s = usize::try_from(slot)
            .ok()
            .filter(|s| *s < self.slots_per_row)?;
        Some(r * self.slots_per_row + s)
    }
}

#[inline]
fn extent(max_index: i64) -> usize {
    usize::try_from(max_index.saturating_add(1)).unwrap_or(0)
}

impl Display for GridDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.slots_per_row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    occupied: usize,
    empty: usize,
    ships: usize,
}

impl GridStats {
    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn empty(&self) -> usize {
        self.empty
    }

    #[inline]
    pub fn ships(&self) -> usize {
        self.ships
    }
}

impl Display for GridStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "occupied: {}, empty: {}, ships: {}",
            self.occupied, self.empty, self.ships
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    dims: GridDims,
    cells: Vec<Cell>,
    ships: Vec<ShipId>,
}

impl SlotGrid {
    /// Places every record into its cell. Records outside `dims` are ignored; when two
    /// records target the same cell the later one wins.
    ///
    /// Fails if `dims` spans more than [`MAX_GRID_CELLS`] cells.
    pub fn build(records: &[AllocationRecord], dims: GridDims) -> Result<Self, GridTooLargeError> {
        let cell_count = dims
            .cell_count()
            .filter(|n| *n <= MAX_GRID_CELLS)
            .ok_or_else(|| GridTooLargeError::new(dims, MAX_GRID_CELLS))?;
        let mut cells = vec![Cell::Empty; cell_count];
        let mut ships = BTreeSet::new();

        for r in records {
            ships.insert(r.ship());
            if let Some(idx) = dims.index_of(r.row(), r.slot()) {
                cells[idx] = Cell::Occupied {
                    ship: r.ship(),
                    compartment: r.compartment(),
                };
            }
        }

        Ok(Self {
            dims,
            cells,
            ships: ships.into_iter().collect(),
        })
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Distinct ships of all records, ascending.
    #[inline]
    pub fn ships(&self) -> &[ShipId] {
        &self.ships
    }

    #[inline]
    pub fn get(&self, row: usize, slot: usize) -> Option<Cell> {
        if row >= self.dims.rows || slot >= self.dims.slots_per_row {
            return None;
        }
        self.cells.get(row * self.dims.slots_per_row + slot).copied()
    }

    #[inline]
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.dims.rows {
            return None;
        }
        let start = row * self.dims.slots_per_row;
        self.cells.get(start..start + self.dims.slots_per_row)
    }

    #[inline]
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        // `chunks_exact(0)` panics, and a zero-width grid has no cells anyway.
        let width = self.dims.slots_per_row.max(1);
        let rows = if self.dims.slots_per_row == 0 {
            0
        } else {
            self.dims.rows
        };
        self.cells.chunks_exact(width).take(rows)
    }

    pub fn stats(&self) -> GridStats {
        let occupied = self.cells.iter().filter(|c| !c.is_empty()).count();
        GridStats {
            occupied,
            empty: self.cells.len() - occupied,
            ships: self.ships.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn rec(ship: i64, k: i64, row: i64, slot: i64) -> AllocationRecord {
        AllocationRecord::new(ShipId::new(ship), CompartmentId::new(k), row, slot)
    }

    fn occ(ship: i64, k: i64) -> Cell {
        Cell::Occupied {
            ship: ShipId::new(ship),
            compartment: CompartmentId::new(k),
        }
    }

    #[test]
    fn builds_the_documented_example() {
        let records = vec![rec(1, 0, 0, 0), rec(1, 1, 0, 1), rec(2, -1, 1, 0)];
        let dims = GridDims::infer(&records);
        assert_eq!(dims, GridDims::new(2, 2));

        let grid = SlotGrid::build(&records, dims).unwrap();
        assert_eq!(grid.get(0, 0), Some(occ(1, 0)));
        assert_eq!(grid.get(0, 1), Some(occ(1, 1)));
        assert_eq!(grid.get(1, 0), Some(occ(2, -1)));
        assert_eq!(grid.get(1, 1), Some(Cell::Empty));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.ships(), &[ShipId::new(1), ShipId::new(2)]);
    }

    #[test]
    fn later_record_overwrites_earlier_one() {
        let records = vec![rec(1, 0, 0, 0), rec(2, 3, 0, 0)];
        let grid = SlotGrid::build(&records, GridDims::infer(&records)).unwrap();
        assert_eq!(grid.get(0, 0), Some(occ(2, 3)));
        // The overwritten ship is still part of the ship set.
        assert_eq!(grid.ships(), &[ShipId::new(1), ShipId::new(2)]);
    }

    #[test]
    fn out_of_range_records_are_ignored() {
        let records = vec![rec(1, 0, 0, 0), rec(5, 0, -1, 0), rec(6, 0, 0, 9)];
        let grid = SlotGrid::build(&records, GridDims::new(1, 2)).unwrap();
        assert_eq!(grid.stats().occupied(), 1);
        assert_eq!(grid.get(0, 1), Some(Cell::Empty));
        assert_eq!(grid.ships().len(), 3);
    }

    #[test]
    fn negative_indices_do_not_raise_dims() {
        let records = vec![rec(1, 0, -3, 4), rec(1, 0, 2, -1)];
        assert_eq!(GridDims::infer(&records), GridDims::new(3, 5));

        let only_negative = vec![rec(1, 0, -1, -1)];
        let dims = GridDims::infer(&only_negative);
        assert!(dims.is_empty());
        assert_eq!(dims.cell_count(), Some(0));
    }

    #[test]
    fn no_records_yield_empty_grid() {
        let dims = GridDims::infer(&[]);
        assert_eq!(dims, GridDims::new(0, 0));
        let grid = SlotGrid::build(&[], dims).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
        assert!(grid.ships().is_empty());
    }

    #[test]
    fn rows_iterate_in_order() {
        let records = vec![rec(1, 0, 0, 2), rec(2, 0, 1, 0), rec(3, 0, 2, 1)];
        let grid = SlotGrid::build(&records, GridDims::infer(&records)).unwrap();
        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][2], occ(1, 0));
        assert_eq!(rows[1][0], occ(2, 0));
        assert_eq!(rows[2][1], occ(3, 0));
        assert_eq!(grid.row(1), Some(rows[1]));
        assert_eq!(grid.row(3), None);
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5107_A110C);
        for _ in 0..16 {
            let n = rng.random_range(0..200);
            let records: Vec<AllocationRecord> = (0..n)
                .map(|_| {
                    rec(
                        rng.random_range(0..30),
                        rng.random_range(-1..8),
                        rng.random_range(-2..12),
                        rng.random_range(-2..40),
                    )
                })
                .collect();
            let dims = GridDims::infer(&records);
            let a = SlotGrid::build(&records, dims).unwrap();
            let b = SlotGrid::build(&records, dims).unwrap();
            assert_eq!(a, b);

            let max_row = records.iter().map(|r| r.row()).max().unwrap_or(-1);
            let max_slot = records.iter().map(|r| r.slot()).max().unwrap_or(-1);
            assert_eq!(dims.rows() as i64, (max_row + 1).max(0));
            assert_eq!(dims.slots_per_row() as i64, (max_slot + 1).max(0));
        }
    }

    #[test]
    fn stats_count_cells() {
        let records = vec![rec(1, 0, 0, 0), rec(2, 0, 1, 1)];
        let stats = SlotGrid::build(&records, GridDims::infer(&records)).unwrap().stats();
        assert_eq!(stats.occupied(), 2);
        assert_eq!(stats.empty(), 2);
        assert_eq!(stats.ships(), 2);
    }

    #[test]
    fn oversized_dims_are_rejected() {
        let records = vec![rec(1, 0, 5_000_000_000, 5_000_000_000)];
        let dims = GridDims::infer(&records);
        assert_eq!(dims.cell_count(), None);
        let err = SlotGrid::build(&records, dims).unwrap_err();
        assert_eq!(err.dims(), dims);

        let wide = GridDims::new(2, MAX_GRID_CELLS);
        assert_eq!(wide.cell_count(), Some(2 * MAX_GRID_CELLS));
        assert!(SlotGrid::build(&[], wide).is_err());
    }
}
