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

//! # Dock Visualization Model (`dock-viz-model`)
//!
//! Typed view of the CSV files an allocation solver exports, and the dense slot grid
//! derived from them.
//!
//! ## Key Data Structures
//!
//! - **`AllocationRecord`**: a ship compartment placed into a `(row, slot)` position.
//!
//! - **`SlotTable`**: all accepted allocation records plus the grid size they span,
//!   inferred as `max(index) + 1` per axis.
//!
//! - **`SlotGrid`**: dense `rows x slots_per_row` occupancy built from a `SlotTable`,
//!   together with the sorted set of ships that appear in it.
//!
//! - **`BerthRecord`**, **`ShipStartRecord`**, **`CompartmentStartRecord`**: the optional
//!   datasets behind the berth chart and the start-time timeline.
//!
//! - **`DatasetResolver`**: finds a dataset by name; `DirectoryResolver` implements the
//!   "output directory or one of its run subdirectories" search.
//!
//! Malformed rows are skipped and counted, never fatal. The only load errors are an
//! unreadable file or header.

pub mod err;
pub mod grid;
pub mod load;
pub mod rec;
pub mod resolve;

pub mod prelude {
    pub use crate::err::{DatasetNotFoundError, GridTooLargeError, LoadError, RowError};
    pub use crate::grid::{Cell, GridDims, GridStats, MAX_GRID_CELLS, SlotGrid};
    pub use crate::load::{SlotTable, Table};
    pub use crate::rec::{AllocationRecord, BerthRecord, CompartmentStartRecord, ShipStartRecord};
    pub use crate::resolve::{DatasetName, DatasetResolver, DirectoryResolver};
}
