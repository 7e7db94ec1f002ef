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

//! # Record Loading
//!
//! Reads the solver's CSV exports into typed records. Every table has a header row and
//! columns are addressed by name, so column order does not matter and extra columns are
//! ignored. A row that cannot be parsed is skipped and counted; it never fails the load.

use crate::err::{LoadError, OpenDatasetError, RowError};
use crate::grid::GridDims;
use crate::rec::{AllocationRecord, BerthRecord, CompartmentStartRecord, ShipStartRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use dock_viz_core::id::{BerthId, CompartmentId, ShipId};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

pub const COL_SHIP: &str = "ship";
pub const COL_COMPARTMENT: &str = "k";
pub const COL_ROW: &str = "row";
pub const COL_SLOT: &str = "slot";
pub const COL_BERTH: &str = "berth";
pub const COL_SHIP_START: &str = "e_s";
pub const COL_COMPARTMENT_START: &str = "e_sk";

/// Accepted records of one table, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    records: Vec<R>,
    skipped: usize,
}

impl<R> Table<R> {
    #[inline]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[inline]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Number of data rows that were dropped.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Slot allocations together with the grid size they span.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTable {
    table: Table<AllocationRecord>,
    dims: GridDims,
}

impl SlotTable {
    #[inline]
    pub fn records(&self) -> &[AllocationRecord] {
        self.table.records()
    }

    #[inline]
    pub fn skipped(&self) -> usize {
        self.table.skipped()
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// `true` when no accepted record spans a non-empty grid.
    #[inline]
    pub fn has_no_data(&self) -> bool {
        self.dims.is_empty()
    }
}

/// A data row addressed by header names.
struct Row<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn field(&self, column: &'static str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.record.get(idx)
    }

    fn required(&self, column: &'static str) -> Result<&str, RowError> {
        self.field(column).ok_or(RowError::MissingField(column))
    }

    fn int(&self, column: &'static str) -> Result<i64, RowError> {
        let raw = self.required(column)?;
        raw.parse().map_err(|_| RowError::InvalidInteger {
            column,
            value: raw.to_owned(),
        })
    }

    /// Absent column or empty field gives `None`; anything else must be an integer.
    fn optional_int(&self, column: &'static str) -> Result<Option<i64>, RowError> {
        match self.field(column) {
            None | Some("") => Ok(None),
            Some(_) => self.int(column).map(Some),
        }
    }

    fn time(&self, column: &'static str) -> Result<f64, RowError> {
        let raw = self.required(column)?;
        let v: f64 = raw.parse().map_err(|_| RowError::InvalidNumber {
            column,
            value: raw.to_owned(),
        })?;
        if !v.is_finite() {
            return Err(RowError::NonFinite {
                column,
                value: raw.to_owned(),
            });
        }
        Ok(v)
    }
}

fn read_table<Rd, T, F>(reader: Rd, mut parse: F) -> Result<Table<T>, LoadError>
where
    Rd: Read,
    F: FnMut(&Row<'_>) -> Result<T, RowError>,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (line, result) in rdr.records().enumerate() {
        let parsed = result
            .map_err(|e| RowError::Undecodable(e.to_string()))
            .and_then(|record| {
                parse(&Row {
                    headers: &headers,
                    record: &record,
                })
            });
        match parsed {
            Ok(r) => records.push(r),
            Err(e) => {
                debug!(line = line + 2, error = %e, "Skipping row");
                skipped += 1;
            }
        }
    }

    Ok(Table { records, skipped })
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| OpenDatasetError::new(path.to_path_buf(), e).into())
}

fn parse_allocation(row: &Row<'_>) -> Result<AllocationRecord, RowError> {
    let ship = row.int(COL_SHIP)?;
    let compartment = row
        .optional_int(COL_COMPARTMENT)?
        .map(CompartmentId::new)
        .unwrap_or(CompartmentId::UNSET);
    let r = row.int(COL_ROW)?;
    let slot = row.int(COL_SLOT)?;
    Ok(AllocationRecord::new(
        ShipId::new(ship),
        compartment,
        r,
        slot,
    ))
}

fn parse_berth(row: &Row<'_>) -> Result<BerthRecord, RowError> {
    let ship = row.int(COL_SHIP)?;
    let berth = row.int(COL_BERTH)?;
    Ok(BerthRecord::new(ShipId::new(ship), BerthId::new(berth)))
}

fn parse_ship_start(row: &Row<'_>) -> Result<ShipStartRecord, RowError> {
    let ship = row.int(COL_SHIP)?;
    let start = row.time(COL_SHIP_START)?;
    Ok(ShipStartRecord::new(ShipId::new(ship), start))
}

fn parse_compartment_start(row: &Row<'_>) -> Result<CompartmentStartRecord, RowError> {
    let ship = row.int(COL_SHIP)?;
    let compartment = row.optional_int(COL_COMPARTMENT)?.map(CompartmentId::new);
    let start = row.time(COL_COMPARTMENT_START)?;
    Ok(CompartmentStartRecord::new(
        ShipId::new(ship),
        compartment,
        start,
    ))
}

/// Reads `ship, k, row, slot` rows and infers the grid size from the accepted ones.
pub fn slot_allocations_from_reader<R: Read>(reader: R) -> Result<SlotTable, LoadError> {
    let table = read_table(reader, parse_allocation)?;
    let dims = GridDims::infer(table.records());
    Ok(SlotTable { table, dims })
}

#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_slot_allocations(path: &Path) -> Result<SlotTable, LoadError> {
    let table = slot_allocations_from_reader(open(path)?)?;
    debug!(
        records = table.records().len(),
        skipped = table.skipped(),
        dims = %table.dims(),
        "Loaded slot allocations"
    );
    Ok(table)
}

pub fn berth_assignments_from_reader<R: Read>(reader: R) -> Result<Table<BerthRecord>, LoadError> {
    read_table(reader, parse_berth)
}

#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_berth_assignments(path: &Path) -> Result<Table<BerthRecord>, LoadError> {
    berth_assignments_from_reader(open(path)?)
}

pub fn ship_start_times_from_reader<R: Read>(
    reader: R,
) -> Result<Table<ShipStartRecord>, LoadError> {
    read_table(reader, parse_ship_start)
}

#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_ship_start_times(path: &Path) -> Result<Table<ShipStartRecord>, LoadError> {
    ship_start_times_from_reader(open(path)?)
}

pub fn compartment_start_times_from_reader<R: Read>(
    reader: R,
) -> Result<Table<CompartmentStartRecord>, LoadError> {
    read_table(reader, parse_compartment_start)
}

#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_compartment_start_times(
    path: &Path,
) -> Result<Table<CompartmentStartRecord>, LoadError> {
    compartment_start_times_from_reader(open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn slots(csv: &str) -> SlotTable {
        slot_allocations_from_reader(csv.as_bytes()).expect("slot table")
    }

    #[test]
    fn parses_slot_rows_and_infers_dims() {
        let t = slots("ship,k,row,slot\n1,0,0,0\n1,1,0,1\n2,,1,0\n");
        assert_eq!(t.records().len(), 3);
        assert_eq!(t.skipped(), 0);
        assert_eq!(t.dims(), GridDims::new(2, 2));
        assert_eq!(t.records()[2].compartment(), CompartmentId::UNSET);
        assert_eq!(t.records()[1].compartment(), CompartmentId::new(1));
    }

    #[test]
    fn malformed_row_is_dropped_without_affecting_others() {
        let t = slots("ship,k,row,slot\n1,0,0,0\n2,0,abc,7\n3,0,4,1\n");
        assert_eq!(t.skipped(), 1);
        let ships: Vec<i64> = t.records().iter().map(|r| r.ship().value()).collect();
        assert_eq!(ships, vec![1, 3]);
        // The dropped row's slot 7 does not count towards the grid width.
        assert_eq!(t.dims(), GridDims::new(5, 2));
    }

    #[test]
    fn missing_compartment_column_defaults_to_unset() {
        let t = slots("slot,row,ship\n3,1,9\n");
        assert_eq!(t.records().len(), 1);
        let r = t.records()[0];
        assert_eq!(r.ship(), ShipId::new(9));
        assert_eq!(r.compartment(), CompartmentId::UNSET);
        assert_eq!((r.row(), r.slot()), (1, 3));
    }

    #[test]
    fn non_numeric_compartment_drops_the_row() {
        let t = slots("ship,k,row,slot\n1,x,0,0\n");
        assert!(t.records().is_empty());
        assert_eq!(t.skipped(), 1);
    }

    #[test]
    fn short_rows_and_missing_columns_are_skipped() {
        let t = slots("ship,k,row,slot\n1,0,0\n2,0,1,1,extra\n");
        assert_eq!(t.records().len(), 1);
        assert_eq!(t.skipped(), 1);

        let no_slot_col = slots("ship,k,row\n1,0,0\n");
        assert!(no_slot_col.has_no_data());
        assert_eq!(no_slot_col.skipped(), 1);
    }

    #[test]
    fn empty_input_has_no_data() {
        let t = slots("ship,k,row,slot\n");
        assert!(t.has_no_data());
        assert_eq!(t.dims(), GridDims::new(0, 0));

        let nothing = slots("");
        assert!(nothing.has_no_data());
    }

    #[test]
    fn fields_are_trimmed() {
        let t = berth_assignments_from_reader(" ship , berth \n 4 , 2 \n5,x\n".as_bytes()).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.skipped(), 1);
        assert_eq!(t.records()[0].ship(), ShipId::new(4));
        assert_eq!(t.records()[0].berth(), BerthId::new(2));
    }

    #[test]
    fn start_times_reject_non_finite_values() {
        let t = ship_start_times_from_reader("ship,e_s\n1,2.5\n2,nan\n3,inf\n4,\n5,1e1\n".as_bytes())
            .unwrap();
        let starts: Vec<(i64, f64)> = t
            .records()
            .iter()
            .map(|r| (r.ship().value(), r.start()))
            .collect();
        assert_eq!(starts, vec![(1, 2.5), (5, 10.0)]);
        assert_eq!(t.skipped(), 3);
    }

    #[test]
    fn compartment_start_keeps_empty_k_as_none() {
        let t = compartment_start_times_from_reader(
            "ship,k,e_sk\n1,0,3.0\n1,,4.0\n2,q,1.0\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.records()[0].compartment(), Some(CompartmentId::new(0)));
        assert_eq!(t.records()[1].compartment(), None);
        assert_eq!(t.skipped(), 1);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().expect("tmp file");
        write!(file, "ship,k,row,slot\n7,2,3,4\n").expect("write");
        let t = load_slot_allocations(file.path()).expect("load");
        assert_eq!(t.dims(), GridDims::new(4, 5));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_berth_assignments(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open(_)));
    }
}
