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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dock_viz_core::color::ColorAssignment;
use dock_viz_core::id::{CompartmentId, ShipId};
use dock_viz_model::grid::{GridDims, SlotGrid};
use dock_viz_model::rec::{AllocationRecord, CompartmentStartRecord, ShipStartRecord};
use dock_viz_render::chart::{Chart, OverviewChart, RowChart, StartTimeChart};
use dock_viz_render::style::{StyleConfigBuilder, StyleContext};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const SEED: u64 = 0x5107_C0DE;

fn gen_grid(rows: i64, slots: i64, rng: &mut impl Rng) -> SlotGrid {
    let records: Vec<AllocationRecord> = (0..rows)
        .flat_map(|row| (0..slots).map(move |slot| (row, slot)))
        .filter_map(|(row, slot)| {
            rng.random_bool(0.8).then(|| {
                AllocationRecord::new(
                    ShipId::new(rng.random_range(0..24)),
                    CompartmentId::new(rng.random_range(-1..6)),
                    row,
                    slot,
                )
            })
        })
        .collect();
    SlotGrid::build(&records, GridDims::new(rows as usize, slots as usize))
        .expect("bench grid fits")
}

fn offline_style() -> StyleContext {
    StyleContext::new(StyleConfigBuilder::new().load_system_fonts(false).build())
}

fn bench_grid_charts(c: &mut Criterion) {
    let style = offline_style();
    let mut group = c.benchmark_group("compose_grid");
    for &(rows, slots) in &[(4i64, 24i64), (12, 64), (32, 160)] {
        let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ (rows * slots) as u64);
        let grid = gen_grid(rows, slots, &mut rng);
        let colors = ColorAssignment::from_sorted(grid.ships().iter().copied());
        group.throughput(Throughput::Elements((rows * slots) as u64));

        let label = format!("{rows}x{slots}");
        group.bench_with_input(BenchmarkId::new("row", &label), &grid, |b, grid| {
            b.iter(|| black_box(RowChart::new(grid, 0, &colors).compose(&style)))
        });
        group.bench_with_input(BenchmarkId::new("overview", &label), &grid, |b, grid| {
            b.iter(|| black_box(OverviewChart::new(grid, &colors).compose(&style)))
        });
    }
    group.finish();
}

fn bench_timeline(c: &mut Criterion) {
    let style = offline_style();
    let mut group = c.benchmark_group("compose_start_times");
    for &ships in &[8i64, 32, 128] {
        let mut rng = ChaCha8Rng::seed_from_u64(SEED.rotate_left(11) ^ ships as u64);
        let ship_starts: Vec<ShipStartRecord> = (0..ships)
            .map(|s| ShipStartRecord::new(ShipId::new(s), rng.random_range(0.0..100.0)))
            .collect();
        let compartment_starts: Vec<CompartmentStartRecord> = (0..ships * 6)
            .map(|i| {
                CompartmentStartRecord::new(
                    ShipId::new(i / 6),
                    Some(CompartmentId::new(i % 6)),
                    rng.random_range(0.0..120.0),
                )
            })
            .collect();
        let colors = ColorAssignment::from_sorted((0..ships).map(ShipId::new));
        let chart = StartTimeChart::new(ship_starts, compartment_starts, &colors);

        group.throughput(Throughput::Elements(ships as u64 * 7));
        group.bench_function(BenchmarkId::from_parameter(ships), |b| {
            b.iter(|| black_box(chart.compose(&style)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid_charts, bench_timeline);
criterion_main!(benches);
