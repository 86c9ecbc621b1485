//! Scheduler - the per-tick chunk and cell scan.
//!
//! Scan order is chosen to minimize directional bias while staying
//! deterministic: chunk rows bottom-to-top, horizontal direction alternating
//! with generation parity, and inside each dirty chunk the same order over
//! the snapshotted dirty rectangle.
//!
//! Bottom-to-top means a falling grain's destination row is visited after
//! the grain itself, so it moves into the gap before the gap is scanned.
//! The clock stamp keeps the scan from processing a moved cell a second
//! time when it reaches the cell's new row.

use rand_chacha::ChaCha8Rng;

use crate::api::CellApi;
use crate::cell::Species;
use crate::elements;
use crate::grid::Grid;

/// Run one generation over every dirty chunk.
pub(crate) fn step(grid: &mut Grid, rng: &mut ChaCha8Rng, generation: u32) {
    let clock = generation as u8;
    let scan_right = generation % 2 == 0;
    let cols = grid.chunks().cols();
    let rows = grid.chunks().rows();

    for cy in (0..rows).rev() {
        let col_order: Box<dyn Iterator<Item = usize>> = if scan_right {
            Box::new(0..cols)
        } else {
            Box::new((0..cols).rev())
        };

        for cx in col_order {
            // Snapshot-and-clear: writes made while scanning this chunk
            // re-dirty it for the next tick, not this one.
            let Some(rect) = grid.chunks_mut().begin_scan(cx, cy) else {
                continue;
            };

            for y in (rect.min_y..=rect.max_y).rev() {
                let row_order: Box<dyn Iterator<Item = usize>> = if scan_right {
                    Box::new(rect.min_x..=rect.max_x)
                } else {
                    Box::new((rect.min_x..=rect.max_x).rev())
                };

                for x in row_order {
                    update_cell_at(grid, rng, x as i32, y as i32, clock);
                }
            }
        }
    }
}

#[inline]
fn update_cell_at(grid: &mut Grid, rng: &mut ChaCha8Rng, x: i32, y: i32, clock: u8) {
    let cell = grid.get(x, y);
    if cell.species == Species::Empty || cell.species == Species::Wall {
        return;
    }
    // Managed ghost cells move in the group pass, outside the per-cell
    // model. Re-dirty them on every scan (stamped or not) so the pre-tick
    // rectangles keep covering the cluster while it idles between steps;
    // a translation then always starts from cells inside pre-tick rects.
    if cell.species == Species::Ghost && cell.ra != 0 {
        grid.chunks_mut().mark(x as usize, y as usize);
        return;
    }
    if cell.clock == clock {
        return;
    }
    let mut api = CellApi::new(grid, rng, x, y, clock);
    elements::update_cell(cell.species, &mut api);
}
