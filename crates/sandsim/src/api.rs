//! Neighborhood API threaded into every element rule.
//!
//! A rule sees the world as relative offsets from the cell it is updating.
//! Every mutation made here stamps the moved cell with the current clock
//! byte (preventing double-update within the tick) and re-dirties the
//! enclosing chunk through the grid's single write path. Rules never touch
//! the store directly.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cell::Cell;
use crate::grid::Grid;

/// Short-lived view bundling the store, the Universe PRNG, the current cell
/// position and the tick's clock byte. No indirection: rules compile down to
/// direct grid accesses.
pub struct CellApi<'a> {
    grid: &'a mut Grid,
    rng: &'a mut ChaCha8Rng,
    x: i32,
    y: i32,
    clock: u8,
}

impl<'a> CellApi<'a> {
    pub fn new(grid: &'a mut Grid, rng: &'a mut ChaCha8Rng, x: i32, y: i32, clock: u8) -> Self {
        Self {
            grid,
            rng,
            x,
            y,
            clock,
        }
    }

    /// Read the cell at relative offset. Out-of-bounds reads return Wall so
    /// the grid edge acts as an immovable barrier.
    #[inline]
    pub fn get(&self, dx: i32, dy: i32) -> Cell {
        self.grid.get(self.x + dx, self.y + dy)
    }

    /// Write a cell at relative offset, stamped with the current clock.
    /// Out-of-bounds writes are no-ops.
    #[inline]
    pub fn set(&mut self, dx: i32, dy: i32, cell: Cell) {
        let mut stamped = cell;
        stamped.clock = self.clock;
        self.grid.set(self.x + dx, self.y + dy, stamped);
    }

    /// Exchange the current cell with the cell at relative offset. Both
    /// results are stamped, so neither side moves again this tick.
    #[inline]
    pub fn swap(&mut self, dx: i32, dy: i32) {
        let me = self.get(0, 0);
        let other = self.get(dx, dy);
        self.set(0, 0, other);
        self.set(dx, dy, me);
    }

    /// Uniform draw from {-1, 0, +1}.
    #[inline]
    pub fn rand_dir(&mut self) -> i32 {
        self.rng.gen_range(-1..=1)
    }

    /// Uniform byte from the per-Universe stream.
    #[inline]
    pub fn rand_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    /// Uniform draw from `lo..=hi`.
    #[inline]
    pub fn rand_range(&mut self, lo: u8, hi: u8) -> u8 {
        self.rng.gen_range(lo..=hi)
    }

    /// Bernoulli draw with probability `p`.
    #[inline]
    pub fn rand_chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }
}
