//! Universe - owner of the grid, the PRNG, and the ghost table.
//!
//! The host drives exactly one `tick()` per rendered frame, drains its paint
//! queue into `set_cell`/`set_ghost` beforehand, and reads the render view
//! afterwards. Everything is single-threaded; the only shared surface is the
//! render borrow, which is read-only and invalidated by the next mutation.

use std::collections::TryReserveError;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cell::{Cell, Species};
use crate::elements::{FIRE_LIFE_MAX, FIRE_LIFE_MIN, SMOKE_LIFE_MAX, SMOKE_LIFE_MIN};
use crate::ghost::{self, GhostGroup, GhostTable};
use crate::grid::Grid;
use crate::update;

/// Seed used by [`Universe::new`] when the host does not care about replay.
const DEFAULT_SEED: u64 = 0x5EED;

pub struct Universe {
    pub grid: Grid,
    generation: u32,
    rng: ChaCha8Rng,
    ghosts: GhostTable,
    /// Pointer position in grid space, for ghost gaze. None when hidden.
    cursor: Option<(i32, i32)>,
}

impl Universe {
    /// Construct with all allocations up front. The `Err` is the one
    /// out-of-memory surface the host sees ("failed to initialize
    /// simulation"); after this, the core never allocates per tick.
    pub fn try_new(width: usize, height: usize, seed: u64) -> Result<Self, TryReserveError> {
        let grid = Grid::try_new(width, height)?;
        log::debug!("universe allocated: {width}x{height}, seed {seed:#x}");
        Ok(Self {
            grid,
            generation: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            ghosts: GhostTable::new(),
            cursor: None,
        })
    }

    /// Deterministic replay constructor: same dimensions, seed and paint
    /// stream reproduce byte-identical cell stores after every tick.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        Self::try_new(width, height, seed).expect("universe allocation failed")
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self::with_seed(width, height, DEFAULT_SEED)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Advance one generation: ghost groups first (side-table pass), then
    /// the chunk scan.
    pub fn tick(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let clock = self.generation as u8;

        if !self.ghosts.is_empty() {
            ghost::step_groups(&mut self.grid, &mut self.ghosts, &mut self.rng, clock, self.cursor);
        }
        update::step(&mut self.grid, &mut self.rng, self.generation);
    }

    /// Plain paint path: write one cell of `species` at `(x, y)`.
    ///
    /// Coordinates clamp to the grid; unknown species codes paint Empty.
    /// The eraser (Empty) always overwrites; any other species only fills
    /// Empty cells. `ra` is randomized for Sand and Water (shade / flow
    /// bias), `rb` initialized for Fire and Smoke (lifetime). The clock is
    /// left unstamped so the first tick after paint still processes the
    /// cell. Ghost cells painted here get group 0 and stay unmanaged; use
    /// [`Universe::set_ghost`] for drifting clusters.
    pub fn set_cell(&mut self, x: i32, y: i32, species: u8) {
        let (x, y) = self.clamp(x, y);
        let species = Species::from_u8(species);

        if species != Species::Empty && self.grid.get(x, y).species != Species::Empty {
            return;
        }

        let mut cell = Cell::new(species);
        match species {
            Species::Sand | Species::Water => cell.ra = self.rng.gen(),
            Species::Fire => cell.rb = self.rng.gen_range(FIRE_LIFE_MIN..=FIRE_LIFE_MAX),
            Species::Smoke => cell.rb = self.rng.gen_range(SMOKE_LIFE_MIN..=SMOKE_LIFE_MAX),
            _ => {}
        }
        self.grid.set(x, y, cell);
    }

    /// Hand out the next ghost group id (1..=255, recycled after wrap).
    pub fn alloc_ghost_group(&mut self) -> u32 {
        let id = self.ghosts.alloc();
        log::debug!("ghost group {id} allocated");
        id
    }

    /// Ghost paint path: one body cell of `group` with an explicit role tag
    /// (`rb`: 0 body, 1 eye zone, 2 active eye). Only fills Empty cells.
    /// The group's table entry is created on first paint.
    pub fn set_ghost(&mut self, x: i32, y: i32, group: u32, rb: u8) {
        let (x, y) = self.clamp(x, y);
        if self.grid.get(x, y).species != Species::Empty {
            return;
        }
        self.ghosts.ensure(group, &mut self.rng);
        let mut cell = Cell::new(Species::Ghost);
        cell.ra = group as u8;
        cell.rb = rb;
        self.grid.set(x, y, cell);
    }

    /// Table entry for a group, if it is still alive.
    pub fn ghost_group(&self, id: u32) -> Option<&GhostGroup> {
        self.ghosts.get(id)
    }

    /// Report the pointer position so ghost eyes can track it.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        let (x, y) = self.clamp(x, y);
        self.cursor = Some((x, y));
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Borrow the render view: `2 * width * height` bytes, row-major,
    /// `[species, rb]` per cell. Valid until the next mutation.
    #[inline]
    pub fn cell_render(&self) -> &[u8] {
        self.grid.render()
    }

    /// Raw pointer form of the render view for the GPU uploader.
    #[inline]
    pub fn cell_render_ptr(&self) -> (*const u8, usize) {
        let view = self.grid.render();
        (view.as_ptr(), view.len())
    }

    #[inline]
    fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.clamp(0, self.grid.width() as i32 - 1),
            y.clamp(0, self.grid.height() as i32 - 1),
        )
    }
}
