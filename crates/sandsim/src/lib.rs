//! Falling-sand simulation core.
//!
//! A 2D grid of discrete material cells evolves under local rules: sand
//! falls and piles, water flows and levels, fire rises and dies into smoke,
//! ghost clusters drift as rigid shapes. The crate is the simulation only -
//! it exposes a two-byte-per-cell render view for a GPU shader and a paint
//! API for an input handler, and stays out of rendering, input and UI.
//!
//! The hot path is the chunked tick: the grid is covered in 32x32 tiles,
//! each tracking a tight dirty rectangle, and the scheduler only scans cells
//! inside pre-tick dirty rectangles. A settled scene costs almost nothing.
//!
//! Element table (the `ra`/`rb` registers are per-species):
//!
//! | Code | Name  | `ra`                 | `rb`                          |
//! |------|-------|----------------------|-------------------------------|
//! | 0    | Empty | -                    | -                             |
//! | 1    | Sand  | shade bias           | -                             |
//! | 2    | Water | flow direction bit 0 | -                             |
//! | 3    | Wall  | -                    | -                             |
//! | 4    | Fire  | -                    | remaining life                |
//! | 5    | Ghost | group id             | 0 body / 1 eye zone / 2 eye   |
//! | 6    | Smoke | -                    | remaining life                |
//!
//! # Example
//!
//! ```
//! use sandsim::{Species, Universe};
//!
//! let mut universe = Universe::new(64, 64);
//! universe.set_cell(32, 0, Species::Sand as u8);
//! for _ in 0..63 {
//!     universe.tick();
//! }
//! // The grain has fallen to the floor.
//! assert_eq!(universe.grid.get(32, 63).species, Species::Sand);
//!
//! // Two bytes per cell, ready for texture upload.
//! let view = universe.cell_render();
//! assert_eq!(view.len(), 2 * 64 * 64);
//! ```

pub mod api;
pub mod cell;
pub mod chunk;
mod elements;
pub mod ghost;
pub mod grid;
mod update;
pub mod universe;

pub use api::CellApi;
pub use cell::{Cell, Species};
pub use chunk::{ChunkIndex, DirtyRect, CHUNK_SIZE};
pub use ghost::{GhostGroup, GhostTable};
pub use grid::Grid;
pub use universe::Universe;
