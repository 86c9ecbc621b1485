//! Chunk index - dirty-rect tracking over fixed-size tiles.
//!
//! The grid is covered by 32x32 chunks. Each chunk carries a dirty flag and
//! a tight bounding rectangle of the cells written since it was last
//! scanned. The scheduler only walks cells inside pre-tick dirty rectangles,
//! which is what keeps a settled grid nearly free.

pub const CHUNK_SIZE: usize = 32;

/// Tight bounding box of written cells, in absolute grid coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DirtyRect {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl DirtyRect {
    /// Degenerate rect seeded from a single cell.
    #[inline]
    const fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Min/max-expand to include `(x, y)`.
    #[inline]
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// One tile of the chunk index.
///
/// `rect` is only meaningful while `dirty` is set; it is re-seeded from the
/// first write after a scan rather than cleared to a sentinel.
#[derive(Clone, Copy, Debug)]
struct Chunk {
    dirty: bool,
    rect: DirtyRect,
}

impl Chunk {
    const fn clean() -> Self {
        Self {
            dirty: false,
            rect: DirtyRect::at(0, 0),
        }
    }
}

/// Dirty-rect tracker covering a `width x height` cell grid.
pub struct ChunkIndex {
    cols: usize,
    rows: usize,
    chunks: Vec<Chunk>,
}

impl ChunkIndex {
    pub fn new(width: usize, height: usize) -> Self {
        let cols = width.div_ceil(CHUNK_SIZE);
        let rows = height.div_ceil(CHUNK_SIZE);
        Self {
            cols,
            rows,
            chunks: vec![Chunk::clean(); cols * rows],
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> usize {
        (y / CHUNK_SIZE) * self.cols + (x / CHUNK_SIZE)
    }

    /// Record a write at cell `(x, y)`: set the covering chunk dirty and
    /// expand its rectangle. Caller guarantees in-bounds coordinates.
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize) {
        let idx = self.index_of(x, y);
        let chunk = &mut self.chunks[idx];
        if chunk.dirty {
            chunk.rect.expand(x, y);
        } else {
            chunk.dirty = true;
            chunk.rect = DirtyRect::at(x, y);
        }
    }

    /// Snapshot-and-clear protocol for the scheduler: returns the dirty
    /// rectangle of chunk `(cx, cy)` and clears the flag, or None if the
    /// chunk is clean. Writes made after this call re-dirty the chunk for
    /// the next tick.
    #[inline]
    pub fn begin_scan(&mut self, cx: usize, cy: usize) -> Option<DirtyRect> {
        let chunk = &mut self.chunks[cy * self.cols + cx];
        if !chunk.dirty {
            return None;
        }
        chunk.dirty = false;
        Some(chunk.rect)
    }

    /// Current dirty rectangles, for partial texture uploads and for the
    /// dirty-rect soundness tests.
    pub fn dirty_rects(&self) -> impl Iterator<Item = DirtyRect> + '_ {
        self.chunks.iter().filter(|c| c.dirty).map(|c| c.rect)
    }

    /// True if any chunk has pending work.
    pub fn any_dirty(&self) -> bool {
        self.chunks.iter().any(|c| c.dirty)
    }
}
