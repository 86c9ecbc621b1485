//! Sand: falls straight down, slides diagonally, sinks through liquids.

use crate::api::CellApi;
use crate::cell::{Cell, Species};

pub(crate) fn update_sand(api: &mut CellApi) {
    let me = api.get(0, 0);
    let below = api.get(0, 1);

    if below.species == Species::Empty {
        api.set(0, 0, Cell::EMPTY);
        api.set(0, 1, me);
        return;
    }

    // Density displacement: sink through a lighter liquid.
    if below.species.is_liquid() && me.species.density() > below.species.density() {
        api.swap(0, 1);
        return;
    }

    // Blocked below: slide down-diagonally, random side first.
    let dir = if api.rand_byte() & 1 == 0 { -1 } else { 1 };
    for dx in [dir, -dir] {
        if api.get(dx, 1).species == Species::Empty {
            api.set(0, 0, Cell::EMPTY);
            api.set(dx, 1, me);
            return;
        }
    }
    // At rest: write nothing, so a settled pile stops dirtying its chunk.
}
