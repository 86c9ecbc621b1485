//! Fire: rises, burns down its lifetime, dies into smoke.
//!
//! `rb` is the remaining lifetime. The shader maps it to the flame gradient,
//! so it must tick down visibly every frame.

use crate::api::CellApi;
use crate::cell::{Cell, Species};
use crate::elements::{quench, smoke, NEIGHBORS8};

/// Lifetime range assigned when fire is painted.
pub(crate) const FIRE_LIFE_MIN: u8 = 40;
pub(crate) const FIRE_LIFE_MAX: u8 = 80;

pub(crate) fn update_fire(api: &mut CellApi) {
    // Water wins on contact: both cells become smoke.
    for &(dx, dy) in &NEIGHBORS8 {
        if api.get(dx, dy).species == Species::Water {
            quench(api, dx, dy);
            return;
        }
    }

    let me = api.get(0, 0);
    let rb = me.rb.saturating_sub(1);
    if rb == 0 {
        let smoke_cell = smoke::spawn(api);
        api.set(0, 0, smoke_cell);
        return;
    }

    let mut next = me;
    next.rb = rb;

    // Rise one cell, up or up-diagonal, random tie-break. Never downward.
    let dir = api.rand_dir();
    let side = if api.rand_byte() & 1 == 0 { -1 } else { 1 };
    let order = if dir == 0 { [0, side, -side] } else { [dir, 0, -dir] };
    for dx in order {
        if api.get(dx, -1).species == Species::Empty {
            api.set(0, 0, Cell::EMPTY);
            api.set(dx, -1, next);
            return;
        }
    }

    // Pinned under something: age in place.
    api.set(0, 0, next);
}
