//! Water: falls like sand, then creeps horizontally along a persistent flow
//! direction kept in `ra` bit 0. Quenches adjacent fire.

use crate::api::CellApi;
use crate::cell::{Cell, Species};
use crate::elements::{quench, NEIGHBORS8};

/// Chance per freefall tick to re-randomize `ra`, decorrelating the flow
/// bias of neighboring droplets.
const RESEED_CHANCE: f64 = 0.05;

pub(crate) fn update_water(api: &mut CellApi) {
    // Contact reaction first. The scan is bottom-to-top, so when water sits
    // below fire this rule runs before the fire's own check; waiting a tick
    // would let gravity separate the pair.
    for &(dx, dy) in &NEIGHBORS8 {
        if api.get(dx, dy).species == Species::Fire {
            quench(api, dx, dy);
            return;
        }
    }

    let mut me = api.get(0, 0);
    let below = api.get(0, 1);

    if below.species == Species::Empty {
        if api.rand_chance(RESEED_CHANCE) {
            me.ra = api.rand_byte();
        }
        api.set(0, 0, Cell::EMPTY);
        api.set(0, 1, me);
        return;
    }

    let dir = if api.rand_byte() & 1 == 0 { -1 } else { 1 };
    for dx in [dir, -dir] {
        if api.get(dx, 1).species == Species::Empty {
            api.set(0, 0, Cell::EMPTY);
            api.set(dx, 1, me);
            return;
        }
    }

    // Fully blocked below: one horizontal step along the persistent flow
    // direction, flipping it when blocked. Enclosed water writes nothing and
    // settles, keeping its chunk clean.
    let flow = if me.ra & 1 == 0 { -1 } else { 1 };
    if api.get(flow, 0).species == Species::Empty {
        api.set(0, 0, Cell::EMPTY);
        api.set(flow, 0, me);
    } else if api.get(-flow, 0).species == Species::Empty {
        me.ra ^= 1;
        api.set(0, 0, me);
    }
}
