//! Per-element update rules dispatched from the tick scan.
//!
//! Two conventions shared by every rule:
//! - a move vacates the source (`api.set(0, 0, EMPTY)`) before writing the
//!   destination, so a partial write can never duplicate a cell;
//! - out-of-bounds reads come back as Wall, so rules need no edge checks.
//!
//! Reactions are folded into the rules rather than kept in a species matrix.
//! Two principles cover them all: density displacement (a denser cell
//! falling onto a lighter liquid swaps with it) and consumption on contact
//! (Water + Fire become two Smoke cells).

mod fire;
mod sand;
mod smoke;
mod water;

pub(crate) use fire::{FIRE_LIFE_MAX, FIRE_LIFE_MIN};
pub(crate) use smoke::{SMOKE_LIFE_MAX, SMOKE_LIFE_MIN};

use crate::api::CellApi;
use crate::cell::Species;

/// The 8-neighborhood, clockwise from straight up.
pub(crate) const NEIGHBORS8: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Dispatch to the rule for `species`.
///
/// Empty and Wall never reach here (the scan skips them); Ghost is a no-op
/// because cluster motion runs as a side-table pass before the scan.
#[inline]
pub(crate) fn update_cell(species: Species, api: &mut CellApi) {
    match species {
        Species::Sand => sand::update_sand(api),
        Species::Water => water::update_water(api),
        Species::Fire => fire::update_fire(api),
        Species::Smoke => smoke::update_smoke(api),
        Species::Empty | Species::Wall | Species::Ghost => {}
    }
}

/// Consume the current cell and the cell at `(dx, dy)`: both become Smoke
/// with fresh lifetimes. Used by the Water/Fire contact reaction from
/// whichever side the scan reaches first.
pub(crate) fn quench(api: &mut CellApi, dx: i32, dy: i32) {
    let here = smoke::spawn(api);
    let there = smoke::spawn(api);
    api.set(0, 0, here);
    api.set(dx, dy, there);
}
