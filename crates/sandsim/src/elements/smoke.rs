//! Smoke: rises like fire, drifts sideways, fades out to nothing.

use crate::api::CellApi;
use crate::cell::{Cell, Species};

/// Lifetime range for smoke, whether painted or spawned by dying fire.
pub(crate) const SMOKE_LIFE_MIN: u8 = 60;
pub(crate) const SMOKE_LIFE_MAX: u8 = 120;

/// Sideways drift chance per tick.
const DRIFT_CHANCE: f64 = 0.3;

/// A fresh smoke cell with a random lifetime from the Universe stream.
pub(crate) fn spawn(api: &mut CellApi) -> Cell {
    let mut cell = Cell::new(Species::Smoke);
    cell.rb = api.rand_range(SMOKE_LIFE_MIN, SMOKE_LIFE_MAX);
    cell
}

pub(crate) fn update_smoke(api: &mut CellApi) {
    let me = api.get(0, 0);
    let rb = me.rb.saturating_sub(1);
    if rb == 0 {
        api.set(0, 0, Cell::EMPTY);
        return;
    }

    let mut next = me;
    next.rb = rb;

    if api.rand_chance(DRIFT_CHANCE) {
        let dx = if api.rand_byte() & 1 == 0 { -1 } else { 1 };
        if api.get(dx, 0).species == Species::Empty {
            api.set(0, 0, Cell::EMPTY);
            api.set(dx, 0, next);
            return;
        }
    }

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

    // Trapped: keep fading where it is so expiry still happens.
    api.set(0, 0, next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::Universe;

    #[test]
    fn smoke_rises() {
        let mut universe = Universe::with_seed(8, 8, 17);
        let mut smoke = Cell::new(Species::Smoke);
        smoke.rb = 100;
        universe.grid.set(4, 6, smoke);

        for _ in 0..20 {
            universe.tick();
        }

        assert_eq!(universe.grid.count(Species::Smoke), 1);
        let found = (0..3).any(|y| (0..8).any(|x| universe.grid.get(x, y).species == Species::Smoke));
        assert!(found, "smoke should have risen to the top rows");
    }

    #[test]
    fn smoke_expires_to_empty() {
        let mut universe = Universe::with_seed(8, 8, 17);
        let mut smoke = Cell::new(Species::Smoke);
        smoke.rb = 3;
        universe.grid.set(4, 4, smoke);

        for _ in 0..3 {
            universe.tick();
        }

        assert_eq!(universe.grid.count(Species::Smoke), 0);
        assert_eq!(universe.grid.count(Species::Empty), 64);
    }

    #[test]
    fn trapped_smoke_still_fades() {
        let mut universe = Universe::with_seed(8, 8, 17);
        // Seal a pocket: smoke cannot rise or drift, only fade.
        for (x, y) in [(3, 3), (4, 3), (5, 3), (3, 4), (5, 4)] {
            universe.grid.set(x, y, Cell::new(Species::Wall));
        }
        let mut smoke = Cell::new(Species::Smoke);
        smoke.rb = 5;
        universe.grid.set(4, 4, smoke);

        for _ in 0..5 {
            universe.tick();
        }

        assert_eq!(universe.grid.get(4, 4).species, Species::Empty);
    }
}
