//! End-to-end scenarios: small worlds, a fixed script, an expected outcome.
//!
//! Where an outcome depends on how grains roll off 45-degree slopes or how
//! smoke wanders, the assertions cover the guaranteed core of the behavior
//! (containment, conservation, shape) rather than idealized cell positions.

use sandsim::{Cell, Species, Universe};

fn positions_of(universe: &Universe, species: Species) -> Vec<(i32, i32)> {
    let (w, h) = (universe.width() as i32, universe.height() as i32);
    let mut out = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if universe.grid.get(x, y).species == species {
                out.push((x, y));
            }
        }
    }
    out
}

/// S1: a single sand grain falls to the floor.
#[test]
fn s1_single_grain_falls_to_the_floor() {
    let mut universe = Universe::with_seed(8, 8, 1);
    universe.set_cell(4, 0, Species::Sand as u8);

    for _ in 0..8 {
        universe.tick();
    }

    assert_eq!(universe.grid.get(4, 7).species, Species::Sand);
    assert_eq!(universe.grid.count(Species::Empty), 8 * 8 - 1);
}

/// S2: sand painted from one spout piles up on a wall segment.
#[test]
fn s2_sand_piles_on_a_wall() {
    let mut universe = Universe::with_seed(16, 16, 2);
    for x in 4..=12 {
        universe.set_cell(x, 10, Species::Wall as u8);
    }

    for _ in 0..20 {
        universe.set_cell(8, 0, Species::Sand as u8);
        universe.tick();
    }
    // Let everything settle.
    for _ in 0..40 {
        universe.tick();
    }

    let sand = positions_of(&universe, Species::Sand);
    assert_eq!(sand.len(), 20, "every painted grain must survive");

    // The pile peak sits on the wall above the spout.
    assert_eq!(universe.grid.get(8, 9).species, Species::Sand);

    // Nothing may stack higher than 5 rows above the wall.
    assert!(sand.iter().all(|&(_, y)| y >= 5));

    // The bulk of the pile rests on the wall span; at worst the few grains
    // that roll off the 45-degree slope end up on the floor beside it.
    let on_wall = sand
        .iter()
        .filter(|&&(x, y)| (4..=12).contains(&x) && (5..=9).contains(&y))
        .count();
    assert!(on_wall >= 12, "only {on_wall} grains settled on the wall");

    // The wall shadow stays empty: nothing can get under the segment.
    for y in 11..=13 {
        for x in 5..=11 {
            assert_ne!(universe.grid.get(x, y).species, Species::Sand);
        }
    }
}

/// S3: water poured into a walled basin spreads, levels, and stays below
/// the required surface row.
#[test]
fn s3_water_fills_a_basin() {
    let mut universe = Universe::with_seed(16, 16, 3);
    for x in 2..=13 {
        universe.set_cell(x, 14, Species::Wall as u8);
    }
    for y in 8..=14 {
        universe.set_cell(2, y, Species::Wall as u8);
        universe.set_cell(13, y, Species::Wall as u8);
    }

    // The spout sits on the target surface row, not above it: water never
    // moves upward, so a drop released on a row that must end up clear
    // would strand there once the rows below are full. Pouring at (7, 11)
    // self-limits instead - once the basin below the surface band is full,
    // the spout cell stays occupied and further paints are skipped.
    for _ in 0..60 {
        universe.set_cell(7, 11, Species::Water as u8);
        universe.tick();
    }
    for _ in 0..200 {
        universe.tick();
    }

    let water = positions_of(&universe, Species::Water);

    // The basin holds exactly 30 cells at or below the spout row; the pour
    // cannot exceed that and 60 attempts are ample to fill it.
    assert_eq!(water.len(), 30, "basin should fill to the spout row");

    // The surface bound: no water above row 11, in particular rows 8 and 9.
    for y in 0..=10 {
        for x in 0..16 {
            assert_ne!(
                universe.grid.get(x, y).species,
                Species::Water,
                "water stranded above the surface at ({x}, {y})"
            );
        }
    }

    // The standing rows leveled out completely - with the count check this
    // also proves strict containment in the basin interior.
    for y in 11..=13 {
        for x in 3..=12 {
            assert_eq!(
                universe.grid.get(x, y).species,
                Species::Water,
                "hole at ({x}, {y})"
            );
        }
    }
}

/// S4: fire touching water consumes both into smoke.
#[test]
fn s4_fire_extinguishes_on_water() {
    let mut universe = Universe::with_seed(8, 8, 4);
    universe.set_cell(4, 4, Species::Water as u8);
    universe.set_cell(4, 3, Species::Fire as u8);

    universe.tick();

    // The reaction fires on the first tick, before gravity separates the
    // pair: both painted cells are now smoke, exactly where they were.
    assert_eq!(universe.grid.get(4, 4).species, Species::Smoke);
    assert_eq!(universe.grid.get(4, 3).species, Species::Smoke);

    universe.tick();

    assert_eq!(universe.grid.count(Species::Fire), 0);
    assert_eq!(universe.grid.count(Species::Water), 0);
    let smoke = positions_of(&universe, Species::Smoke);
    assert_eq!(smoke.len(), 2);
    // Smoke rises and drifts, but only within a cell of where it spawned.
    assert!(smoke
        .iter()
        .all(|&(x, y)| (3..=5).contains(&x) && (2..=4).contains(&y)));
}

/// S5: fire burns down to smoke, smoke fades to nothing.
#[test]
fn s5_fire_decays_to_smoke_then_empty() {
    let mut universe = Universe::with_seed(4, 4, 5);
    let mut fire = Cell::new(Species::Fire);
    fire.rb = 2;
    universe.grid.set(2, 2, fire);

    universe.tick();
    let fire_cells = positions_of(&universe, Species::Fire);
    assert_eq!(fire_cells.len(), 1);
    let (fx, fy) = fire_cells[0];
    assert_eq!(universe.grid.get(fx, fy).rb, 1, "lifetime must tick down");
    assert!(fy == 1 || fy == 2, "fire may rise at most one cell per tick");

    universe.tick();
    assert_eq!(universe.grid.count(Species::Fire), 0);
    assert_eq!(universe.grid.count(Species::Smoke), 1);

    // Longer than any smoke lifetime.
    for _ in 0..130 {
        universe.tick();
    }
    assert_eq!(universe.grid.count(Species::Empty), 4 * 4);
}

/// S6: seeded replay over a mixed scene, ghosts included.
#[test]
fn s6_determinism_under_seeded_replay() {
    let build = || {
        let mut universe = Universe::with_seed(32, 32, 0x5EED5);
        // Fixed pseudo-random paint stream (LCG, fully deterministic).
        let mut state = 0x2545F491u64;
        for _ in 0..100 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let x = ((state >> 33) % 32) as i32;
            let y = ((state >> 18) % 32) as i32;
            let species = ((state >> 8) % 5) as u8; // Empty..Fire
            universe.set_cell(x, y, species);
        }
        let group = universe.alloc_ghost_group();
        for dy in 0..3 {
            for dx in 0..4 {
                universe.set_ghost(20 + dx, 4 + dy, group, if dy == 1 { 1 } else { 0 });
            }
        }
        universe
    };

    let mut a = build();
    let mut b = build();

    for tick in 0..500 {
        a.tick();
        b.tick();
        assert_eq!(
            a.grid.cells(),
            b.grid.cells(),
            "cell stores diverged at tick {tick}"
        );
    }
    assert_eq!(a.cell_render(), b.cell_render());
    assert_eq!(a.generation(), b.generation());
}
