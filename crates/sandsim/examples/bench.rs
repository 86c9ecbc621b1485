//! Quick benchmark for the tick loop.
//!
//! Run with: cargo run --release --example bench -p sandsim
//!
//! The frame budget is 16 ms at 256x256. The interesting number is the idle
//! case: a settled scene with <5% Sand/Wall occupancy must cost next to
//! nothing, because the dirty-chunk scan skips everything clean.

use std::time::Instant;

use sandsim::{Species, Universe};

const SIZE: usize = 256;
const FRAMES: u32 = 300;

fn measure(label: &str, universe: &mut Universe) {
    // Warm up so one-off settling work is not billed to the loop.
    for _ in 0..50 {
        universe.tick();
    }

    let start = Instant::now();
    for _ in 0..FRAMES {
        universe.tick();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / f64::from(FRAMES);
    println!(
        "{label:<24} {avg_ms:>8.4} ms/tick  ({:.0} ticks/s)",
        1000.0 / avg_ms
    );
}

fn main() {
    env_logger::init();

    // Empty grid - pure scan overhead, should be ~zero after settling.
    let mut empty = Universe::new(SIZE, SIZE);
    measure("empty", &mut empty);

    // The performance property: settled sand piles + walls, <5% occupancy,
    // idle for the whole measurement.
    let mut idle = Universe::new(SIZE, SIZE);
    for x in 0..SIZE as i32 {
        idle.set_cell(x, 200, Species::Wall as u8);
    }
    for i in 0..2500 {
        idle.set_cell(40 + (i % 170), 199 - (i / 170), Species::Sand as u8);
    }
    measure("idle settled (<5%)", &mut idle);

    // Active worst case: a quarter of the grid raining sand through water.
    let mut active = Universe::new(SIZE, SIZE);
    for y in 0..64 {
        for x in 0..SIZE as i32 {
            active.set_cell(x, y, Species::Sand as u8);
        }
    }
    for y in 192..256 {
        for x in 0..SIZE as i32 {
            active.set_cell(x, y, Species::Water as u8);
        }
    }
    measure("active mixed", &mut active);

    // Fire column burning into smoke, lifetimes churning every tick.
    let mut burning = Universe::new(SIZE, SIZE);
    for y in 100..156 {
        for x in 100..156 {
            burning.set_cell(x, y, Species::Fire as u8);
        }
    }
    measure("burning block", &mut burning);
}
