//! ASCII diagnostic: pour sand and water into a walled basin and watch it
//! settle.
//!
//! Run with: cargo run --example settling_demo -p sandsim

use sandsim::{Species, Universe};

const W: usize = 48;
const H: usize = 24;

fn glyph(species: Species) -> char {
    match species {
        Species::Empty => ' ',
        Species::Sand => '.',
        Species::Water => '~',
        Species::Wall => '#',
        Species::Fire => '^',
        Species::Ghost => 'G',
        Species::Smoke => '\'',
    }
}

fn print_frame(universe: &Universe, tick: u32) {
    println!("--- tick {tick} ---");
    for y in 0..H as i32 {
        let row: String = (0..W as i32)
            .map(|x| glyph(universe.grid.get(x, y).species))
            .collect();
        println!("|{row}|");
    }
}

fn main() {
    env_logger::init();

    let mut universe = Universe::new(W, H);

    // Basin floor and sides.
    for x in 4..=43 {
        universe.set_cell(x, 20, Species::Wall as u8);
    }
    for y in 10..=20 {
        universe.set_cell(4, y, Species::Wall as u8);
        universe.set_cell(43, y, Species::Wall as u8);
    }

    let mut tick = 0;
    for _ in 0..120 {
        universe.set_cell(14, 2, Species::Sand as u8);
        universe.set_cell(32, 2, Species::Water as u8);
        universe.tick();
        tick += 1;
    }
    print_frame(&universe, tick);

    for _ in 0..180 {
        universe.tick();
        tick += 1;
    }
    print_frame(&universe, tick);

    let sand = universe.grid.count(Species::Sand);
    let water = universe.grid.count(Species::Water);
    println!("settled: {sand} sand, {water} water");
}
