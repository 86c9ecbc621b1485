//! Ghost clusters: groups of cells that drift as one rigid shape.
//!
//! Rigid motion cuts across the per-cell rule model, so it runs as a
//! side-table pass once per tick, before the chunk scan. The per-cell rule
//! for Ghost is a no-op. Each painted cluster carries a group id in `ra`;
//! `rb` tags the cell's visual role (body, eye zone, active eye) for the
//! shader.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

use crate::cell::{Cell, Species};
use crate::grid::Grid;

pub const RB_BODY: u8 = 0;
pub const RB_EYE_ZONE: u8 = 1;
pub const RB_EYE: u8 = 2;

/// Ticks between retargets (new drift velocity + eye re-assignment).
const RETARGET_MIN: u8 = 30;
const RETARGET_MAX: u8 = 90;

/// Drift speed range in cells per tick. Below 1.0 so the quantized step
/// stalls some ticks and the cluster moves lazily.
const DRIFT_MIN: f32 = 0.2;
const DRIFT_MAX: f32 = 0.7;

/// Per-group state: continuous center of mass, drift velocity, and the
/// countdown to the next retarget.
#[derive(Clone, Copy, Debug)]
pub struct GhostGroup {
    pub center: Vec2,
    pub vel: Vec2,
    pub life: u8,
}

/// Side table of live ghost groups, keyed by group id. Ids are handed out
/// from 1..=255 (the low byte lives in `ra`; 0 is reserved for unmanaged
/// ghost cells) and recycled after wrap.
pub struct GhostTable {
    groups: FxHashMap<u32, GhostGroup>,
    next_id: u32,
}

impl Default for GhostTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GhostTable {
    pub fn new() -> Self {
        Self {
            groups: FxHashMap::default(),
            next_id: 1,
        }
    }

    pub fn alloc(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = if self.next_id >= 255 { 1 } else { self.next_id + 1 };
        id
    }

    /// Create the group entry on first paint, with a random initial drift.
    pub(crate) fn ensure(&mut self, id: u32, rng: &mut ChaCha8Rng) {
        self.groups.entry(id).or_insert_with(|| GhostGroup {
            center: Vec2::ZERO,
            vel: random_drift(rng),
            life: rng.gen_range(RETARGET_MIN..=RETARGET_MAX),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&GhostGroup> {
        self.groups.get(&id)
    }
}

fn random_drift(rng: &mut ChaCha8Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let speed = rng.gen_range(DRIFT_MIN..DRIFT_MAX);
    Vec2::from_angle(angle) * speed
}

/// Quantize the drift into a unit step, with jitter so the path wobbles.
fn unit_step(vel: Vec2, rng: &mut ChaCha8Rng) -> (i32, i32) {
    let jx: f32 = rng.gen_range(-0.5..0.5);
    let jy: f32 = rng.gen_range(-0.5..0.5);
    (
        (vel.x + jx).round().clamp(-1.0, 1.0) as i32,
        (vel.y + jy).round().clamp(-1.0, 1.0) as i32,
    )
}

/// One translation attempt per group per tick, issued by the scheduler
/// before the per-cell scan.
///
/// All-or-nothing: every member cell's destination must be Empty or another
/// cell of the same group, otherwise nothing moves and the group re-rolls
/// its drift. This keeps the shape perfectly intact. Moved cells are clock
/// stamped so the chunk scan skips them.
pub(crate) fn step_groups(
    grid: &mut Grid,
    table: &mut GhostTable,
    rng: &mut ChaCha8Rng,
    clock: u8,
    cursor: Option<(i32, i32)>,
) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;

    // Collect member positions per group in one sweep.
    let mut members: FxHashMap<u32, Vec<(i32, i32)>> = FxHashMap::default();
    for y in 0..h {
        for x in 0..w {
            let cell = grid.get(x, y);
            if cell.species == Species::Ghost && cell.ra != 0 {
                members.entry(u32::from(cell.ra)).or_default().push((x, y));
            }
        }
    }

    // Retire groups whose last cell was destroyed (erased by paint).
    table.groups.retain(|id, _| {
        let alive = members.contains_key(id);
        if !alive {
            log::debug!("ghost group {id} retired");
        }
        alive
    });

    // Sorted ids keep the PRNG draw order independent of map iteration.
    let mut ids: Vec<u32> = members.keys().copied().collect();
    ids.sort_unstable();

    for id in ids {
        let Some(group) = table.groups.get_mut(&id) else {
            continue;
        };
        let cells = &members[&id];

        // Refresh the center of mass from the actual cells.
        let sum = cells
            .iter()
            .fold(Vec2::ZERO, |acc, &(x, y)| acc + Vec2::new(x as f32, y as f32));
        group.center = sum / cells.len() as f32;

        if group.life == 0 {
            group.vel = random_drift(rng);
            group.life = rng.gen_range(RETARGET_MIN..=RETARGET_MAX);
            assign_eyes(grid, cells, group, cursor);
        } else {
            group.life -= 1;
        }

        let (dx, dy) = unit_step(group.vel, rng);
        if dx == 0 && dy == 0 {
            continue;
        }

        // Out-of-bounds destinations read as Wall and fail the test.
        let clear = cells.iter().all(|&(x, y)| {
            let dest = grid.get(x + dx, y + dy);
            dest.species == Species::Empty
                || (dest.species == Species::Ghost && u32::from(dest.ra) == id)
        });
        if !clear {
            group.vel = random_drift(rng);
            continue;
        }

        // Translate far-cells-first so a member never overwrites an
        // unmoved member ahead of it.
        let mut order = cells.clone();
        order.sort_unstable_by_key(|&(x, y)| -(x * dx + y * dy));
        for &(x, y) in &order {
            let mut cell = grid.get(x, y);
            cell.clock = clock;
            grid.set(x, y, Cell::EMPTY);
            grid.set(x + dx, y + dy, cell);
        }
        group.center += Vec2::new(dx as f32, dy as f32);
    }
}

/// Re-assign which eye-zone cells are the active 2x2 eye block.
///
/// The zone splits into left and right eyes around the group center; each
/// eye's block shifts toward the look direction (the cursor when the host
/// reports one, else the drift velocity), clamped inside the zone.
fn assign_eyes(grid: &mut Grid, cells: &[(i32, i32)], group: &GhostGroup, cursor: Option<(i32, i32)>) {
    let eye_cells: Vec<(i32, i32)> = cells
        .iter()
        .copied()
        .filter(|&(x, y)| {
            let rb = grid.get(x, y).rb;
            rb == RB_EYE_ZONE || rb == RB_EYE
        })
        .collect();
    if eye_cells.is_empty() {
        return;
    }

    let cx = group.center.x.round() as i32;
    let cy = group.center.y.round() as i32;
    let (look_dx, look_dy) = match cursor {
        Some((mx, my)) => ((mx - cx).signum(), (my - cy).signum()),
        None => (
            if group.vel.x.abs() > 0.1 { group.vel.x.signum() as i32 } else { 0 },
            if group.vel.y.abs() > 0.1 { group.vel.y.signum() as i32 } else { 0 },
        ),
    };

    let (left, right): (Vec<_>, Vec<_>) = eye_cells.iter().partition(|&&(x, _)| x <= cx);

    for zone in [&left, &right] {
        if zone.is_empty() {
            continue;
        }
        let min_x = zone.iter().map(|&&(x, _)| x).min().unwrap();
        let max_x = zone.iter().map(|&&(x, _)| x).max().unwrap();
        let min_y = zone.iter().map(|&&(_, y)| y).min().unwrap();
        let max_y = zone.iter().map(|&&(_, y)| y).max().unwrap();

        // 2x2 active block, centered in the zone then nudged toward the
        // look direction, clamped so it stays inside the zone bounds.
        let base_x = min_x + (max_x - min_x - 1) / 2;
        let base_y = min_y + (max_y - min_y - 1) / 2;
        let eye_x = (base_x + look_dx).clamp(min_x, (max_x - 1).max(min_x));
        let eye_y = (base_y + look_dy).clamp(min_y, (max_y - 1).max(min_y));

        for &&(x, y) in zone {
            let mut cell = grid.get(x, y);
            let active = (eye_x..=eye_x + 1).contains(&x) && (eye_y..=eye_y + 1).contains(&y);
            cell.rb = if active { RB_EYE } else { RB_EYE_ZONE };
            grid.set(x, y, cell);
        }
    }
}
