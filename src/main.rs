//! Snake Collide headless demo
//!
//! Steers a greedy snake toward food, dashing a few cells now and then, and
//! logs every verdict until the run ends.
//!
//! Usage: `snake-collide [settings.json] [seed]`

use std::collections::VecDeque;
use std::path::PathBuf;

use glam::{IVec2, Vec2};
use snake_collide::GridSettings;
use snake_collide::sim::{
    CellState, CollisionArbiter, CollisionResult, RngState, Segment, TickInput, tick,
};

const DEMO_SEED: u64 = 0x5eed;
const MAX_TICKS: u32 = 5000;
const START_LENGTH: i32 = 4;
const FOOD_ON_FIELD: usize = 3;
const OBSTACLE_COUNT: usize = 6;
/// Every Nth tick the head jumps `DASH_CELLS` at once
const DASH_INTERVAL: u32 = 40;
const DASH_CELLS: i32 = 3;

const DIRECTIONS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Snake Collide (headless demo) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(DEMO_SEED);

    let settings = GridSettings::load_or_default(settings_path.as_deref());
    log::info!(
        "Field {}x{} cells ({} px per cell), seed {}",
        settings.width,
        settings.height,
        settings.cell_size,
        seed
    );

    run(&settings, seed);
}

/// Direction that brings `head` closest to `target`, never reversing
fn steer(head: IVec2, heading: IVec2, target: IVec2) -> IVec2 {
    DIRECTIONS
        .iter()
        .copied()
        .filter(|&d| d != -heading)
        .min_by_key(|&d| {
            let next = head + d;
            let dist = (target - next).abs();
            // Prefer keeping the current heading on ties
            (dist.x + dist.y, i32::from(d != heading))
        })
        .unwrap_or(heading)
}

fn spawn(
    arbiter: &mut CollisionArbiter,
    rng: &mut rand_pcg::Pcg32,
    kind: CellState,
) -> Option<IVec2> {
    let cell = arbiter.random_empty_position(rng)?;
    arbiter.claim(cell.x, cell.y, kind).then_some(cell)
}

fn run(settings: &GridSettings, seed: u64) {
    let mut rng = RngState::new(seed).to_rng();
    let mut arbiter = CollisionArbiter::new(settings);

    let start = IVec2::new(settings.width as i32 / 2, settings.height as i32 / 2);
    let mut body: VecDeque<IVec2> = (0..START_LENGTH).map(|i| start - IVec2::X * i).collect();
    let mut heading = IVec2::X;
    let mut pending_growth = 0u32;

    let segments: Vec<Segment> = body.iter().skip(1).map(|c| Segment::new(c.as_vec2())).collect();
    arbiter.update_snake_grid(start.as_vec2(), &segments);

    let obstacles: Vec<Vec2> = (0..OBSTACLE_COUNT)
        .filter_map(|_| spawn(&mut arbiter, &mut rng, CellState::Obstacle))
        .map(|c| c.as_vec2())
        .collect();
    let mut food: Vec<Vec2> = (0..FOOD_ON_FIELD)
        .filter_map(|_| spawn(&mut arbiter, &mut rng, CellState::Food))
        .map(|c| c.as_vec2())
        .collect();
    log::info!("Placed {} obstacles and {} food", obstacles.len(), food.len());

    let mut eaten = 0u32;
    for tick_index in 1..=MAX_TICKS {
        let Some(&head) = body.front() else {
            break;
        };

        let target = food
            .iter()
            .map(|f| f.as_ivec2())
            .min_by_key(|f| (*f - head).abs().element_sum())
            .unwrap_or(start);
        heading = steer(head, heading, target);

        let step = if tick_index % DASH_INTERVAL == 0 {
            DASH_CELLS
        } else {
            1
        };
        let new_head = head + heading * step;

        body.push_front(new_head);
        if pending_growth > 0 {
            pending_growth -= 1;
        } else {
            body.pop_back();
        }

        let segments: Vec<Segment> = body
            .iter()
            .skip(1)
            .map(|c| Segment::new(c.as_vec2()))
            .collect();
        let report = tick(
            &mut arbiter,
            &TickInput {
                head: new_head.as_vec2(),
                previous_head: Some(head.as_vec2()),
                segments: &segments,
                food: &food,
                obstacles: &obstacles,
            },
        );

        if report.is_fatal() {
            log::info!(
                "Tick {}: {} at {} (length {}, {} eaten)",
                tick_index,
                report.collision.as_str(),
                new_head,
                body.len(),
                eaten
            );
            match serde_json::to_string(&report) {
                Ok(json) => log::info!("Final report: {}", json),
                Err(e) => log::warn!("Could not serialize report: {}", e),
            }
            return;
        }

        if let CollisionResult::Food { index } = report.food {
            food.swap_remove(index);
            eaten += 1;
            pending_growth += 1;
            log::info!("Tick {}: ate food at {} (length {})", tick_index, new_head, body.len());

            match spawn(&mut arbiter, &mut rng, CellState::Food) {
                Some(cell) => food.push(cell.as_vec2()),
                None => log::info!("Field is full, no more food"),
            }
        }
    }

    log::info!("Reached {} ticks alive with {} eaten", MAX_TICKS, eaten);
}
