//! Gallerist Headless Layout Harness
//!
//! Validates the pure layout engine without a renderer or wallet. Builds
//! galleries across a sweep of seeds, pages, and item counts, arranges
//! elements into them, and checks every structural invariant the 3D
//! scene relies on. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p gallerist-simtest
//!   cargo run -p gallerist-simtest -- --verbose

use gallerist_logic::arrange::{arrange_gallery, arrange_rooms};
use gallerist_logic::element::{page_doors, Picture, RoomElement};
use gallerist_logic::grid::{can_toggle_cell, from_grid, from_rooms, is_reachable, Grid, CELL_ROOM};
use gallerist_logic::growth::{build_gallery, MARGIN};
use gallerist_logic::persistence::{load_galleries, save_galleries, GalleryRoom};
use gallerist_logic::room::{recalculate_space, Room, NO_ROOM};

const SEEDS: &[&str] = &[
    "abc",
    "stake1u8pcjgmx7962w6hey5hhsd502araxp26kdtgagakhaqtq8sxy9w7g",
    "stake1uxpdrerp9wrxunfh6ukyv5267j70fzxjs0ykpees2os5fvs7ee8tg",
    "0x7a3b00ff41",
];

const ITEM_COUNTS: &[usize] = &[0, 5, 18, 42];
const PAGES: &[u32] = &[1, 2, 3];

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|arg| arg == "--verbose");
    println!("=== Gallerist Layout Harness ===\n");

    let mut results = Vec::new();

    // 1. Gallery growth sweep
    results.extend(validate_growth(verbose));

    // 2. Element arrangement sweep
    results.extend(validate_arrangement(verbose));

    // 3. Editor grid conversions and guards
    results.extend(validate_editor(verbose));

    // 4. Persistence round-trip
    results.extend(validate_persistence(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|result| result.passed).count();
    let failed = results.iter().filter(|result| !result.passed).count();
    let total = results.len();

    for result in &results {
        let icon = if result.passed { "✓" } else { "✗" };
        if !result.passed || verbose {
            println!("  {} {}: {}", icon, result.name, result.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn sample_pictures(seed: &str, count: usize) -> Vec<RoomElement> {
    (0..count)
        .map(|index| {
            RoomElement::picture(
                seed,
                &format!("artwork-{}", index),
                Picture {
                    image: format!("ipfs://Qm{}", index),
                    link: format!("https://pool.pm/{}", index),
                    description: "harness artwork".into(),
                    width: None,
                    height: None,
                    offline: false,
                },
            )
        })
        .collect()
}

// ── 1. Gallery growth ───────────────────────────────────────────────────

fn validate_growth(verbose: bool) -> Vec<TestResult> {
    println!("--- Gallery Growth ---");
    let mut results = Vec::new();

    let mut deterministic = true;
    let mut symmetric = true;
    let mut capacity_met = true;
    let mut types_consistent = true;
    let mut galleries = 0;

    for &seed in SEEDS {
        for &count in ITEM_COUNTS {
            for &page in PAGES {
                let rooms = build_gallery(seed, count, page);
                galleries += 1;

                let again = build_gallery(seed, count, page);
                if serde_json::to_string(&rooms).unwrap() != serde_json::to_string(&again).unwrap()
                {
                    deterministic = false;
                }

                if !adjacency_symmetric(&rooms) {
                    symmetric = false;
                }

                let space: i32 = rooms.iter().map(|room| room.space).sum();
                if space < count as i32 + MARGIN {
                    capacity_met = false;
                }

                for room in &rooms {
                    if room.room_type != room.classify() {
                        types_consistent = false;
                    }
                    let links = [room.above, room.below, room.left, room.right];
                    let present = links.iter().filter(|&&link| link != NO_ROOM).count();
                    if usize::from(room.extensions) != present {
                        types_consistent = false;
                    }
                }

                if verbose {
                    println!(
                        "  seed={:.12} items={:2} page={}: {} rooms, {} slots",
                        seed,
                        count,
                        page,
                        rooms.len(),
                        space
                    );
                }
            }
        }
    }

    results.push(TestResult::new(
        "growth_deterministic",
        deterministic,
        format!("{} galleries rebuilt identically", galleries),
    ));
    results.push(TestResult::new(
        "growth_adjacency_symmetric",
        symmetric,
        "all neighbor links mutual".into(),
    ));
    results.push(TestResult::new(
        "growth_capacity",
        capacity_met,
        format!("space >= items + {} everywhere", MARGIN),
    ));
    results.push(TestResult::new(
        "growth_type_consistency",
        types_consistent,
        "room types and extension counts match links".into(),
    ));

    // The margin-only build stays at the two seed rooms.
    let seed_only = build_gallery("abc", 0, 1);
    results.push(TestResult::new(
        "growth_seed_layout",
        seed_only.len() == 2,
        format!("zero items -> {} rooms", seed_only.len()),
    ));

    results
}

fn adjacency_symmetric(rooms: &[Room]) -> bool {
    let find = |id: i32| rooms.iter().find(|room| room.id == id);
    rooms.iter().all(|room| {
        let above_ok =
            room.above == NO_ROOM || find(room.above).map_or(false, |other| other.below == room.id);
        let below_ok =
            room.below == NO_ROOM || find(room.below).map_or(false, |other| other.above == room.id);
        let left_ok =
            room.left == NO_ROOM || find(room.left).map_or(false, |other| other.right == room.id);
        let right_ok =
            room.right == NO_ROOM || find(room.right).map_or(false, |other| other.left == room.id);
        above_ok && below_ok && left_ok && right_ok
    })
}

// ── 2. Element arrangement ──────────────────────────────────────────────

fn validate_arrangement(verbose: bool) -> Vec<TestResult> {
    println!("--- Element Arrangement ---");
    let mut results = Vec::new();

    let mut exclusive = true;
    let mut neighbours_correct = true;
    let mut deterministic = true;
    let mut placements = 0usize;

    for &seed in SEEDS {
        for &page in PAGES {
            let picture_count = 14;
            let rooms = build_gallery(seed, picture_count + 3, page);

            let mut elements = page_doors(page, 3);
            elements.extend(sample_pictures(seed, picture_count));

            let mut rooms_a = rooms.clone();
            let mut elements_a = elements.clone();
            arrange_gallery(seed, &mut rooms_a, &mut elements_a);

            let mut rooms_b = rooms.clone();
            let mut elements_b = elements;
            arrange_gallery(seed, &mut rooms_b, &mut elements_b);

            if elements_a != elements_b {
                deterministic = false;
            }

            let mut seen = std::collections::HashSet::new();
            for element in elements_a.iter().filter(|element| !element.use_whole_wall) {
                if let Some(position) = element.position {
                    placements += 1;
                    if !seen.insert((position.row, position.col, position.wall, position.side)) {
                        exclusive = false;
                    }
                }
            }

            for element in elements_a.iter().filter(|element| !element.use_whole_wall) {
                let Some(position) = element.position else {
                    continue;
                };
                let expected = elements_a
                    .iter()
                    .filter(|other| !other.use_whole_wall)
                    .any(|other| {
                        other.position.map_or(false, |p| {
                            p.row == position.row
                                && p.col == position.col
                                && p.wall == position.wall
                                && p.side == 1 - position.side
                        })
                    });
                if position.has_neighbour != expected {
                    neighbours_correct = false;
                }
            }

            if verbose {
                let placed = elements_a
                    .iter()
                    .filter(|element| element.position.is_some())
                    .count();
                println!(
                    "  seed={:.12} page={}: {}/{} elements placed",
                    seed,
                    page,
                    placed,
                    elements_a.len()
                );
            }
        }
    }

    results.push(TestResult::new(
        "arrange_deterministic",
        deterministic,
        "same seed, same positions".into(),
    ));
    results.push(TestResult::new(
        "arrange_slot_exclusivity",
        exclusive,
        format!("{} placements, no shared slots", placements),
    ));
    results.push(TestResult::new(
        "arrange_neighbour_flags",
        neighbours_correct,
        "flags match recomputed wall sharing".into(),
    ));

    // A whole-wall door on a fresh two-room layout eats one wall whole.
    let mut rooms = build_gallery("abc", 0, 1);
    let mut door = vec![RoomElement::door(1, "Exit Door")];
    arrange_gallery("abc", &mut rooms, &mut door);
    let walls_left: usize = rooms
        .iter()
        .map(|room| room.slots.as_ref().map_or(0, |slots| slots.walls().len()))
        .sum();
    let space_left: i32 = rooms.iter().map(|room| room.space).sum();
    results.push(TestResult::new(
        "arrange_whole_wall_door",
        door[0].position.is_some() && walls_left == 5 && space_left == 10,
        format!("{} walls and {} slots left of 6/12", walls_left, space_left),
    ));

    // Overfilling leaves the excess unplaced, never an error.
    let mut rooms = build_gallery("abc", 0, 1);
    let mut overflow = sample_pictures("abc", 20);
    arrange_gallery("abc", &mut rooms, &mut overflow);
    let placed = overflow
        .iter()
        .filter(|element| element.position.is_some())
        .count();
    results.push(TestResult::new(
        "arrange_overflow_unplaced",
        placed == 12,
        format!("{}/20 placed into 12 slots", placed),
    ));

    // The per-page entry point honors overrides that still fit.
    let rooms = build_gallery("stake1override", 6, 1);
    let (_, baseline) = arrange_rooms(
        "stake1override",
        sample_pictures("stake1override", 4),
        1,
        1,
        &rooms,
        &[],
    );
    let pinned = baseline
        .iter()
        .find(|element| element.is_picture() && element.position.is_some())
        .cloned();
    let override_kept = match pinned {
        Some(pinned) => {
            let (_, rearranged) = arrange_rooms(
                "stake1override",
                sample_pictures("stake1override", 4),
                1,
                1,
                &rooms,
                std::slice::from_ref(&pinned),
            );
            let kept = rearranged.iter().find(|element| element.id == pinned.id);
            match (kept.and_then(|element| element.position), pinned.position) {
                (Some(kept), Some(wanted)) => {
                    kept.row == wanted.row
                        && kept.col == wanted.col
                        && kept.wall == wanted.wall
                        && kept.side == wanted.side
                }
                _ => false,
            }
        }
        None => false,
    };
    results.push(TestResult::new(
        "arrange_override_kept",
        override_kept,
        "pinned element survives re-arrangement".into(),
    ));

    results
}

// ── 3. Editor grid ──────────────────────────────────────────────────────

fn validate_editor(verbose: bool) -> Vec<TestResult> {
    println!("--- Editor Grid ---");
    let mut results = Vec::new();

    // Plus shape: removing the center must be rejected, arms are fine.
    let plus: Grid = vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]];
    results.push(TestResult::new(
        "editor_center_toggle_rejected",
        !can_toggle_cell(&plus, 1, 1) && can_toggle_cell(&plus, 0, 1),
        "disconnecting edit refused, arm edit allowed".into(),
    ));

    let mut disconnected = plus.clone();
    disconnected[1][1] = 0;
    results.push(TestResult::new(
        "editor_reachability",
        is_reachable(&plus) && !is_reachable(&disconnected),
        "flood fill separates connected from split shapes".into(),
    ));

    // Grid -> rooms -> grid -> rooms is stable.
    let mut round_trips = true;
    let shapes: &[Grid] = &[
        plus.clone(),
        vec![vec![1, 1], vec![1, 1]],
        vec![vec![1, 1, 1, 1]],
    ];
    for shape in shapes {
        let rooms = from_grid(shape, 2);
        let grid = from_rooms(&rooms, 2);
        let rebuilt = from_grid(&grid, 2);
        if rooms != rebuilt {
            round_trips = false;
        }
        if verbose {
            let active: usize = shape
                .iter()
                .map(|cells| cells.iter().filter(|&&cell| cell == CELL_ROOM).count())
                .sum();
            println!("  shape with {} cells: {} rooms", active, rooms.len());
        }
    }
    results.push(TestResult::new(
        "editor_grid_round_trip",
        round_trips,
        format!("{} shapes converted both ways", shapes.len()),
    ));

    // Space recompute after conversion mirrors the extension counts.
    let mut rooms = from_grid(&plus, 2);
    let total = recalculate_space(&mut rooms);
    results.push(TestResult::new(
        "editor_space_recompute",
        total == 24,
        format!("plus shape offers {} slots", total),
    ));

    results
}

// ── 4. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let rooms = build_gallery("stake1persist", 6, 1);
    let (rooms, room_elements) = arrange_rooms(
        "stake1persist",
        sample_pictures("stake1persist", 6),
        2,
        1,
        &rooms,
        &[],
    );
    let galleries = vec![GalleryRoom {
        rooms,
        room_elements,
    }];

    let mut buffer = Vec::new();
    let saved = save_galleries(&mut buffer, &galleries).is_ok();
    let restored = load_galleries(&buffer[..]);
    let round_trip = matches!(&restored, Ok(loaded) if *loaded == galleries);

    results.push(TestResult::new(
        "persistence_round_trip",
        saved && round_trip,
        format!("{} bytes of JSON", buffer.len()),
    ));

    let rejected = load_galleries(r#"{"version":99,"galleries":[]}"#.as_bytes()).is_err();
    results.push(TestResult::new(
        "persistence_version_check",
        rejected,
        "unknown save version refused".into(),
    ));

    results
}
