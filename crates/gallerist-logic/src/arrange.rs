//! Seeded arrangement of elements onto wall slots.
//!
//! `arrange_gallery` is the low-level pass: it walks the element list in
//! order and claims slots through seeded-random draws. `arrange_rooms` is
//! the per-page entry point the application uses: it builds the page's
//! navigation doors, re-applies editor overrides, and arranges the rest.
//!
//! Both mutate their inputs in place under a single-owner contract: the
//! caller hands the room and element buffers to exactly one arrangement
//! pass at a time and clones beforehand if the originals are still needed.

use log::debug;
use rand::Rng;

use crate::element::{ElementPosition, RoomElement};
use crate::room::Room;
use crate::seed::layout_rng;
use crate::slots::{setup_slots, Wall};

/// Assign a slot to every element the gallery has room for.
///
/// The pseudo-random stream is seeded from `seed` alone; rooms must carry
/// their current `space` (see [`crate::room::recalculate_space`]). Slot
/// maps are reset from the room types before anything is placed. Elements
/// that already carry a position keep it — their slots are claimed up
/// front — and elements the gallery cannot hold simply stay unplaced, for
/// the renderer to skip.
pub fn arrange_gallery(seed: &str, rooms: &mut [Room], elements: &mut [RoomElement]) {
    let mut rng = layout_rng(seed);

    setup_slots(rooms);

    // Pre-set positions (editor overrides) claim their slots before the
    // random pass so nothing lands on top of them.
    for element in elements.iter() {
        if let Some(position) = element.position {
            claim_position(rooms, position, element.use_whole_wall);
        }
    }

    for element in elements.iter_mut().filter(|element| element.position.is_none()) {
        let candidates: Vec<usize> = rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.space > 0)
            .map(|(index, _)| index)
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let room = &mut rooms[candidates[rng.gen_range(0..candidates.len())]];

        // Rooms without a slot map (the no-connection variant) can never
        // host an element; the draw is spent and the element skipped.
        let Some(slots) = room.slots.as_mut() else {
            continue;
        };
        let walls = slots.walls();
        if walls.is_empty() {
            continue;
        }

        let wall = walls[rng.gen_range(0..walls.len())];
        let side = rng.gen_range(0..2u8);

        if element.use_whole_wall {
            // Doors take the wall as a unit, without re-checking the two
            // slots individually; a wall with one slot already taken still
            // costs two. Kept as-is — `space` is signed for this reason.
            *slots.entry_mut(wall) = None;
            room.space -= 2;
            element.position = Some(ElementPosition {
                row: room.row,
                col: room.col,
                wall,
                side: 0,
                has_neighbour: false,
            });
        } else {
            let entry = slots.entry_mut(wall);
            let Some(mut pair) = *entry else {
                continue;
            };
            let taken = if pair[usize::from(side)] { side } else { 1 - side };
            pair[usize::from(taken)] = false;
            *entry = if pair[0] || pair[1] { Some(pair) } else { None };
            room.space -= 1;
            element.position = Some(ElementPosition {
                row: room.row,
                col: room.col,
                wall,
                side: taken,
                has_neighbour: false,
            });
        }
    }

    flag_neighbours(elements);

    let placed = elements.iter().filter(|element| element.position.is_some()).count();
    debug!("arranged {} of {} elements", placed, elements.len());
}

/// Arrange one gallery page the way the application does.
///
/// Builds the page's navigation doors, prepends them to `pictures`,
/// clears stale positions, re-applies every override whose slot still
/// exists in the room graph, and arranges the rest. Works on a clone of
/// `rooms`; the caller's graph is untouched.
pub fn arrange_rooms(
    seed: &str,
    pictures: Vec<RoomElement>,
    total_pages: u32,
    page: u32,
    rooms: &[Room],
    overrides: &[RoomElement],
) -> (Vec<Room>, Vec<RoomElement>) {
    let mut elements = crate::element::page_doors(page, total_pages);
    elements.extend(pictures);

    let mut rooms = rooms.to_vec();
    setup_slots(&mut rooms);

    for element in elements.iter_mut() {
        element.position = None;
    }
    for override_element in overrides {
        let Some(position) = override_element.position else {
            continue;
        };
        if !position_exists(&rooms, position) {
            continue;
        }
        if let Some(element) = elements.iter_mut().find(|e| e.id == override_element.id) {
            element.position = Some(position);
        }
    }

    arrange_gallery(seed, &mut rooms, &mut elements);
    (rooms, elements)
}

/// Whether the room graph still has a wall at the override's coordinates.
fn position_exists(rooms: &[Room], position: ElementPosition) -> bool {
    rooms.iter().any(|room| {
        room.row == position.row
            && room.col == position.col
            && room
                .slots
                .as_ref()
                .map_or(false, |slots| slots.get(position.wall).is_some())
    })
}

/// Claim the slot(s) a pre-positioned element occupies.
fn claim_position(rooms: &mut [Room], position: ElementPosition, whole_wall: bool) {
    let Some(room) = rooms
        .iter_mut()
        .find(|room| room.row == position.row && room.col == position.col)
    else {
        return;
    };
    let Some(slots) = room.slots.as_mut() else {
        return;
    };

    let entry = slots.entry_mut(position.wall);
    let Some(mut pair) = *entry else {
        return;
    };

    if whole_wall {
        *entry = None;
        room.space -= 2;
        return;
    }

    let side = usize::from(position.side & 1);
    if pair[side] {
        pair[side] = false;
        room.space -= 1;
    }
    *entry = if pair[0] || pair[1] { Some(pair) } else { None };
}

/// Mark every placed element that shares a wall with another one on the
/// opposite side. Whole-wall elements take part on neither end.
fn flag_neighbours(elements: &mut [RoomElement]) {
    let placed: Vec<(i32, i32, Wall, u8)> = elements
        .iter()
        .filter(|element| !element.use_whole_wall)
        .filter_map(|element| element.position)
        .map(|position| (position.row, position.col, position.wall, position.side))
        .collect();

    for element in elements.iter_mut().filter(|element| !element.use_whole_wall) {
        if let Some(position) = element.position.as_mut() {
            position.has_neighbour = placed.iter().any(|&(row, col, wall, side)| {
                row == position.row
                    && col == position.col
                    && wall == position.wall
                    && side == 1 - position.side
            });
        }
    }
}
