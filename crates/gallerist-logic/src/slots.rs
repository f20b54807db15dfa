//! Wall slot allocation.
//!
//! Every solid wall of a room offers up to two hanging positions. Which
//! walls are solid follows directly from the room's geometric variant, so
//! the allocation is a fixed table keyed by [`RoomType`].

use serde::{Deserialize, Serialize};

use crate::room::{Room, RoomType};

/// A wall of a room. Slot bookkeeping and element positions both key on
/// this; [`Wall::ALL`] fixes the order random wall picks index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Bottom, Wall::Left, Wall::Right];
}

/// Availability of the two hanging positions per wall.
///
/// Fixed four-entry shape: a wall that is open toward a neighbor — or
/// whose slots are all consumed — simply has no entry. `true` marks a
/// free slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<[bool; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<[bool; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<[bool; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<[bool; 2]>,
}

impl Slots {
    /// Current availability pair for one wall, if the wall still has an
    /// entry.
    pub fn get(&self, wall: Wall) -> Option<[bool; 2]> {
        match wall {
            Wall::Top => self.top,
            Wall::Bottom => self.bottom,
            Wall::Left => self.left,
            Wall::Right => self.right,
        }
    }

    pub fn entry_mut(&mut self, wall: Wall) -> &mut Option<[bool; 2]> {
        match wall {
            Wall::Top => &mut self.top,
            Wall::Bottom => &mut self.bottom,
            Wall::Left => &mut self.left,
            Wall::Right => &mut self.right,
        }
    }

    /// Walls that still have an entry, in [`Wall::ALL`] order.
    pub fn walls(&self) -> Vec<Wall> {
        Wall::ALL
            .iter()
            .copied()
            .filter(|wall| self.get(*wall).is_some())
            .collect()
    }

    /// Number of free slots across all remaining walls.
    pub fn free_count(&self) -> usize {
        Wall::ALL
            .iter()
            .filter_map(|wall| self.get(*wall))
            .map(|pair| pair.iter().filter(|&&free| free).count())
            .sum()
    }
}

/// Assign each room its slot map from the fixed per-variant table.
///
/// In-place; re-running resets every wall to fully available. `RoomClosed`
/// rooms get no slot map at all and are therefore skipped by the arranger
/// even when their `space` is positive — longstanding behavior the rest of
/// the pipeline relies on, so it is kept as-is.
pub fn setup_slots(rooms: &mut [Room]) {
    for room in rooms.iter_mut() {
        room.slots = slots_for(room.room_type);
    }
}

fn slots_for(room_type: RoomType) -> Option<Slots> {
    let walls: &[Wall] = match room_type {
        RoomType::BottomClosed => &[Wall::Bottom],
        RoomType::TopClosed => &[Wall::Top],
        RoomType::LeftClosed => &[Wall::Left],
        RoomType::RightClosed => &[Wall::Right],
        RoomType::BottomOpen => &[Wall::Top, Wall::Left, Wall::Right],
        RoomType::TopOpen => &[Wall::Bottom, Wall::Left, Wall::Right],
        RoomType::LeftOpen => &[Wall::Top, Wall::Bottom, Wall::Right],
        RoomType::RightOpen => &[Wall::Top, Wall::Left, Wall::Bottom],
        RoomType::CornerLeftBottom => &[Wall::Left, Wall::Bottom],
        RoomType::CornerLeftTop => &[Wall::Left, Wall::Top],
        RoomType::CornerRightBottom => &[Wall::Right, Wall::Bottom],
        RoomType::CornerRightTop => &[Wall::Right, Wall::Top],
        RoomType::HorizontalFloor => &[Wall::Bottom, Wall::Top],
        RoomType::VerticalFloor => &[Wall::Left, Wall::Right],
        RoomType::Space => &[],
        RoomType::RoomClosed => return None,
    };

    let mut slots = Slots::default();
    for &wall in walls {
        *slots.entry_mut(wall) = Some([true, true]);
    }
    Some(slots)
}
