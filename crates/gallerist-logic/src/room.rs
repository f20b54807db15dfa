//! Room grid cells and geometric classification.
//!
//! A gallery is a connected set of rooms on a signed orthogonal grid. Each
//! room tracks its four neighbor links by id and derives its geometric
//! variant — which walls are solid, which open into a neighbor — purely
//! from the presence of those links.

use serde::{Deserialize, Serialize};

use crate::slots::Slots;

/// Sentinel for an absent neighbor link.
pub const NO_ROOM: i32 = -1;

/// Growth direction from a room to the neighboring cell.
///
/// `Above` increments the row and `Below` decrements it. The random side
/// pick during growth indexes into [`Side::ALL`], so both the mapping and
/// the order must stay stable across releases for layouts to reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Above,
    Below,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Above, Side::Below, Side::Left, Side::Right];

    /// Coordinate of the cell on this side of (row, col).
    pub fn offset(self, row: i32, col: i32) -> (i32, i32) {
        match self {
            Side::Above => (row + 1, col),
            Side::Below => (row - 1, col),
            Side::Left => (row, col - 1),
            Side::Right => (row, col + 1),
        }
    }
}

/// Geometric variant of a room, named after its *closed* or *open* walls.
///
/// `LeftOpen` means only the left wall opens into a neighbor; `TopClosed`
/// means the top wall is the only solid one; floors are corridors with two
/// opposite openings; `Space` is open on all four sides. `RoomClosed` is
/// the degenerate no-connection case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    LeftOpen,
    RightOpen,
    BottomOpen,
    TopOpen,
    VerticalFloor,
    HorizontalFloor,
    CornerLeftTop,
    CornerRightTop,
    CornerLeftBottom,
    CornerRightBottom,
    Space,
    LeftClosed,
    RightClosed,
    BottomClosed,
    TopClosed,
    RoomClosed,
}

/// One cell of the gallery grid.
///
/// Adjacency is stored twice by design — each side of a link names the
/// other room's id — and must stay mutual: whenever `a.right == b.id`
/// then `b.left == a.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub row: i32,
    pub col: i32,
    pub above: i32,
    pub below: i32,
    pub left: i32,
    pub right: i32,
    /// Count of occupied neighbor links (0–4).
    pub extensions: u8,
    pub room_type: RoomType,
    /// Remaining slot capacity, `8 − 2 × extensions` after a recompute.
    pub space: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Slots>,
}

impl Room {
    /// A fresh unlinked room. Links, type, and space are filled in by the
    /// growth engine once the room is wired into the grid.
    pub fn new(id: i32, row: i32, col: i32) -> Self {
        Self {
            id,
            row,
            col,
            above: NO_ROOM,
            below: NO_ROOM,
            left: NO_ROOM,
            right: NO_ROOM,
            extensions: 0,
            room_type: RoomType::RoomClosed,
            space: 0,
            slots: None,
        }
    }

    /// Sides without a neighbor, in [`Side::ALL`] order.
    pub fn open_sides(&self) -> Vec<Side> {
        Side::ALL
            .iter()
            .copied()
            .filter(|side| self.link(*side) == NO_ROOM)
            .collect()
    }

    /// The neighbor link for one side.
    pub fn link(&self, side: Side) -> i32 {
        match side {
            Side::Above => self.above,
            Side::Below => self.below,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Derive the geometric variant from link presence.
    ///
    /// Exhaustive over all 16 presence combinations; must be re-run after
    /// any adjacency change and never cached beyond it.
    pub fn classify(&self) -> RoomType {
        let left = self.left != NO_ROOM;
        let right = self.right != NO_ROOM;
        let above = self.above != NO_ROOM;
        let below = self.below != NO_ROOM;

        match (left, right, above, below) {
            (true, true, true, true) => RoomType::Space,
            (true, true, true, false) => RoomType::BottomClosed,
            (true, true, false, true) => RoomType::TopClosed,
            (true, false, true, true) => RoomType::RightClosed,
            (false, true, true, true) => RoomType::LeftClosed,
            (false, false, true, true) => RoomType::VerticalFloor,
            (true, true, false, false) => RoomType::HorizontalFloor,
            (false, true, false, true) => RoomType::CornerLeftTop,
            (true, false, false, true) => RoomType::CornerRightTop,
            (true, false, true, false) => RoomType::CornerRightBottom,
            (false, true, true, false) => RoomType::CornerLeftBottom,
            (false, false, false, true) => RoomType::BottomOpen,
            (false, false, true, false) => RoomType::TopOpen,
            (false, true, false, false) => RoomType::RightOpen,
            (true, false, false, false) => RoomType::LeftOpen,
            (false, false, false, false) => RoomType::RoomClosed,
        }
    }
}

/// Reset every room's slot capacity from its extension count and return
/// the gallery total. Each neighbor connection consumes the connecting
/// wall, i.e. two of the room's eight nominal slots.
pub fn recalculate_space(rooms: &mut [Room]) -> i32 {
    let mut total = 0;
    for room in rooms.iter_mut() {
        room.space = 8 - 2 * i32::from(room.extensions);
        total += room.space;
    }
    total
}
