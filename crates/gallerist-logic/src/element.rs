//! Room elements: the pictures and doors that occupy wall slots.

use serde::{Deserialize, Serialize};

use crate::seed::{element_id, ELEMENT_ID_NAMESPACE};
use crate::slots::Wall;

/// What kind of element hangs in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Picture,
    Door,
}

/// Artwork payload carried by picture elements.
///
/// Pixel dimensions are filled in later by the image loader; `offline`
/// marks artwork whose image could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub image: String,
    pub link: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub offline: bool,
}

/// A claimed slot: which room, which wall, which of the two positions.
///
/// `has_neighbour` is set by the arranger's post-pass when another
/// non-whole-wall element holds the opposite position of the same wall;
/// the renderer uses it to nudge the pair apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementPosition {
    pub row: i32,
    pub col: i32,
    pub wall: Wall,
    pub side: u8,
    pub has_neighbour: bool,
}

/// Something that occupies wall slots: an artwork or a navigation door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomElement {
    /// Stable across re-renders; derived by hashing a descriptive string
    /// into a fixed namespace.
    pub id: u64,
    pub name: String,
    pub element_type: ElementType,
    /// Doors claim both slots of their wall as one unit.
    #[serde(default)]
    pub use_whole_wall: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<Picture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ElementPosition>,
}

impl RoomElement {
    /// A navigation door for one gallery page. The id hashes the page and
    /// door name together so the same door keeps its id across re-renders
    /// of that page.
    pub fn door(page: u32, name: &str) -> Self {
        Self {
            id: element_id(ELEMENT_ID_NAMESPACE, &format!("{}{}", page, name)),
            name: name.to_string(),
            element_type: ElementType::Door,
            use_whole_wall: true,
            picture: None,
            position: None,
        }
    }

    /// An artwork element. The id hashes the owner seed and artwork name
    /// together, keeping re-runs for the same wallet reproducible.
    pub fn picture(seed: &str, name: &str, picture: Picture) -> Self {
        Self {
            id: element_id(ELEMENT_ID_NAMESPACE, &format!("{}{}", seed, name)),
            name: name.to_string(),
            element_type: ElementType::Picture,
            use_whole_wall: false,
            picture: Some(picture),
            position: None,
        }
    }

    pub fn is_picture(&self) -> bool {
        self.element_type == ElementType::Picture
    }
}

/// Navigation doors for one gallery page: always a way out, plus next and
/// previous room doors when pagination calls for them.
pub fn page_doors(page: u32, total_pages: u32) -> Vec<RoomElement> {
    let mut doors = vec![RoomElement::door(page, "Exit Door")];

    if total_pages > 1 && page < total_pages {
        doors.push(RoomElement::door(page, "Next Room Door"));
    }

    if page > 1 {
        doors.push(RoomElement::door(page, "Previous Room Door"));
    }

    doors
}
