//! Save/Load for user-customized galleries.
//!
//! The room editor keeps its state in client-side storage as an opaque
//! JSON string. Room and element graphs round-trip through the same serde
//! model the engine computes on, wrapped in a versioned envelope.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::element::RoomElement;
use crate::room::Room;

/// Version number for the save format (increment when the format changes).
const SAVE_VERSION: u32 = 1;

/// One user-customized gallery: the room graph plus its arranged elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryRoom {
    pub rooms: Vec<Room>,
    pub room_elements: Vec<RoomElement>,
}

/// Versioned envelope around the persisted galleries.
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    galleries: Vec<GalleryRoom>,
}

/// Serialize the galleries as JSON into `writer`.
pub fn save_galleries<W: Write>(writer: W, galleries: &[GalleryRoom]) -> Result<(), SaveError> {
    let data = SaveData {
        version: SAVE_VERSION,
        galleries: galleries.to_vec(),
    };
    serde_json::to_writer(writer, &data)?;
    Ok(())
}

/// Load galleries previously written by [`save_galleries`].
pub fn load_galleries<R: Read>(reader: R) -> Result<Vec<GalleryRoom>, SaveError> {
    let data: SaveData = serde_json::from_reader(reader)?;

    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }

    Ok(data.galleries)
}

/// Errors that can occur during save/load.
#[derive(Debug)]
pub enum SaveError {
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<serde_json::Error> for SaveError {
    fn from(error: serde_json::Error) -> Self {
        SaveError::Json(error)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Json(error) => write!(f, "Serialization error: {}", error),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
