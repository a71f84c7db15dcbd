//! The case map: rooms, adjacency, and scene annotations.
//!
//! `MansionMap` is built once from validated scenario data and never
//! mutated afterward. Rooms carry dense `u32` ids assigned in declaration
//! order, and each adjacency list preserves its configured order — that
//! order is what makes pathfinding tie-breaks deterministic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense room identifier, the room's declaration index.
pub type RoomId = u32;

/// Hazard classes that warnings and hazard rules are tagged with.
///
/// A warning never names its hazard in prose as far as the engine is
/// concerned; the tag is the only thing inference reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// Gas leak or airborne toxin.
    Gas,
    /// Structurally unsound, may collapse.
    Collapse,
    /// Rigged mechanisms (tripwires, darts, snares).
    Traps,
    /// Unguarded drop.
    Fall,
    /// Caustic or reactive chemicals.
    Chemical,
    /// Dangerous machinery or equipment.
    Machinery,
}

impl HazardKind {
    /// All hazard classes for iteration.
    pub const ALL: [HazardKind; 6] = [
        HazardKind::Gas,
        HazardKind::Collapse,
        HazardKind::Traps,
        HazardKind::Fall,
        HazardKind::Chemical,
        HazardKind::Machinery,
    ];

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            HazardKind::Gas => "gas leak",
            HazardKind::Collapse => "collapse risk",
            HazardKind::Traps => "rigged traps",
            HazardKind::Fall => "fall risk",
            HazardKind::Chemical => "chemical exposure",
            HazardKind::Machinery => "dangerous machinery",
        }
    }
}

/// A sensory warning posted in a room, tagged with the class it signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Hazard class this warning signals.
    pub kind: HazardKind,
    /// The warning as the investigator perceives it.
    pub text: String,
}

/// A clue placed in a room. `id` keys into the scenario's evidence catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub id: String,
    /// The clue as described on discovery.
    pub text: String,
}

/// A hazard posted on the room itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    /// The danger as described in the scene.
    pub text: String,
    /// Countermeasure fact id that makes the room enterable.
    pub precondition: String,
}

/// A single room with its scene annotations.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Neighbor ids in configuration order.
    pub adjacent: Vec<RoomId>,
    pub clue: Option<Clue>,
    pub hazard: Option<Hazard>,
    pub warnings: Vec<Warning>,
}

/// Immutable room graph with scene annotations and name lookup.
#[derive(Debug, Clone)]
pub struct MansionMap {
    /// Rooms in declaration order; `rooms[i].id == i`.
    rooms: Vec<Room>,
    /// Room name → id.
    index: HashMap<String, RoomId>,
}

impl MansionMap {
    /// Build a map from resolved rooms. Callers (scenario assembly)
    /// guarantee ids are dense declaration indices.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        let mut index = HashMap::new();
        for room in &rooms {
            index.insert(room.name.clone(), room.id);
        }
        Self { rooms, index }
    }

    /// Look a room up by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id as usize)
    }

    /// Resolve a room name to its id.
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.index.get(name).copied()
    }

    /// Name of a room, if the id is known.
    pub fn room_name(&self, id: RoomId) -> Option<&str> {
        self.room(id).map(|r| r.name.as_str())
    }

    /// Rooms in declaration order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Check if a room id exists.
    pub fn has_room(&self, id: RoomId) -> bool {
        (id as usize) < self.rooms.len()
    }

    /// Neighbors of a room in configuration order.
    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        self.room(id).map(|r| r.adjacent.as_slice()).unwrap_or(&[])
    }

    /// Whether `from` has an edge to `to`.
    pub fn are_adjacent(&self, from: RoomId, to: RoomId) -> bool {
        self.neighbors(from).contains(&to)
    }
}
