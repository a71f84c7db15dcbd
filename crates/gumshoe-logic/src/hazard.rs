//! Hazard knowledge and guarded movement.
//!
//! The knowledge base accumulates tagged facts as the investigator moves
//! through the map. Facts are never removed; the safe and dangerous sets
//! are re-derived from the facts after every visit. Movement is guarded:
//! a move is refused when the destination is not adjacent or when current
//! knowledge says it would be fatal.
//!
//! # Entry Policy
//!
//! `can_enter` answers in this order:
//! 1. Room in the safe set → allowed.
//! 2. Room in the dangerous set → refused.
//! 3. Room flagged with a hazard → allowed only with its countermeasure
//!    fact on record.
//! 4. Anything else → allowed. Unknown rooms are open until evidence says
//!    otherwise.
//!
//! Note the ordering: a detected warning (rule 2) overrides a
//! countermeasure (rule 3). Equipment helps only in rooms the investigator
//! has not yet been warned about.

use crate::map::{Clue, HazardKind, MansionMap, RoomId};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// One piece of hazard knowledge. Facts only accumulate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fact {
    /// The investigator entered this room and lived.
    VisitedSurvived(RoomId),
    /// A warning of `kind` was sighted in `source`.
    HazardDetected { kind: HazardKind, source: RoomId },
    /// A named countermeasure is in effect.
    PreconditionCleared(String),
}

impl Fact {
    /// Render the fact with room names for the audit log.
    pub fn describe(&self, map: &MansionMap) -> String {
        match self {
            Fact::VisitedSurvived(room) => {
                format!("visited {} and survived", room_label(map, *room))
            }
            Fact::HazardDetected { kind, source } => {
                format!("{} detected from {}", kind.label(), room_label(map, *source))
            }
            Fact::PreconditionCleared(id) => format!("countermeasure ready: {}", id),
        }
    }
}

fn room_label<'a>(map: &'a MansionMap, room: RoomId) -> &'a str {
    map.room_name(room).unwrap_or("unknown room")
}

/// Scenario rule: a warning tagged `kind`, sighted anywhere, points at
/// `room`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardRule {
    pub kind: HazardKind,
    pub room: RoomId,
}

/// What a visit noticed, for narration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardSighting {
    pub kind: HazardKind,
    /// Warning text as posted in the room.
    pub text: String,
    /// Room the rule table pins this warning on, if any.
    pub suspected_room: Option<RoomId>,
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Destination shares no edge with the current room.
    NotAdjacent,
    /// Current knowledge says entering would be fatal.
    TooDangerous,
}

/// Result of a single move attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MoveOutcome {
    /// The investigator entered the room.
    Entered {
        room: RoomId,
        /// Clue found in the room, if it carries one.
        clue: Option<Clue>,
        /// Warnings sighted on entry.
        sightings: Vec<HazardSighting>,
    },
    /// The move was refused; no state changed.
    Rejected { reason: RejectReason },
}

/// Why no safe route was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteFailure {
    /// The destination itself fails the entry check.
    DestinationTooDangerous,
    /// Every route passes through a room that fails the entry check.
    NoSafeRoute,
}

/// Monotonic fact base with derived safe/dangerous sets and the
/// investigator's position.
#[derive(Debug, Clone)]
pub struct HazardKnowledgeBase {
    /// Sorted, duplicate-free. `BTreeSet` keeps the audit export ordered.
    facts: BTreeSet<Fact>,
    safe: BTreeSet<RoomId>,
    dangerous: BTreeSet<RoomId>,
    rules: Vec<HazardRule>,
    current: RoomId,
}

impl HazardKnowledgeBase {
    /// Open a knowledge base at `start`, which counts as visited.
    pub fn new(map: &MansionMap, rules: Vec<HazardRule>, start: RoomId) -> Self {
        let mut kb = Self {
            facts: BTreeSet::new(),
            safe: BTreeSet::new(),
            dangerous: BTreeSet::new(),
            rules,
            current: start,
        };
        kb.record_visit(map, start);
        kb.infer_safe_rooms(map);
        kb
    }

    /// Record that `room` was entered and survived, scanning its warnings.
    ///
    /// Each warning whose kind appears in the rule table adds a
    /// `HazardDetected` fact and marks the mapped room dangerous. Returns
    /// everything sighted so callers can narrate it.
    pub fn record_visit(&mut self, map: &MansionMap, room: RoomId) -> Vec<HazardSighting> {
        self.facts.insert(Fact::VisitedSurvived(room));
        let mut sightings = Vec::new();
        if let Some(r) = map.room(room) {
            for warning in &r.warnings {
                let suspected = self
                    .rules
                    .iter()
                    .find(|rule| rule.kind == warning.kind)
                    .map(|rule| rule.room);
                if let Some(target) = suspected {
                    self.facts.insert(Fact::HazardDetected {
                        kind: warning.kind,
                        source: room,
                    });
                    self.dangerous.insert(target);
                }
                sightings.push(HazardSighting {
                    kind: warning.kind,
                    text: warning.text.clone(),
                    suspected_room: suspected,
                });
            }
        }
        sightings
    }

    /// Add a countermeasure fact (gas mask on, supports wedged, ...).
    pub fn record_precondition(&mut self, id: &str) {
        self.facts.insert(Fact::PreconditionCleared(id.to_string()));
    }

    /// Whether a countermeasure fact is on record.
    pub fn precondition_cleared(&self, id: &str) -> bool {
        self.facts
            .iter()
            .any(|f| matches!(f, Fact::PreconditionCleared(p) if p == id))
    }

    /// Re-derive the safe and dangerous sets from the facts.
    ///
    /// Forward chaining, run to a fixed point: every survived room is
    /// safe, and every safe room with no warnings extends safety to each
    /// neighbor that is not hazard-flagged. Re-running without new facts
    /// changes nothing.
    pub fn infer_safe_rooms(&mut self, map: &MansionMap) {
        self.dangerous.clear();
        self.safe.clear();
        for fact in &self.facts {
            match fact {
                Fact::VisitedSurvived(room) => {
                    self.safe.insert(*room);
                }
                Fact::HazardDetected { kind, .. } => {
                    for rule in &self.rules {
                        if rule.kind == *kind {
                            self.dangerous.insert(rule.room);
                        }
                    }
                }
                Fact::PreconditionCleared(_) => {}
            }
        }

        let mut frontier: VecDeque<RoomId> = self.safe.iter().copied().collect();
        while let Some(room) = frontier.pop_front() {
            let quiet = map.room(room).map(|r| r.warnings.is_empty()).unwrap_or(false);
            if !quiet {
                continue;
            }
            for &next in map.neighbors(room) {
                let flagged = map.room(next).map(|r| r.hazard.is_some()).unwrap_or(true);
                if !flagged && self.safe.insert(next) {
                    frontier.push_back(next);
                }
            }
        }
    }

    /// Decide whether `room` can be entered given current knowledge.
    pub fn can_enter(&self, map: &MansionMap, room: RoomId) -> bool {
        if self.safe.contains(&room) {
            return true;
        }
        if self.dangerous.contains(&room) {
            return false;
        }
        if let Some(hazard) = map.room(room).and_then(|r| r.hazard.as_ref()) {
            return self.precondition_cleared(&hazard.precondition);
        }
        true
    }

    /// Attempt a single move from the current room.
    ///
    /// Refusals leave the knowledge base untouched. A successful move
    /// updates the position, records the visit, and re-runs inference.
    pub fn attempt_move(&mut self, map: &MansionMap, dest: RoomId) -> MoveOutcome {
        if !map.are_adjacent(self.current, dest) {
            return MoveOutcome::Rejected {
                reason: RejectReason::NotAdjacent,
            };
        }
        if !self.can_enter(map, dest) {
            return MoveOutcome::Rejected {
                reason: RejectReason::TooDangerous,
            };
        }
        self.current = dest;
        let sightings = self.record_visit(map, dest);
        self.infer_safe_rooms(map);
        let clue = map.room(dest).and_then(|r| r.clue.clone());
        MoveOutcome::Entered {
            room: dest,
            clue,
            sightings,
        }
    }

    /// Plan a route from the current room that only crosses rooms the
    /// entry check allows.
    ///
    /// BFS in adjacency order, like plain pathfinding, but a neighbor the
    /// entry check refuses is dropped from the search permanently — it is
    /// not reconsidered even if another frontier path reaches it later in
    /// the same call.
    pub fn plan_safe_route(
        &self,
        map: &MansionMap,
        goal: RoomId,
    ) -> Result<Vec<RoomId>, RouteFailure> {
        if !self.can_enter(map, goal) {
            return Err(RouteFailure::DestinationTooDangerous);
        }
        let start = self.current;
        if start == goal {
            return Ok(vec![start]);
        }

        let mut visited = HashSet::new();
        let mut queue: VecDeque<(RoomId, Vec<RoomId>)> = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, vec![start]));

        while let Some((current, path)) = queue.pop_front() {
            for &next in map.neighbors(current) {
                if visited.contains(&next) {
                    continue;
                }
                if !self.can_enter(map, next) {
                    visited.insert(next);
                    continue;
                }
                if next == goal {
                    let mut result = path.clone();
                    result.push(next);
                    return Ok(result);
                }
                visited.insert(next);
                let mut new_path = path.clone();
                new_path.push(next);
                queue.push_back((next, new_path));
            }
        }

        Err(RouteFailure::NoSafeRoute)
    }

    /// The investigator's current room.
    pub fn current_room(&self) -> RoomId {
        self.current
    }

    /// Facts in sorted order, for audit/export.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Number of facts on record.
    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn is_safe(&self, room: RoomId) -> bool {
        self.safe.contains(&room)
    }

    pub fn is_dangerous(&self, room: RoomId) -> bool {
        self.dangerous.contains(&room)
    }

    /// Rooms currently inferred safe, ascending by id.
    pub fn safe_rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.safe.iter().copied()
    }

    /// Rooms currently inferred dangerous, ascending by id.
    pub fn dangerous_rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.dangerous.iter().copied()
    }
}
