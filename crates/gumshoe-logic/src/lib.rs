//! Pure investigation logic for Gumshoe.
//!
//! This crate contains all game logic that is independent of any renderer,
//! input layer, or runtime. Functions take plain data and return results,
//! making them unit-testable and portable across the terminal demo, the
//! scenario test harness, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`deduction`] | Weighted-constraint deduction over case hypotheses |
//! | [`dialogue`] | Interrogation trees and adversarial line evaluation |
//! | [`hazard`] | Monotonic hazard knowledge, entry policy, safe routing |
//! | [`map`] | Mansion room graph with clues, hazards, and warnings |
//! | [`pathfinding`] | BFS pathfinding over the room adjacency graph |
//! | [`scenario`] | Scenario configuration, validation, and assembly |
//! | [`session`] | The investigation session tying the subsystems together |

pub mod deduction;
pub mod dialogue;
pub mod hazard;
pub mod map;
pub mod pathfinding;
pub mod scenario;
pub mod session;
