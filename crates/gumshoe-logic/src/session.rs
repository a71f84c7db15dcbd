//! The investigation session: one case, one detective, explicit state.
//!
//! `Investigation` owns the assembled scenario, the hazard knowledge base,
//! and the deduction engine, and wires them together: a move that uncovers
//! a clue feeds the matching evidence catalog entry to the deduction
//! engine, exactly once per evidence id. Nothing here logs or prints;
//! callers narrate from the returned reports.

use crate::deduction::{DeductionEngine, SuspectScore, Verdict};
use crate::dialogue::{self, Suspect, Utility};
use crate::hazard::{HazardKnowledgeBase, MoveOutcome, RouteFailure};
use crate::map::{MansionMap, RoomId};
use crate::pathfinding;
use crate::scenario::{Scenario, ScenarioConfig, ScenarioError, Solution};
use serde::Serialize;

/// Report from one move attempt.
#[derive(Debug, Clone, Serialize)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    /// Evidence id fed to deduction, when the room's clue was new.
    pub evidence_recorded: Option<String>,
}

/// Result of one adversarial interrogation.
#[derive(Debug, Clone, Serialize)]
pub struct InterrogationReport {
    pub role: String,
    pub name: String,
    /// Best achievable line value for the investigator.
    pub value: Utility,
}

/// The verdict on an accusation.
#[derive(Debug, Clone, Serialize)]
pub struct AccusationOutcome {
    pub accused: String,
    pub correct: bool,
    /// The authored truth, revealed once an accusation is made.
    pub solution: Solution,
}

/// The case as it currently stands.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    /// Best hypothesis, absent only with empty domains.
    pub verdict: Option<Verdict>,
    /// Suspects by best achievable score.
    pub ranking: Vec<SuspectScore>,
    /// Evidence ids registered so far, in discovery order.
    pub evidence_found: Vec<String>,
    /// Size of the scenario's evidence catalog.
    pub evidence_total: usize,
}

/// One run of a case, from configuration to verdict.
#[derive(Debug, Clone)]
pub struct Investigation {
    scenario: Scenario,
    kb: HazardKnowledgeBase,
    deduction: DeductionEngine,
}

impl Investigation {
    /// Validate the configuration and open a session at the start room.
    pub fn new(config: ScenarioConfig) -> Result<Self, Vec<ScenarioError>> {
        let scenario = Scenario::build(config)?;
        let kb = HazardKnowledgeBase::new(&scenario.map, scenario.rules.clone(), scenario.start);
        let deduction = DeductionEngine::new(scenario.domains.clone());
        Ok(Self {
            scenario,
            kb,
            deduction,
        })
    }

    pub fn title(&self) -> &str {
        &self.scenario.title
    }

    pub fn victim(&self) -> &str {
        &self.scenario.victim
    }

    pub fn map(&self) -> &MansionMap {
        &self.scenario.map
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.scenario.suspects
    }

    pub fn current_room(&self) -> RoomId {
        self.kb.current_room()
    }

    pub fn current_room_name(&self) -> &str {
        self.room_name(self.kb.current_room())
    }

    /// Resolve a room name.
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.scenario.map.room_id(name)
    }

    /// Room name with a fallback label for unknown ids.
    pub fn room_name(&self, id: RoomId) -> &str {
        self.scenario.map.room_name(id).unwrap_or("unknown room")
    }

    /// Attempt to walk to a named room. `None` means the name itself is
    /// unknown; refusals come back in the report.
    ///
    /// Entering a room with an uncollected clue registers the clue's
    /// evidence catalog entry with the deduction engine.
    pub fn move_to(&mut self, room: &str) -> Option<MoveReport> {
        let dest = self.scenario.map.room_id(room)?;
        let outcome = self.kb.attempt_move(&self.scenario.map, dest);
        let mut evidence_recorded = None;
        if let MoveOutcome::Entered {
            clue: Some(clue), ..
        } = &outcome
        {
            if let Some(spec) = self.scenario.evidence.iter().find(|e| e.id == clue.id) {
                if self.deduction.add_evidence(&spec.id, spec.constraints.clone()) {
                    evidence_recorded = Some(spec.id.clone());
                }
            }
        }
        Some(MoveReport {
            outcome,
            evidence_recorded,
        })
    }

    /// Shortest path from the current room, ignoring hazards.
    pub fn plan_route(&self, dest: RoomId) -> Option<Vec<RoomId>> {
        pathfinding::find_path(&self.scenario.map, self.kb.current_room(), dest)
    }

    /// Route from the current room that only crosses enterable rooms.
    pub fn plan_safe_route(&self, dest: RoomId) -> Result<Vec<RoomId>, RouteFailure> {
        self.kb.plan_safe_route(&self.scenario.map, dest)
    }

    /// Register evidence not tied to a room (forensics, case file).
    /// Returns false for unknown or already-registered ids.
    pub fn record_evidence(&mut self, id: &str) -> bool {
        match self.scenario.evidence.iter().find(|e| e.id == id) {
            Some(spec) => self.deduction.add_evidence(&spec.id, spec.constraints.clone()),
            None => false,
        }
    }

    /// Put a hazard countermeasure in effect.
    pub fn clear_hazard(&mut self, precondition: &str) {
        self.kb.record_precondition(precondition);
    }

    /// Run the adversarial interrogation for a suspect role. `None` when
    /// the role is unknown or has no script.
    pub fn interrogate(&self, role: &str) -> Option<InterrogationReport> {
        let suspect = self.scenario.suspects.iter().find(|s| s.role == role)?;
        let script = self.scenario.scripts.iter().find(|s| s.suspect == role)?;
        let value = dialogue::best_line_value(&script.root, script.depth, suspect);
        Some(InterrogationReport {
            role: suspect.role.clone(),
            name: suspect.name.clone(),
            value,
        })
    }

    /// Accuse a suspect. `None` for unknown roles; otherwise the verdict
    /// against the authored solution, which the outcome reveals.
    pub fn accuse(&self, role: &str) -> Option<AccusationOutcome> {
        let suspect = self.scenario.suspects.iter().find(|s| s.role == role)?;
        Some(AccusationOutcome {
            accused: suspect.role.clone(),
            correct: suspect.role == self.scenario.solution.murderer,
            solution: self.scenario.solution.clone(),
        })
    }

    /// Current best reading of the case.
    pub fn case_report(&self) -> CaseReport {
        CaseReport {
            verdict: self.deduction.best_hypothesis(),
            ranking: self.deduction.rank_suspects(),
            evidence_found: self.deduction.evidence_ids().to_vec(),
            evidence_total: self.scenario.evidence.len(),
        }
    }

    /// Sorted knowledge audit, rendered with room names.
    pub fn fact_log(&self) -> Vec<String> {
        self.kb
            .facts()
            .map(|fact| fact.describe(&self.scenario.map))
            .collect()
    }

    pub fn knowledge(&self) -> &HazardKnowledgeBase {
        &self.kb
    }

    pub fn deduction(&self) -> &DeductionEngine {
        &self.deduction
    }
}
