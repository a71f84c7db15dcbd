//! Scenario configuration: data model, validation, and assembly.
//!
//! A scenario file declares everything a case needs: the room graph with
//! its clues, hazards, and warnings, the hazard rule table, the suspect
//! roster with interrogation scripts, the evidence catalog, the deduction
//! domains, and the authored solution. Validation reports every problem in
//! one pass; assembly resolves room names to ids and hands back the
//! immutable runtime pieces.
//!
//! # Configuration Flow
//!
//! 1. Deserialize a `ScenarioConfig` (the JSON shape under `data/`)
//! 2. `validate_scenario` — all problems at once, nothing partial
//! 3. `Scenario::build` — name→id resolution, runtime map and rule table
//! 4. Hand the `Scenario` to a session

use crate::deduction::{CaseVar, Condition, Constraint, Domains};
use crate::dialogue::{DialogueNode, Suspect};
use crate::hazard::HazardRule;
use crate::map::{Clue, Hazard, HazardKind, MansionMap, Room, RoomId, Warning};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Everything a case needs, as shipped in scenario JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub title: String,
    /// Who was killed.
    pub victim: String,
    pub start_room: String,
    /// Take adjacency lists as directed edges instead of requiring
    /// symmetry.
    #[serde(default)]
    pub directed: bool,
    pub rooms: Vec<RoomConfig>,
    /// Warning-kind → afflicted-room table.
    pub hazard_rules: Vec<HazardRuleConfig>,
    pub suspects: Vec<Suspect>,
    pub interrogations: Vec<InterrogationConfig>,
    /// Evidence catalog: id → weighted constraints.
    pub evidence: Vec<EvidenceSpec>,
    pub domains: Domains,
    pub solution: Solution,
}

/// One room as declared. Adjacency order is meaningful: searches expand
/// neighbors in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    #[serde(default)]
    pub adjacent: Vec<String>,
    #[serde(default)]
    pub clue: Option<Clue>,
    #[serde(default)]
    pub hazard: Option<Hazard>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

/// Config form of a hazard rule, by room name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardRuleConfig {
    pub kind: HazardKind,
    pub room: String,
}

/// An interrogation script for one suspect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterrogationConfig {
    /// Role key of the suspect this script belongs to.
    pub suspect: String,
    /// Search depth for the adversarial evaluation.
    pub depth: u32,
    pub root: DialogueNode,
}

/// One catalog entry: what a piece of evidence implies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceSpec {
    pub id: String,
    pub description: String,
    pub constraints: Vec<Constraint>,
}

/// Authored ground truth, checked by accusations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub murderer: String,
    pub weapon: String,
    pub location: String,
    pub motive: String,
}

/// Scenario validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// Two rooms share a name.
    DuplicateRoom(String),
    /// Start room is not declared.
    UnknownStartRoom(String),
    /// Adjacency names a room that is not declared.
    UnknownAdjacency { room: String, target: String },
    /// Undirected map with a one-way edge.
    AsymmetricAdjacency { from: String, to: String },
    /// Hazard rule points at an undeclared room.
    RuleUnknownRoom { kind: HazardKind, room: String },
    /// A posted warning's kind has no rule to pin it on a room.
    UnmatchedWarningKind { room: String, kind: HazardKind },
    /// Two suspects share a role.
    DuplicateSuspect(String),
    /// Interrogation script for an undeclared suspect role.
    UnknownScriptSuspect(String),
    /// A script node is marked terminal but has children.
    TerminalWithChildren { suspect: String, prompt: String },
    /// Two evidence entries share an id.
    DuplicateEvidence(String),
    /// A room clue has no evidence catalog entry.
    ClueWithoutEvidence { room: String, clue: String },
    /// Constraint weight of zero contributes nothing.
    ZeroWeight { evidence: String },
    /// Constraint references a value outside its variable's domain.
    ValueOutsideDomain {
        evidence: String,
        var: CaseVar,
        value: String,
    },
    /// A case variable's domain is empty.
    EmptyDomain(CaseVar),
    /// Location domain value that is not a declared room.
    LocationNotARoom(String),
    /// Murderer domain value that is not a declared suspect role.
    MurdererNotASuspect(String),
    /// Solution assigns a value outside the variable's domain.
    SolutionOutsideDomain { var: CaseVar, value: String },
    /// Solution murderer is not the suspect flagged guilty.
    SolutionNotGuilty(String),
}

/// Validate a scenario, returning all errors found.
pub fn validate_scenario(config: &ScenarioConfig) -> Vec<ScenarioError> {
    let mut errors = Vec::new();

    // Rooms: unique names, known adjacency, symmetry unless directed.
    let mut room_names: HashSet<&str> = HashSet::new();
    for room in &config.rooms {
        if !room_names.insert(room.name.as_str()) {
            errors.push(ScenarioError::DuplicateRoom(room.name.clone()));
        }
    }
    if !room_names.contains(config.start_room.as_str()) {
        errors.push(ScenarioError::UnknownStartRoom(config.start_room.clone()));
    }
    for room in &config.rooms {
        for target in &room.adjacent {
            if !room_names.contains(target.as_str()) {
                errors.push(ScenarioError::UnknownAdjacency {
                    room: room.name.clone(),
                    target: target.clone(),
                });
                continue;
            }
            if !config.directed {
                let reverse = config
                    .rooms
                    .iter()
                    .find(|r| &r.name == target)
                    .map(|r| r.adjacent.contains(&room.name))
                    .unwrap_or(false);
                if !reverse {
                    errors.push(ScenarioError::AsymmetricAdjacency {
                        from: room.name.clone(),
                        to: target.clone(),
                    });
                }
            }
        }
    }

    // Hazard rules and warnings.
    for rule in &config.hazard_rules {
        if !room_names.contains(rule.room.as_str()) {
            errors.push(ScenarioError::RuleUnknownRoom {
                kind: rule.kind,
                room: rule.room.clone(),
            });
        }
    }
    for room in &config.rooms {
        for warning in &room.warnings {
            if !config.hazard_rules.iter().any(|r| r.kind == warning.kind) {
                errors.push(ScenarioError::UnmatchedWarningKind {
                    room: room.name.clone(),
                    kind: warning.kind,
                });
            }
        }
    }

    // Suspects and scripts.
    let mut roles: HashSet<&str> = HashSet::new();
    for suspect in &config.suspects {
        if !roles.insert(suspect.role.as_str()) {
            errors.push(ScenarioError::DuplicateSuspect(suspect.role.clone()));
        }
    }
    for script in &config.interrogations {
        if !roles.contains(script.suspect.as_str()) {
            errors.push(ScenarioError::UnknownScriptSuspect(script.suspect.clone()));
        }
        check_script_node(&script.suspect, &script.root, &mut errors);
    }

    // Evidence catalog.
    let mut evidence_ids: HashSet<&str> = HashSet::new();
    for spec in &config.evidence {
        if !evidence_ids.insert(spec.id.as_str()) {
            errors.push(ScenarioError::DuplicateEvidence(spec.id.clone()));
        }
        for constraint in &spec.constraints {
            if constraint.weight == 0 {
                errors.push(ScenarioError::ZeroWeight {
                    evidence: spec.id.clone(),
                });
            }
            check_condition(&spec.id, &constraint.condition, &config.domains, &mut errors);
        }
    }
    for room in &config.rooms {
        if let Some(clue) = &room.clue {
            if !evidence_ids.contains(clue.id.as_str()) {
                errors.push(ScenarioError::ClueWithoutEvidence {
                    room: room.name.clone(),
                    clue: clue.id.clone(),
                });
            }
        }
    }

    // Domains.
    for var in CaseVar::ALL {
        if config.domains.values(var).is_empty() {
            errors.push(ScenarioError::EmptyDomain(var));
        }
    }
    for location in &config.domains.location {
        if !room_names.contains(location.as_str()) {
            errors.push(ScenarioError::LocationNotARoom(location.clone()));
        }
    }
    for murderer in &config.domains.murderer {
        if !roles.contains(murderer.as_str()) {
            errors.push(ScenarioError::MurdererNotASuspect(murderer.clone()));
        }
    }

    // Solution.
    let assignments = [
        (CaseVar::Murderer, &config.solution.murderer),
        (CaseVar::Weapon, &config.solution.weapon),
        (CaseVar::Location, &config.solution.location),
        (CaseVar::Motive, &config.solution.motive),
    ];
    for (var, value) in assignments {
        if !config.domains.values(var).iter().any(|v| v == value) {
            errors.push(ScenarioError::SolutionOutsideDomain {
                var,
                value: value.clone(),
            });
        }
    }
    let guilty_matches = config
        .suspects
        .iter()
        .any(|s| s.role == config.solution.murderer && s.guilty);
    if !guilty_matches {
        errors.push(ScenarioError::SolutionNotGuilty(
            config.solution.murderer.clone(),
        ));
    }

    errors
}

fn check_script_node(suspect: &str, node: &DialogueNode, errors: &mut Vec<ScenarioError>) {
    if node.terminal && !node.children.is_empty() {
        errors.push(ScenarioError::TerminalWithChildren {
            suspect: suspect.to_string(),
            prompt: node.prompt.clone(),
        });
    }
    for child in &node.children {
        check_script_node(suspect, child, errors);
    }
}

fn check_condition(
    evidence: &str,
    condition: &Condition,
    domains: &Domains,
    errors: &mut Vec<ScenarioError>,
) {
    match condition {
        Condition::Equals { var, value } | Condition::NotEquals { var, value } => {
            if !domains.values(*var).iter().any(|v| v == value) {
                errors.push(ScenarioError::ValueOutsideDomain {
                    evidence: evidence.to_string(),
                    var: *var,
                    value: value.clone(),
                });
            }
        }
        Condition::All(parts) => {
            for part in parts {
                check_condition(evidence, part, domains, errors);
            }
        }
    }
}

/// A validated scenario, resolved and ready for a session.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub title: String,
    pub victim: String,
    pub map: MansionMap,
    pub start: RoomId,
    pub rules: Vec<HazardRule>,
    pub suspects: Vec<Suspect>,
    pub scripts: Vec<InterrogationConfig>,
    pub evidence: Vec<EvidenceSpec>,
    pub domains: Domains,
    pub solution: Solution,
}

impl Scenario {
    /// Validate `config` and assemble the runtime scenario.
    pub fn build(config: ScenarioConfig) -> Result<Scenario, Vec<ScenarioError>> {
        let errors = validate_scenario(&config);
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut ids: HashMap<String, RoomId> = HashMap::new();
        for (i, room) in config.rooms.iter().enumerate() {
            ids.insert(room.name.clone(), i as RoomId);
        }
        let rooms: Vec<Room> = config
            .rooms
            .into_iter()
            .enumerate()
            .map(|(i, rc)| {
                let adjacent = rc.adjacent.iter().map(|name| ids[name.as_str()]).collect();
                Room {
                    id: i as RoomId,
                    name: rc.name,
                    adjacent,
                    clue: rc.clue,
                    hazard: rc.hazard,
                    warnings: rc.warnings,
                }
            })
            .collect();
        let rules = config
            .hazard_rules
            .iter()
            .map(|rule| HazardRule {
                kind: rule.kind,
                room: ids[rule.room.as_str()],
            })
            .collect();
        let start = ids[config.start_room.as_str()];

        Ok(Scenario {
            title: config.title,
            victim: config.victim,
            map: MansionMap::from_rooms(rooms),
            start,
            rules,
            suspects: config.suspects,
            scripts: config.interrogations,
            evidence: config.evidence,
            domains: config.domains,
            solution: config.solution,
        })
    }
}
