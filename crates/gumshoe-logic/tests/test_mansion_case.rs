//! Integration tests for a full investigation of the Ashford Mansion case.
//!
//! Exercises: ScenarioConfig → Scenario → Investigation
//! → movement/routing → evidence → interrogations → accusation
//!
//! All tests are pure logic — no file loading, no rendering.

use gumshoe_logic::deduction::{CaseVar, Condition, Constraint, Domains};
use gumshoe_logic::dialogue::{DialogueNode, OutcomeTag, Speaker, Suspect};
use gumshoe_logic::hazard::{MoveOutcome, RejectReason, RouteFailure};
use gumshoe_logic::map::{Clue, Hazard, HazardKind, Warning};
use gumshoe_logic::pathfinding::{find_path, hop_count};
use gumshoe_logic::scenario::{
    validate_scenario, EvidenceSpec, HazardRuleConfig, InterrogationConfig, RoomConfig, Scenario,
    ScenarioConfig, Solution,
};
use gumshoe_logic::session::Investigation;

// ── Helpers ────────────────────────────────────────────────────────────

const HALL: u32 = 0;
const STUDY: u32 = 1;
const LIBRARY: u32 = 2;
const DINING_ROOM: u32 = 3;
const KITCHEN: u32 = 4;
const CELLAR: u32 = 5;
const CONSERVATORY: u32 = 6;
const SECRET_PASSAGE: u32 = 7;

fn room(name: &str, adjacent: &[&str]) -> RoomConfig {
    RoomConfig {
        name: name.to_string(),
        adjacent: adjacent.iter().map(|s| s.to_string()).collect(),
        clue: None,
        hazard: None,
        warnings: vec![],
    }
}

fn clue(id: &str, text: &str) -> Option<Clue> {
    Some(Clue {
        id: id.to_string(),
        text: text.to_string(),
    })
}

fn suspect(role: &str, name: &str, personality: &str, guilty: bool, truthfulness: u8) -> Suspect {
    Suspect {
        role: role.to_string(),
        name: name.to_string(),
        personality: personality.to_string(),
        guilty,
        truthfulness,
        suspicion: 5,
    }
}

fn node(speaker: Speaker, prompt: &str, children: Vec<DialogueNode>) -> DialogueNode {
    DialogueNode {
        speaker,
        prompt: prompt.to_string(),
        children,
        terminal: false,
        base_utility: 0,
        outcome: None,
    }
}

fn answer(prompt: &str, value: i32, outcome: Option<OutcomeTag>) -> DialogueNode {
    DialogueNode {
        speaker: Speaker::Suspect,
        prompt: prompt.to_string(),
        children: vec![],
        terminal: true,
        base_utility: value,
        outcome,
    }
}

fn equals(var: CaseVar, value: &str, weight: u32) -> Constraint {
    Constraint {
        condition: Condition::Equals {
            var,
            value: value.to_string(),
        },
        weight,
    }
}

fn not_equals(var: CaseVar, value: &str, weight: u32) -> Constraint {
    Constraint {
        condition: Condition::NotEquals {
            var,
            value: value.to_string(),
        },
        weight,
    }
}

fn evidence(id: &str, description: &str, constraints: Vec<Constraint>) -> EvidenceSpec {
    EvidenceSpec {
        id: id.to_string(),
        description: description.to_string(),
        constraints,
    }
}

/// The butler's interrogation: two replies, each with one follow-up
/// question over two terminal answers.
fn butler_script() -> InterrogationConfig {
    InterrogationConfig {
        suspect: "Butler".to_string(),
        depth: 3,
        root: node(
            Speaker::Investigator,
            "Where were you when the shot was fired?",
            vec![
                node(
                    Speaker::Suspect,
                    "Polishing the silver in the pantry",
                    vec![node(
                        Speaker::Investigator,
                        "Can anyone confirm that?",
                        vec![
                            answer("The maid saw me there", 10, None),
                            answer("No... I was alone", -5, None),
                        ],
                    )],
                ),
                node(
                    Speaker::Suspect,
                    "I do not recall",
                    vec![node(
                        Speaker::Investigator,
                        "A man of your precision forgets?",
                        vec![
                            answer("Fine. I was in the pantry", 8, None),
                            answer("I refuse to answer that", 5, None),
                        ],
                    )],
                ),
            ],
        ),
    }
}

fn maid_script() -> InterrogationConfig {
    InterrogationConfig {
        suspect: "Maid".to_string(),
        depth: 2,
        root: node(
            Speaker::Investigator,
            "Did you tidy the dining room this morning?",
            vec![
                answer("I did not touch it, I swear", -3, None),
                answer(
                    "I... I only moved the chairs back",
                    6,
                    Some(OutcomeTag::Truthful),
                ),
            ],
        ),
    }
}

fn chef_script() -> InterrogationConfig {
    InterrogationConfig {
        suspect: "Chef".to_string(),
        depth: 2,
        root: node(
            Speaker::Investigator,
            "Was the carving knife missing before dinner?",
            vec![
                answer(
                    "Who counts knives during service?",
                    4,
                    Some(OutcomeTag::Deflection),
                ),
                answer(
                    "Yes. It vanished before the soup",
                    7,
                    Some(OutcomeTag::Truthful),
                ),
            ],
        ),
    }
}

fn heiress_script() -> InterrogationConfig {
    InterrogationConfig {
        suspect: "Heiress".to_string(),
        depth: 3,
        root: node(
            Speaker::Investigator,
            "You stand to inherit everything, do you not?",
            vec![
                node(
                    Speaker::Suspect,
                    "Wealth means nothing to me",
                    vec![node(
                        Speaker::Investigator,
                        "Then why visit the solicitor on Friday?",
                        vec![
                            answer("I... needed the money", 12, Some(OutcomeTag::Truthful)),
                            answer("You cannot prove a thing", 6, Some(OutcomeTag::Deflection)),
                        ],
                    )],
                ),
                answer(
                    "This conversation is beneath me",
                    2,
                    Some(OutcomeTag::Deflection),
                ),
            ],
        ),
    }
}

/// The full Ashford Mansion case, as shipped in `data/scenarios/mansion.json`.
fn mansion() -> ScenarioConfig {
    let mut study = room("Study", &["Hall", "Library"]);
    study.clue = clue(
        "suspicious_ledger",
        "A ledger of debts, with the heiress's page dog-eared",
    );
    let mut library = room("Library", &["Study"]);
    library.clue = clue(
        "bloodstained_glove",
        "A bloodstained evening glove, sized for a slender hand",
    );
    let mut dining_room = room("Dining Room", &["Hall", "Kitchen"]);
    dining_room.clue = clue(
        "dining_room_scene",
        "Overturned chairs and a fallen wine decanter",
    );
    let mut kitchen = room("Kitchen", &["Dining Room", "Cellar"]);
    kitchen.clue = clue(
        "shattered_wine_glass",
        "A shattered wine glass swept behind the stove",
    );
    kitchen.warnings.push(Warning {
        kind: HazardKind::Gas,
        text: "A faint hiss and the smell of gas from below".to_string(),
    });
    let mut cellar = room("Cellar", &["Kitchen"]);
    cellar.hazard = Some(Hazard {
        kind: HazardKind::Gas,
        text: "The air down here is thick with gas".to_string(),
        precondition: "gas_valve_closed".to_string(),
    });
    let mut conservatory = room("Conservatory", &["Hall", "Secret Passage"]);
    conservatory.warnings.push(Warning {
        kind: HazardKind::Collapse,
        text: "Plaster dust sifts from a sagging lintel".to_string(),
    });
    let mut secret_passage = room("Secret Passage", &["Conservatory"]);
    secret_passage.hazard = Some(Hazard {
        kind: HazardKind::Collapse,
        text: "The passage roof groans over rotten props".to_string(),
        precondition: "passage_shored".to_string(),
    });

    ScenarioConfig {
        title: "The Ashford Mansion Murder".to_string(),
        victim: "Lord Edmund Ashford".to_string(),
        start_room: "Hall".to_string(),
        directed: false,
        rooms: vec![
            room("Hall", &["Study", "Dining Room", "Conservatory"]),
            study,
            library,
            dining_room,
            kitchen,
            cellar,
            conservatory,
            secret_passage,
        ],
        hazard_rules: vec![
            HazardRuleConfig {
                kind: HazardKind::Gas,
                room: "Cellar".to_string(),
            },
            HazardRuleConfig {
                kind: HazardKind::Collapse,
                room: "Secret Passage".to_string(),
            },
        ],
        suspects: vec![
            suspect(
                "Butler",
                "James the Butler",
                "formal and precise",
                false,
                5,
            ),
            suspect("Maid", "Colette the Maid", "nervous and talkative", false, 8),
            suspect("Chef", "Gustave the Chef", "proud and short-tempered", false, 6),
            suspect(
                "Heiress",
                "Sophia the Heiress",
                "charming and evasive",
                true,
                2,
            ),
        ],
        interrogations: vec![
            butler_script(),
            maid_script(),
            chef_script(),
            heiress_script(),
        ],
        evidence: vec![
            evidence(
                "bloodstained_glove",
                "A bloodstained evening glove, sized for a slender hand",
                vec![equals(CaseVar::Murderer, "Heiress", 8)],
            ),
            evidence(
                "shattered_wine_glass",
                "A shattered wine glass swept behind the stove",
                vec![not_equals(CaseVar::Murderer, "Butler", 5)],
            ),
            evidence(
                "suspicious_ledger",
                "A ledger of debts, with the heiress's page dog-eared",
                vec![equals(CaseVar::Murderer, "Heiress", 6)],
            ),
            evidence(
                "missing_knife",
                "The carving knife is missing from its block",
                vec![not_equals(CaseVar::Weapon, "Knife", 9)],
            ),
            evidence(
                "poison_analysis",
                "Laboratory analysis: digitalis in the decanter",
                vec![equals(CaseVar::Weapon, "Poison", 10)],
            ),
            evidence(
                "dining_room_scene",
                "Overturned chairs and a fallen wine decanter",
                vec![equals(CaseVar::Location, "Dining Room", 10)],
            ),
            evidence(
                "inheritance_motive",
                "The will names the heiress sole beneficiary",
                vec![Constraint {
                    condition: Condition::All(vec![
                        Condition::Equals {
                            var: CaseVar::Murderer,
                            value: "Heiress".to_string(),
                        },
                        Condition::Equals {
                            var: CaseVar::Motive,
                            value: "Inheritance".to_string(),
                        },
                    ]),
                    weight: 7,
                }],
            ),
        ],
        domains: Domains {
            murderer: vec![
                "Butler".to_string(),
                "Maid".to_string(),
                "Chef".to_string(),
                "Heiress".to_string(),
            ],
            weapon: vec![
                "Knife".to_string(),
                "Poison".to_string(),
                "Candlestick".to_string(),
                "Rope".to_string(),
            ],
            location: vec![
                "Hall".to_string(),
                "Study".to_string(),
                "Library".to_string(),
                "Dining Room".to_string(),
                "Kitchen".to_string(),
                "Conservatory".to_string(),
            ],
            motive: vec![
                "Money".to_string(),
                "Revenge".to_string(),
                "Blackmail".to_string(),
                "Inheritance".to_string(),
            ],
        },
        solution: Solution {
            murderer: "Heiress".to_string(),
            weapon: "Poison".to_string(),
            location: "Dining Room".to_string(),
            motive: "Inheritance".to_string(),
        },
    }
}

fn open_case() -> Investigation {
    Investigation::new(mansion()).expect("mansion config is valid")
}

// ── Configuration and assembly ─────────────────────────────────────────

#[test]
fn mansion_config_validates_clean() {
    assert_eq!(validate_scenario(&mansion()), vec![]);
}

#[test]
fn rooms_resolve_in_declaration_order() {
    let scenario = Scenario::build(mansion()).expect("valid");
    assert_eq!(scenario.map.room_id("Hall"), Some(HALL));
    assert_eq!(scenario.map.room_id("Secret Passage"), Some(SECRET_PASSAGE));
    assert_eq!(scenario.map.room_name(DINING_ROOM), Some("Dining Room"));
    assert_eq!(scenario.start, HALL);
    assert_eq!(scenario.map.room_count(), 8);
}

// ── Routing ────────────────────────────────────────────────────────────

#[test]
fn shortest_paths_across_the_mansion() {
    let scenario = Scenario::build(mansion()).expect("valid");
    assert_eq!(
        find_path(&scenario.map, HALL, LIBRARY),
        Some(vec![HALL, STUDY, LIBRARY])
    );
    assert_eq!(
        find_path(&scenario.map, HALL, CELLAR),
        Some(vec![HALL, DINING_ROOM, KITCHEN, CELLAR])
    );
    let across = find_path(&scenario.map, LIBRARY, SECRET_PASSAGE).expect("connected");
    assert_eq!(
        across,
        vec![LIBRARY, STUDY, HALL, CONSERVATORY, SECRET_PASSAGE]
    );
    assert_eq!(hop_count(&across), 4);
}

#[test]
fn safe_route_reacts_to_knowledge() {
    let mut session = open_case();

    // The cellar needs its gas valve closed before entry is conceivable.
    assert_eq!(
        session.plan_safe_route(CELLAR),
        Err(RouteFailure::DestinationTooDangerous)
    );
    session.clear_hazard("gas_valve_closed");
    assert_eq!(
        session.plan_safe_route(CELLAR),
        Ok(vec![HALL, DINING_ROOM, KITCHEN, CELLAR])
    );

    // Sighting the gas warning in the kitchen closes it again for good.
    session.move_to("Dining Room");
    session.move_to("Kitchen");
    assert_eq!(
        session.plan_safe_route(CELLAR),
        Err(RouteFailure::DestinationTooDangerous)
    );
}

// ── Hazard flow ────────────────────────────────────────────────────────

#[test]
fn start_inference_marks_the_quiet_wing_safe() {
    let session = open_case();
    let kb = session.knowledge();
    for id in [HALL, STUDY, LIBRARY, DINING_ROOM, KITCHEN, CONSERVATORY] {
        assert!(kb.is_safe(id), "room {} should be inferred safe", id);
    }
    assert!(!kb.is_safe(CELLAR));
    assert!(!kb.is_safe(SECRET_PASSAGE));
    assert!(!kb.is_dangerous(CELLAR));
}

#[test]
fn kitchen_warning_condemns_the_cellar() {
    let mut session = open_case();
    session.clear_hazard("gas_valve_closed");
    session.move_to("Dining Room");
    let report = session.move_to("Kitchen").expect("known room");
    match report.outcome {
        MoveOutcome::Entered { ref sightings, .. } => {
            assert_eq!(sightings.len(), 1);
            assert_eq!(sightings[0].kind, HazardKind::Gas);
            assert_eq!(sightings[0].suspected_room, Some(CELLAR));
        }
        ref other => panic!("expected entry, got {:?}", other),
    }
    assert!(session.knowledge().is_dangerous(CELLAR));

    // Countermeasure or not, the cellar stays shut once the warning is in.
    let blocked = session.move_to("Cellar").expect("known room");
    assert_eq!(
        blocked.outcome,
        MoveOutcome::Rejected {
            reason: RejectReason::TooDangerous
        }
    );
    assert_eq!(session.current_room(), KITCHEN);
}

#[test]
fn rejected_moves_change_nothing() {
    let mut session = open_case();
    let before = session.fact_log();
    let report = session.move_to("Library").expect("known room");
    assert_eq!(
        report.outcome,
        MoveOutcome::Rejected {
            reason: RejectReason::NotAdjacent
        }
    );
    assert_eq!(session.fact_log(), before);
    assert_eq!(session.current_room(), HALL);
}

// ── Interrogations ─────────────────────────────────────────────────────

#[test]
fn interrogation_values_per_suspect() {
    let session = open_case();
    // Butler: max over {min {max(10, -5)}, min {max(8, 5)}} = 10.
    assert_eq!(session.interrogate("Butler").expect("scripted").value, 10);
    // Maid: truthful admission, not guilty, so 6 stands over -3.
    assert_eq!(session.interrogate("Maid").expect("scripted").value, 6);
    // Chef: deflection 4 + (6 - 5) = 5 loses to the truthful 7.
    assert_eq!(session.interrogate("Chef").expect("scripted").value, 7);
    // Heiress: the truthful 12 collapses to -8 under the guilty penalty,
    // leaving max(min(max(-8, 3)), -1) = 3.
    assert_eq!(session.interrogate("Heiress").expect("scripted").value, 3);
}

// ── The full case ──────────────────────────────────────────────────────

#[test]
fn full_walkthrough_solves_the_case() {
    let mut session = open_case();
    assert_eq!(session.current_room_name(), "Hall");
    assert_eq!(session.title(), "The Ashford Mansion Murder");

    // Sweep the west wing for paper evidence.
    let ledger = session.move_to("Study").expect("known room");
    assert_eq!(ledger.evidence_recorded.as_deref(), Some("suspicious_ledger"));
    let glove = session.move_to("Library").expect("known room");
    assert_eq!(glove.evidence_recorded.as_deref(), Some("bloodstained_glove"));

    // Back through the hall to the scene of the crime.
    session.move_to("Study");
    session.move_to("Hall");
    let scene = session.move_to("Dining Room").expect("known room");
    assert_eq!(scene.evidence_recorded.as_deref(), Some("dining_room_scene"));
    let glass = session.move_to("Kitchen").expect("known room");
    assert_eq!(
        glass.evidence_recorded.as_deref(),
        Some("shattered_wine_glass")
    );

    // Forensics come in from the case file.
    assert!(session.record_evidence("poison_analysis"));
    assert!(session.record_evidence("missing_knife"));
    assert!(session.record_evidence("inheritance_motive"));
    assert!(!session.record_evidence("poison_analysis"));

    let case = session.case_report();
    assert_eq!(case.evidence_found.len(), 7);
    assert_eq!(case.evidence_total, 7);

    let verdict = case.verdict.expect("domains are non-empty");
    assert_eq!(verdict.hypothesis.murderer, "Heiress");
    assert_eq!(verdict.hypothesis.weapon, "Poison");
    assert_eq!(verdict.hypothesis.location, "Dining Room");
    assert_eq!(verdict.hypothesis.motive, "Inheritance");
    assert_eq!(verdict.score, 55);
    assert_eq!(verdict.total_possible, 55);
    assert!((verdict.confidence - 1.0).abs() < 1e-9);

    let ranking: Vec<(&str, u32)> = case
        .ranking
        .iter()
        .map(|s| (s.name.as_str(), s.best_score))
        .collect();
    assert_eq!(
        ranking,
        vec![("Heiress", 55), ("Maid", 34), ("Chef", 34), ("Butler", 29)]
    );

    let outcome = session.accuse("Chef").expect("known role");
    assert!(!outcome.correct);
    let outcome = session.accuse("Heiress").expect("known role");
    assert!(outcome.correct);
    assert_eq!(outcome.solution.weapon, "Poison");

    let log = session.fact_log();
    assert!(log.iter().any(|l| l == "visited Hall and survived"));
    assert!(log.iter().any(|l| l == "gas leak detected from Kitchen"));
}

#[test]
fn revisits_never_double_register_evidence() {
    let mut session = open_case();
    session.move_to("Study");
    session.move_to("Hall");
    let second = session.move_to("Study").expect("known room");
    assert!(second.evidence_recorded.is_none());
    assert_eq!(session.case_report().evidence_found.len(), 1);
    // Only the ledger's weight counts toward the registered total.
    assert_eq!(session.deduction().total_possible(), 6);
}

#[test]
fn partial_evidence_still_ranks_the_heiress_first() {
    let mut session = open_case();
    session.move_to("Study"); // ledger: murderer == Heiress, weight 6
    session.record_evidence("missing_knife"); // weapon != Knife, weight 9
    let case = session.case_report();
    let verdict = case.verdict.expect("domains are non-empty");
    assert_eq!(verdict.hypothesis.murderer, "Heiress");
    assert_eq!(verdict.score, 15);
    assert_eq!(verdict.total_possible, 15);
    assert_eq!(case.ranking[0].name, "Heiress");
    assert_eq!(case.ranking[0].best_score, 15);
    // Everyone else still clears the knife constraint.
    assert!(case.ranking[1..].iter().all(|s| s.best_score == 9));
}
