//! Gumshoe terminal demo.
//!
//! Plays one shipped case end to end: sweeps every room the hazard policy
//! allows, gathers clues and case-file evidence, interrogates the roster,
//! and accuses whoever the deduction engine names. Narration goes through
//! the `log` facade; the process exits non-zero if the case stays open.
//!
//! Usage:
//!   cargo run -p gumshoe-game            # the mansion case
//!   cargo run -p gumshoe-game -- gala
//!   cargo run -p gumshoe-game -- crypt

use gumshoe_logic::hazard::{MoveOutcome, RouteFailure};
use gumshoe_logic::scenario::ScenarioConfig;
use gumshoe_logic::session::Investigation;

const MANSION_JSON: &str = include_str!("../../../data/scenarios/mansion.json");
const GALA_JSON: &str = include_str!("../../../data/scenarios/gala.json");
const CRYPT_JSON: &str = include_str!("../../../data/scenarios/crypt.json");

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let case = std::env::args().nth(1).unwrap_or_else(|| "mansion".to_string());
    let json = match case.as_str() {
        "mansion" => MANSION_JSON,
        "gala" => GALA_JSON,
        "crypt" => CRYPT_JSON,
        other => {
            log::error!("unknown case '{}'; shipped cases: mansion, gala, crypt", other);
            std::process::exit(2);
        }
    };

    let config: ScenarioConfig = match serde_json::from_str(json) {
        Ok(config) => config,
        Err(e) => {
            log::error!("case file for '{}' does not parse: {}", case, e);
            std::process::exit(1);
        }
    };
    // Keep the catalog for the case-file phase; the session owns the rest.
    let catalog: Vec<(String, String)> = config
        .evidence
        .iter()
        .map(|e| (e.id.clone(), e.description.clone()))
        .collect();

    let mut session = match Investigation::new(config) {
        Ok(session) => session,
        Err(errors) => {
            for error in &errors {
                log::error!("invalid scenario: {:?}", error);
            }
            std::process::exit(1);
        }
    };

    log::info!("Case opened: {}", session.title());
    log::info!("Victim: {}", session.victim());
    for suspect in session.suspects() {
        log::info!(
            "Suspect: {} ({}), {}",
            suspect.name,
            suspect.role,
            suspect.personality
        );
    }
    log::info!("Starting in the {}", session.current_room_name());

    // The detective arrives equipped: every known countermeasure is ready
    // before the sweep begins.
    let preconditions: Vec<String> = session
        .map()
        .rooms()
        .iter()
        .filter_map(|room| room.hazard.as_ref().map(|h| h.precondition.clone()))
        .collect();
    for precondition in preconditions {
        log::info!("Countermeasure prepared: {}", precondition);
        session.clear_hazard(&precondition);
    }

    sweep_rooms(&mut session);
    register_case_file(&mut session, &catalog);
    interrogate_roster(&session);

    let case_report = session.case_report();
    for entry in &case_report.ranking {
        log::info!("Suspicion: {} scores {}", entry.name, entry.best_score);
    }
    let verdict = match case_report.verdict {
        Some(verdict) => verdict,
        None => {
            log::error!("the deduction engine produced no verdict");
            std::process::exit(1);
        }
    };
    log::info!(
        "Deduction: {} with the {} in the {}, motive {} ({}/{}, confidence {:.2})",
        verdict.hypothesis.murderer,
        verdict.hypothesis.weapon,
        verdict.hypothesis.location,
        verdict.hypothesis.motive,
        verdict.score,
        verdict.total_possible,
        verdict.confidence
    );

    for line in session.fact_log() {
        log::debug!("fact: {}", line);
    }

    let accusation = match session.accuse(&verdict.hypothesis.murderer) {
        Some(outcome) => outcome,
        None => {
            log::error!("verdict names '{}', who is not in the roster", verdict.hypothesis.murderer);
            std::process::exit(1);
        }
    };
    if accusation.correct {
        log::info!("Case closed. The {} did it.", accusation.accused);
    } else {
        log::error!(
            "Accused the {}, but it was the {} all along",
            accusation.accused,
            accusation.solution.murderer
        );
        std::process::exit(1);
    }
}

/// Visit every room a safe route reaches, narrating clues and warnings.
fn sweep_rooms(session: &mut Investigation) {
    let room_count = session.map().room_count() as u32;
    for target in 0..room_count {
        if target == session.current_room() {
            continue;
        }
        let target_name = session.room_name(target).to_string();
        let path = match session.plan_safe_route(target) {
            Ok(path) => path,
            Err(RouteFailure::DestinationTooDangerous) => {
                log::warn!("The {} is too dangerous to enter; moving on", target_name);
                continue;
            }
            Err(RouteFailure::NoSafeRoute) => {
                log::warn!("No safe route reaches the {}; moving on", target_name);
                continue;
            }
        };
        for &step in path.iter().skip(1) {
            let step_name = session.room_name(step).to_string();
            let report = match session.move_to(&step_name) {
                Some(report) => report,
                None => break,
            };
            match report.outcome {
                MoveOutcome::Entered { clue, sightings, .. } => {
                    log::info!("Entered the {}", step_name);
                    for sighting in sightings {
                        let suspected = sighting
                            .suspected_room
                            .map(|id| session.room_name(id).to_string());
                        match suspected {
                            Some(room) => log::warn!(
                                "Warning: {} (points at the {})",
                                sighting.text,
                                room
                            ),
                            None => log::warn!("Warning: {}", sighting.text),
                        }
                    }
                    if let Some(clue) = clue {
                        log::info!("Clue found: {}", clue.text);
                    }
                    if let Some(id) = report.evidence_recorded {
                        log::info!("Evidence registered: {}", id);
                    }
                }
                MoveOutcome::Rejected { reason } => {
                    // A sighting earlier on this route condemned a later hop.
                    log::warn!(
                        "Route to the {} abandoned at the {} ({:?})",
                        target_name,
                        step_name,
                        reason
                    );
                    break;
                }
            }
        }
    }
}

/// Register evidence the sweep could not walk to (forensics, paperwork).
fn register_case_file(session: &mut Investigation, catalog: &[(String, String)]) {
    for (id, description) in catalog {
        if session.record_evidence(id) {
            log::info!("Case file: {}", description);
        }
    }
}

fn interrogate_roster(session: &Investigation) {
    let roles: Vec<String> = session
        .suspects()
        .iter()
        .map(|s| s.role.clone())
        .collect();
    for role in roles {
        match session.interrogate(&role) {
            Some(report) => log::info!(
                "Interrogated the {}: best line of questioning scores {}",
                report.role,
                report.value
            ),
            None => log::info!("The {} has nothing scripted to say", role),
        }
    }
}
