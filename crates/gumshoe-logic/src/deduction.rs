//! Weighted-constraint deduction over the case hypothesis space.
//!
//! Evidence contributes weighted constraints — plain data, not callbacks.
//! A hypothesis assigns one value to each of the four case variables; its
//! score is the total weight of the constraints it satisfies. The space is
//! small by design (suspects × weapons × locations × motives), so the best
//! hypothesis is found by full enumeration with a first-strict-maximum
//! tie-break: declaration order decides between equals.

use serde::{Deserialize, Serialize};

/// The four variables every hypothesis assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseVar {
    Murderer,
    Weapon,
    Location,
    Motive,
}

impl CaseVar {
    /// All case variables for iteration.
    pub const ALL: [CaseVar; 4] = [
        CaseVar::Murderer,
        CaseVar::Weapon,
        CaseVar::Location,
        CaseVar::Motive,
    ];
}

/// A predicate over a hypothesis, as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The variable must equal the value.
    Equals { var: CaseVar, value: String },
    /// The variable must not equal the value.
    NotEquals { var: CaseVar, value: String },
    /// Every inner condition must hold.
    All(Vec<Condition>),
}

impl Condition {
    /// Does `hypothesis` satisfy this condition?
    pub fn holds(&self, hypothesis: &Hypothesis) -> bool {
        match self {
            Condition::Equals { var, value } => hypothesis.get(*var) == value,
            Condition::NotEquals { var, value } => hypothesis.get(*var) != value,
            Condition::All(parts) => parts.iter().all(|part| part.holds(hypothesis)),
        }
    }
}

/// One weighted constraint contributed by a piece of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub condition: Condition,
    /// Evidential weight, at least 1.
    pub weight: u32,
}

/// A full assignment of the four case variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub murderer: String,
    pub weapon: String,
    pub location: String,
    pub motive: String,
}

impl Hypothesis {
    /// The value this hypothesis assigns to `var`.
    pub fn get(&self, var: CaseVar) -> &str {
        match var {
            CaseVar::Murderer => &self.murderer,
            CaseVar::Weapon => &self.weapon,
            CaseVar::Location => &self.location,
            CaseVar::Motive => &self.motive,
        }
    }
}

/// Candidate values per case variable, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domains {
    pub murderer: Vec<String>,
    pub weapon: Vec<String>,
    pub location: Vec<String>,
    pub motive: Vec<String>,
}

impl Domains {
    /// Values of one variable's domain.
    pub fn values(&self, var: CaseVar) -> &[String] {
        match var {
            CaseVar::Murderer => &self.murderer,
            CaseVar::Weapon => &self.weapon,
            CaseVar::Location => &self.location,
            CaseVar::Motive => &self.motive,
        }
    }
}

/// The best hypothesis with its score and confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub hypothesis: Hypothesis,
    /// Total weight of satisfied constraints.
    pub score: u32,
    /// Total weight of all registered constraints.
    pub total_possible: u32,
    /// `score / total_possible`, 0.0 with no evidence on the board.
    pub confidence: f64,
}

/// One murderer-domain value with its best achievable score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspectScore {
    pub name: String,
    pub best_score: u32,
}

/// Append-only evidence board.
///
/// Evidence ids register once; constraints are never removed. Scores only
/// ever grow as the case develops, which is what makes ranking stable
/// across turns.
#[derive(Debug, Clone)]
pub struct DeductionEngine {
    domains: Domains,
    /// Evidence ids in registration order.
    evidence: Vec<String>,
    constraints: Vec<Constraint>,
}

impl DeductionEngine {
    pub fn new(domains: Domains) -> Self {
        Self {
            domains,
            evidence: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Register named evidence and append its constraints.
    ///
    /// A repeated id is ignored and returns false, so re-examining a scene
    /// cannot double-count its weight.
    pub fn add_evidence(&mut self, id: &str, constraints: Vec<Constraint>) -> bool {
        if self.evidence.iter().any(|e| e == id) {
            return false;
        }
        self.evidence.push(id.to_string());
        self.constraints.extend(constraints);
        true
    }

    /// Evidence ids in registration order.
    pub fn evidence_ids(&self) -> &[String] {
        &self.evidence
    }

    /// Number of constraints on the board.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Total weight of every registered constraint.
    pub fn total_possible(&self) -> u32 {
        self.constraints.iter().map(|c| c.weight).sum()
    }

    /// Score one hypothesis: (satisfied weight, total weight).
    pub fn score(&self, hypothesis: &Hypothesis) -> (u32, u32) {
        let mut achieved = 0;
        let mut total = 0;
        for constraint in &self.constraints {
            total += constraint.weight;
            if constraint.condition.holds(hypothesis) {
                achieved += constraint.weight;
            }
        }
        (achieved, total)
    }

    /// Enumerate every hypothesis and keep the first strict maximum.
    ///
    /// Enumeration order is murderer → weapon → location → motive, each
    /// domain in declaration order. Returns `None` only when a domain is
    /// empty.
    pub fn best_hypothesis(&self) -> Option<Verdict> {
        let mut best: Option<Hypothesis> = None;
        let mut best_score = 0u32;
        for murderer in &self.domains.murderer {
            for weapon in &self.domains.weapon {
                for location in &self.domains.location {
                    for motive in &self.domains.motive {
                        let hypothesis = Hypothesis {
                            murderer: murderer.clone(),
                            weapon: weapon.clone(),
                            location: location.clone(),
                            motive: motive.clone(),
                        };
                        let (achieved, _) = self.score(&hypothesis);
                        if best.is_none() || achieved > best_score {
                            best_score = achieved;
                            best = Some(hypothesis);
                        }
                    }
                }
            }
        }
        let hypothesis = best?;
        let total_possible = self.total_possible();
        let confidence = if total_possible == 0 {
            0.0
        } else {
            f64::from(best_score) / f64::from(total_possible)
        };
        Some(Verdict {
            hypothesis,
            score: best_score,
            total_possible,
            confidence,
        })
    }

    /// Each murderer-domain value's best achievable score, sorted
    /// descending. The sort is stable, so ties keep declaration order.
    pub fn rank_suspects(&self) -> Vec<SuspectScore> {
        let mut ranking: Vec<SuspectScore> = Vec::new();
        for murderer in &self.domains.murderer {
            let mut best_score = 0u32;
            for weapon in &self.domains.weapon {
                for location in &self.domains.location {
                    for motive in &self.domains.motive {
                        let hypothesis = Hypothesis {
                            murderer: murderer.clone(),
                            weapon: weapon.clone(),
                            location: location.clone(),
                            motive: motive.clone(),
                        };
                        let (achieved, _) = self.score(&hypothesis);
                        if achieved > best_score {
                            best_score = achieved;
                        }
                    }
                }
            }
            ranking.push(SuspectScore {
                name: murderer.clone(),
                best_score,
            });
        }
        ranking.sort_by(|a, b| b.best_score.cmp(&a.best_score));
        ranking
    }
}
