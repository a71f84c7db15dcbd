//! Interrogation dialogue trees and the adversarial evaluator.
//!
//! An interrogation is a two-player zero-sum game over an authored tree:
//! the investigator picks lines to maximize utility, the suspect picks
//! lines to minimize it, alternating each level. Evaluation is minimax
//! with alpha-beta pruning over `i32` utilities; the search bounds are
//! `i32::MIN` and `i32::MAX`, the domain's own extremes.
//!
//! Outcome adjustments are driven by authored [`OutcomeTag`]s and the
//! suspect's profile, never by inspecting prompt text.
//!
//! ```
//! use gumshoe_logic::dialogue::{best_line_value, DialogueNode, Speaker, Suspect};
//!
//! let question = |prompt: &str, value: i32| DialogueNode {
//!     speaker: Speaker::Investigator,
//!     prompt: prompt.to_string(),
//!     children: vec![],
//!     terminal: true,
//!     base_utility: value,
//!     outcome: None,
//! };
//! let root = DialogueNode {
//!     speaker: Speaker::Suspect,
//!     prompt: "I have nothing to hide".to_string(),
//!     children: vec![
//!         question("Then why were you seen outside?", 6),
//!         question("Of course, of course", -2),
//!     ],
//!     terminal: false,
//!     base_utility: 0,
//!     outcome: None,
//! };
//! let butler = Suspect {
//!     role: "Butler".to_string(),
//!     name: "James the Butler".to_string(),
//!     personality: "formal and precise".to_string(),
//!     guilty: false,
//!     truthfulness: 5,
//!     suspicion: 3,
//! };
//! // The investigator picks the pressing follow-up.
//! assert_eq!(best_line_value(&root, 2, &butler), 6);
//! ```

use serde::{Deserialize, Serialize};

/// Utility of a dialogue line from the investigator's point of view.
pub type Utility = i32;

/// Penalty when a guilty suspect lands on a truthful outcome.
pub const GUILTY_TRUTH_PENALTY: Utility = 20;

/// Truthfulness pivot for deflection: suspects above it deflect badly for
/// the investigator, suspects below it give the game away.
pub const TRUTHFULNESS_BASELINE: Utility = 5;

/// Who delivers a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Investigator,
    Suspect,
}

/// How a line lands, as authored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTag {
    /// The suspect ends up telling the truth.
    Truthful,
    /// The suspect deflects the question.
    Deflection,
}

/// One node of an interrogation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub speaker: Speaker,
    /// The line as spoken.
    pub prompt: String,
    #[serde(default)]
    pub children: Vec<DialogueNode>,
    /// Whether the exchange ends here by authorial intent.
    #[serde(default)]
    pub terminal: bool,
    /// Authored utility before profile adjustments.
    #[serde(default)]
    pub base_utility: Utility,
    /// Structured outcome of landing on this line.
    #[serde(default)]
    pub outcome: Option<OutcomeTag>,
}

/// A person of interest, as configured. Read-only during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    /// Stable role key ("Butler"), also the murderer-domain value.
    pub role: String,
    pub name: String,
    pub personality: String,
    pub guilty: bool,
    /// 1 (habitual liar) to 10 (candid).
    pub truthfulness: u8,
    /// 1 (beyond suspicion) to 10 (prime suspect).
    pub suspicion: u8,
}

/// Utility of landing on `node`, adjusted for the suspect's profile.
///
/// A guilty suspect steered into a truthful outcome costs them dearly;
/// a deflection is worth more the more truthful the suspect usually is.
pub fn utility_of(node: &DialogueNode, suspect: &Suspect) -> Utility {
    let mut utility = node.base_utility;
    match node.outcome {
        Some(OutcomeTag::Truthful) if suspect.guilty => utility -= GUILTY_TRUTH_PENALTY,
        Some(OutcomeTag::Deflection) => {
            utility += suspect.truthfulness as Utility - TRUTHFULNESS_BASELINE
        }
        _ => {}
    }
    utility
}

/// Evaluate an interrogation subtree with alpha-beta pruning.
///
/// Depth 0, authored terminals, and childless nodes all score as the node
/// itself via [`utility_of`] — a childless non-terminal deeper in the
/// budget is treated as if terminal rather than failing.
pub fn evaluate(
    node: &DialogueNode,
    depth: u32,
    maximizing: bool,
    mut alpha: Utility,
    mut beta: Utility,
    suspect: &Suspect,
) -> Utility {
    if depth == 0 || node.terminal || node.children.is_empty() {
        return utility_of(node, suspect);
    }
    if maximizing {
        let mut best = Utility::MIN;
        for child in &node.children {
            let value = evaluate(child, depth - 1, false, alpha, beta, suspect);
            best = best.max(value);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = Utility::MAX;
        for child in &node.children {
            let value = evaluate(child, depth - 1, true, alpha, beta, suspect);
            best = best.min(value);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Best achievable value with the investigator choosing first.
pub fn best_line_value(root: &DialogueNode, depth: u32, suspect: &Suspect) -> Utility {
    evaluate(root, depth, true, Utility::MIN, Utility::MAX, suspect)
}
