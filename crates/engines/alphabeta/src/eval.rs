//! Static evaluation of Shobu positions.
//!
//! Every feature is measured for the agent and for its opponent, whoever is
//! on move in the evaluated state. Positive scores favour the agent.

use serde::{Deserialize, Serialize};
use shobu_core::{Action, GameState, Player, Rules, STONES_PER_BOARD};

use crate::policy::WeightPolicy;
use crate::search::Evaluate;
use crate::threat::threat_summary;

/// Scores are clamped to this magnitude; NaN maps to 0.
pub const SCORE_LIMIT: f64 = 1.0e12;

#[inline]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(-SCORE_LIMIT, SCORE_LIMIT)
    }
}

/// Evaluation weights. Every field has a default so partial profiles load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Factor on the cubed piece differential
    pub material_scale: f64,
    /// Extra weight on the agent's own weakest-board losses
    pub self_emphasis: f64,
    /// Weight of the total stone count difference inside the cubed term
    pub total_weight: f64,
    pub mobility_weight: f64,
    pub control_weight: f64,
    /// Per eliminating action
    pub threat_weight: f64,
    /// Per threatened stone on the most exposed board
    pub peak_threat_weight: f64,
    pub attack: WeightPolicy,
    pub defense: WeightPolicy,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            material_scale: 20.0,
            self_emphasis: 2.0,
            total_weight: 0.25,
            mobility_weight: 0.05,
            control_weight: 1.0,
            threat_weight: 4.0,
            peak_threat_weight: 0.1,
            attack: WeightPolicy::default_attack(),
            defense: WeightPolicy::default_defense(),
        }
    }
}

/// Raw features for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideFeatures {
    /// Stones on this side's weakest board
    pub min_pieces: u32,
    pub total_pieces: u32,
    /// Legal actions available to this side
    pub mobility: u32,
    /// Stones on central cells
    pub control: u32,
    /// Actions of this side that eliminate an enemy stone
    pub threats: u32,
    /// Enemy stones this side threatens on the most exposed board
    pub peak_threat: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub agent: SideFeatures,
    pub opponent: SideFeatures,
    /// Stones of both sides on the table
    pub total_stones: u32,
}

/// Weighted terms of a score, for logging and tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakdown {
    pub features: Features,
    pub attack: f64,
    pub defense: f64,
    pub material: f64,
    pub mobility: f64,
    pub control: f64,
    pub threats: f64,
    pub peak_threats: f64,
    pub total: f64,
}

impl EvalWeights {
    pub fn attack_multiplier(&self, f: &Features) -> f64 {
        self.attack.multiplier(f.opponent.min_pieces, f.total_stones)
    }

    pub fn defense_multiplier(&self, f: &Features) -> f64 {
        self.defense.multiplier(f.agent.min_pieces, f.total_stones)
    }

    pub fn breakdown(&self, f: &Features) -> Breakdown {
        let attack = self.attack_multiplier(f);
        let defense = self.defense_multiplier(f);

        let own_deficit = STONES_PER_BOARD.saturating_sub(f.agent.min_pieces) as f64;
        let opp_deficit = STONES_PER_BOARD.saturating_sub(f.opponent.min_pieces) as f64;
        let differential = attack * opp_deficit - defense * self.self_emphasis * own_deficit
            + self.total_weight * diff(f.agent.total_pieces, f.opponent.total_pieces);

        let material = self.material_scale * differential.powi(3);
        let mobility = self.mobility_weight * diff(f.agent.mobility, f.opponent.mobility);
        let control = self.control_weight * diff(f.agent.control, f.opponent.control);
        let threats =
            self.threat_weight * (f.agent.threats as f64 - defense * f.opponent.threats as f64);
        let peak_threats =
            self.peak_threat_weight * diff(f.agent.peak_threat, f.opponent.peak_threat);

        Breakdown {
            features: *f,
            attack,
            defense,
            material,
            mobility,
            control,
            threats,
            peak_threats,
            total: clamp_score(material + mobility + control + threats + peak_threats),
        }
    }

    /// Agent-relative score of a feature vector.
    pub fn score(&self, f: &Features) -> f64 {
        self.breakdown(f).total
    }

    pub fn is_valid(&self) -> bool {
        [
            self.material_scale,
            self.self_emphasis,
            self.total_weight,
            self.mobility_weight,
            self.control_weight,
            self.threat_weight,
            self.peak_threat_weight,
        ]
        .iter()
        .all(|w| w.is_finite())
            && self.attack.is_finite()
            && self.defense.is_finite()
    }
}

fn diff(a: u32, b: u32) -> f64 {
    a as f64 - b as f64
}

/// Evaluator bound to one agent and a rule engine.
pub struct Evaluator<'a, R> {
    rules: &'a R,
    agent: Player,
    weights: &'a EvalWeights,
}

impl<'a, R: Rules> Evaluator<'a, R> {
    pub fn new(rules: &'a R, agent: Player, weights: &'a EvalWeights) -> Self {
        Self {
            rules,
            agent,
            weights,
        }
    }

    pub fn agent(&self) -> Player {
        self.agent
    }

    /// Extracts features for both sides. The mover's actions come from the
    /// state; the waiting side's are asked of the rule engine.
    pub fn features(&self, state: &GameState) -> Features {
        let board = &state.board;
        let waiting = self.rules.compute_actions(board, state.to_move.other());
        let (agent_actions, opponent_actions): (&[Action], &[Action]) =
            if self.agent == state.to_move {
                (state.actions.as_slice(), waiting.as_slice())
            } else {
                (waiting.as_slice(), state.actions.as_slice())
            };

        let side = |player: Player, actions: &[Action]| {
            let threats = threat_summary(board, actions, player.other());
            SideFeatures {
                min_pieces: board.min_pieces(player),
                total_pieces: board.total_pieces(player),
                mobility: actions.len() as u32,
                control: board.center_control(player),
                threats: threats.eliminating_actions,
                peak_threat: threats.peak(),
            }
        };

        Features {
            agent: side(self.agent, agent_actions),
            opponent: side(self.agent.other(), opponent_actions),
            total_stones: board.total_stones(),
        }
    }

    pub fn breakdown(&self, state: &GameState) -> Breakdown {
        self.weights.breakdown(&self.features(state))
    }
}

impl<R: Rules> Evaluate<GameState> for Evaluator<'_, R> {
    fn evaluate(&self, state: &GameState) -> f64 {
        self.weights.score(&self.features(state))
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
