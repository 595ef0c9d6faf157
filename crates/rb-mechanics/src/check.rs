//! d20 skill checks.
//!
//! `total = d20 + stat modifier + fate`. A natural 20 always succeeds and a
//! natural 1 always fails, whatever the total.

use rand::rngs::StdRng;
use rb_core::GameState;
use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::stats::{StatKind, Stats, fate};

/// How well a check went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// A natural 20, or beating the DC by ten or more.
    CriticalSuccess {
        /// How far the total cleared the DC.
        margin: i32,
    },
    /// Met or beat the DC.
    Success {
        /// How far the total cleared the DC.
        margin: i32,
    },
    /// Missed by one or two.
    Partial,
    /// Missed.
    Failure,
    /// A natural 1.
    CriticalFailure,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess { margin } => write!(f, "Critical Success (margin {margin})"),
            Self::Success { margin } => write!(f, "Success (margin {margin})"),
            Self::Partial => write!(f, "Partial Success"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

/// The outcome of a skill check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// The stat that was tested.
    pub stat: StatKind,
    /// The natural d20 roll.
    pub roll: u32,
    /// The stat modifier.
    pub modifier: i32,
    /// The fate bonus, 0 when no state was supplied.
    pub fate_bonus: i32,
    /// `roll + modifier + fate_bonus`.
    pub total: i32,
    /// The difficulty class.
    pub dc: i32,
    /// Whether the check passed.
    pub success: bool,
    /// Natural 20.
    pub critical: bool,
    /// Natural 1.
    pub fumble: bool,
    /// Graded outcome.
    pub tier: Tier,
}

/// Resolve a natural roll against a DC. Split out from [`roll_check`] so the
/// grading can be tested without dice.
pub fn resolve(stat: StatKind, roll: u32, modifier: i32, fate_bonus: i32, dc: i32) -> CheckResult {
    let total = roll as i32 + modifier + fate_bonus;
    let critical = roll == Die::D20.sides();
    let fumble = roll == 1;
    let success = critical || (!fumble && total >= dc);
    let margin = total - dc;

    let tier = if fumble {
        Tier::CriticalFailure
    } else if critical || margin >= 10 {
        Tier::CriticalSuccess {
            margin: margin.max(0),
        }
    } else if success {
        Tier::Success { margin }
    } else if margin >= -2 {
        Tier::Partial
    } else {
        Tier::Failure
    };

    CheckResult {
        stat,
        roll,
        modifier,
        fate_bonus,
        total,
        dc,
        success,
        critical,
        fumble,
        tier,
    }
}

/// Roll a check. Passing the state adds its fate bonus.
pub fn roll_check(
    stat: StatKind,
    stats: &Stats,
    dc: i32,
    state: Option<&GameState>,
    rng: &mut StdRng,
) -> CheckResult {
    let roll = Die::D20.roll(rng);
    let fate_bonus = state.map(fate).unwrap_or(0);
    let result = resolve(stat, roll, stats.get(stat), fate_bonus, dc);
    tracing::debug!(
        stat = %stat,
        roll,
        total = result.total,
        dc,
        success = result.success,
        "skill check"
    );
    result
}
