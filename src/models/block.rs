//! Per-day availability markers: blocks and special days.
//!
//! # Escalation
//! Each [`Block`] carries an escalation stage. When nobody is available
//! for a primary shift, the generator relaxes blocks stage by stage:
//!
//! | Stage | Additionally allowed |
//! |-------|----------------------|
//! | 0 | unblocked only |
//! | 1 | free without credit |
//! | 2 | wish-free |
//! | 3 | paid leave (last resort) |

use serde::{Deserialize, Serialize};

/// Per-employee, per-day exclusion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Block {
    /// Available.
    #[default]
    None,
    /// Day off without hour credit.
    FreeNoCredit,
    /// Requested day off (externally capped at three per month).
    WishFree,
    /// Paid leave; credits contract hours on weekdays.
    PaidLeave,
}

impl Block {
    /// Escalation stage at which this block may be overridden.
    #[inline]
    pub fn stage(self) -> u8 {
        match self {
            Block::None => 0,
            Block::FreeNoCredit => 1,
            Block::WishFree => 2,
            Block::PaidLeave => 3,
        }
    }

    /// Whether the block is lifted at the given escalation stage.
    #[inline]
    pub fn allows_at(self, stage: u8) -> bool {
        self.stage() <= stage
    }

    /// Whether any block is set.
    #[inline]
    pub fn is_blocked(self) -> bool {
        self != Block::None
    }
}

/// Per-day marker granting a flat hour credit to employees off duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialDay {
    /// Ordinary day.
    #[default]
    None,
    /// Supervision day.
    #[serde(alias = "SV")]
    KindA,
    /// Team day.
    #[serde(alias = "TEAM")]
    KindB,
}

impl SpecialDay {
    /// Hour credit for an employee not on duty that day.
    ///
    /// `forced_off` selects the rest-day credit for employees coming off
    /// a primary shift.
    pub fn credit(self, forced_off: bool) -> f64 {
        match (self, forced_off) {
            (SpecialDay::None, _) => 0.0,
            (SpecialDay::KindA, true) => 3.5,
            (SpecialDay::KindA, false) => 2.0,
            (SpecialDay::KindB, true) => 2.0,
            (SpecialDay::KindB, false) => 3.0,
        }
    }

    /// Whether the day is marked at all.
    #[inline]
    pub fn is_special(self) -> bool {
        self != SpecialDay::None
    }
}
