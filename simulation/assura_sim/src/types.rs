//! # Types
//!
//! Shared data structures used across all slices of the simulation.
//!
//! ## Design decisions
//!
//! ### Closed enums instead of string keys
//!
//! Every status and kind is a closed enum with two string forms: a
//! `snake_case` key from [`as_str`](TxKind::as_str) (used on the wire and
//! when parsing) and a human label from `label()`. Display colours come
//! from exhaustive `badge()` tables, so adding a variant fails to compile
//! until every table covers it.
//!
//! ### Status as a Finite-State Machine
//!
//! [`ProjectStatus`] only ever moves into one of the two outcome states:
//!
//! ```text
//! PendingConfirmation ──► Completed | Disputed
//! InProgress          ──► Completed | Disputed
//! Completed           ──► Disputed
//! Disputed            ──► Completed
//! ```
//!
//! Nothing moves back to `PendingConfirmation` or `InProgress`. Seeded
//! projects may start in any state.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, SimError};

/// Label and colour token rendered by the view layer for a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayBadge {
    pub label: &'static str,
    pub color: &'static str,
}

/// Resolve `value` against either string form of every variant in `all`.
pub(crate) fn parse_keyed<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    keys: fn(T) -> (&'static str, &'static str),
) -> Result<T> {
    let wanted = value.trim();
    all.iter()
        .copied()
        .find(|v| {
            let (key, label) = keys(*v);
            key.eq_ignore_ascii_case(wanted) || label.eq_ignore_ascii_case(wanted)
        })
        .ok_or_else(|| SimError::UnknownVariant {
            kind,
            value: value.to_string(),
        })
}

// ─────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Deposit,
    Withdraw,
    Swap,
    Stake,
    Unstake,
}

impl TxKind {
    pub const ALL: [TxKind; 5] = [
        TxKind::Deposit,
        TxKind::Withdraw,
        TxKind::Swap,
        TxKind::Stake,
        TxKind::Unstake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Swap => "swap",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Swap => "Swap",
            Self::Stake => "Stake",
            Self::Unstake => "Unstake",
        }
    }
}

impl FromStr for TxKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed("transaction kind", s, &Self::ALL, |k| (k.as_str(), k.label()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Completed,
    Pending,
    Failed,
}

impl TxStatus {
    pub const ALL: [TxStatus; 3] = [TxStatus::Completed, TxStatus::Pending, TxStatus::Failed];

    pub fn badge(&self) -> DisplayBadge {
        match self {
            Self::Completed => DisplayBadge {
                label: "Completed",
                color: "text-green-500",
            },
            Self::Pending => DisplayBadge {
                label: "Pending",
                color: "text-yellow-500",
            },
            Self::Failed => DisplayBadge {
                label: "Failed",
                color: "text-red-500",
            },
        }
    }
}

/// A simulated ledger entry. Never mutated or deleted once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequential within a ledger, starting at `"1"`.
    pub id: String,
    pub kind: TxKind,
    pub status: TxStatus,
    pub occurred_on: NaiveDate,
    /// Formatted once at creation; see [`crate::wallet::format_amount`].
    pub amount_display: String,
    /// Truncated hex digest, e.g. `0x1a2b3c4d5e6f...`.
    pub hash: String,
}

// ─────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────

/// Lifecycle status of a marketplace project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work delivered; waiting for the client to confirm.
    PendingConfirmation,
    /// Worker is still delivering.
    InProgress,
    /// Client confirmed the work.
    Completed,
    /// A dispute was filed with the DAO.
    Disputed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::PendingConfirmation,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Disputed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingConfirmation => "pending_confirmation",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Disputed => "disputed",
        }
    }

    pub fn badge(&self) -> DisplayBadge {
        match self {
            Self::PendingConfirmation => DisplayBadge {
                label: "Pending Confirmation",
                color: "bg-yellow-500",
            },
            Self::InProgress => DisplayBadge {
                label: "In Progress",
                color: "bg-blue-500",
            },
            Self::Completed => DisplayBadge {
                label: "Completed",
                color: "bg-green-600",
            },
            Self::Disputed => DisplayBadge {
                label: "Disputed",
                color: "bg-red-600",
            },
        }
    }

    /// `Completed` and `Disputed` are outcome states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Disputed)
    }

    /// Whether a lifecycle action may move a project from `self` to `to`.
    pub fn can_transition_to(&self, to: ProjectStatus) -> bool {
        to.is_terminal() && *self != to
    }
}

impl FromStr for ProjectStatus {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed("project status", s, &Self::ALL, |st| {
            (st.as_str(), st.badge().label)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub title: String,
    /// Whole currency units.
    pub budget: u64,
    /// Whole ASRA tokens.
    pub reward: u64,
    pub status: ProjectStatus,
    pub client: String,
    pub worker: String,
}

// ─────────────────────────────────────────────────────────
// DAO proposals
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Voting,
    Passed,
    Executed,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 3] = [
        ProposalStatus::Voting,
        ProposalStatus::Passed,
        ProposalStatus::Executed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voting => "voting",
            Self::Passed => "passed",
            Self::Executed => "executed",
        }
    }

    /// The badge doubles as the proposal card's action button.
    pub fn badge(&self) -> DisplayBadge {
        match self {
            Self::Voting => DisplayBadge {
                label: "Vote",
                color: "bg-teal-600",
            },
            Self::Passed => DisplayBadge {
                label: "Execute",
                color: "bg-yellow-500",
            },
            Self::Executed => DisplayBadge {
                label: "Executed",
                color: "bg-green-600",
            },
        }
    }

    /// Only proposals still in `Voting` render an enabled action.
    pub fn action_enabled(&self) -> bool {
        matches!(self, Self::Voting)
    }
}

impl FromStr for ProposalStatus {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed("proposal status", s, &Self::ALL, |st| {
            (st.as_str(), st.badge().label)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Only ever increases.
    pub votes: u64,
    pub threshold: u64,
    pub status: ProposalStatus,
}

impl Proposal {
    /// `votes / threshold`; may exceed `1.0`.
    pub fn progress_ratio(&self) -> f64 {
        if self.threshold == 0 {
            return 1.0;
        }
        self.votes as f64 / self.threshold as f64
    }

    /// Progress bar width in percent, clamped to `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        (self.progress_ratio() * 100.0).clamp(0.0, 100.0)
    }

    pub fn threshold_reached(&self) -> bool {
        self.votes >= self.threshold
    }
}

// ─────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────

/// Fields of a simulated form, keyed by input name.
///
/// Values keep whatever JSON type the client sent. Nothing reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInputs {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// ─────────────────────────────────────────────────────────
// Chat & staking
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name, or `"You"` for the local user.
    pub sender: String,
    pub text: String,
    /// Local wall-clock time as `HH:MM`.
    pub timestamp: String,
    pub avatar_url: String,
}

/// Staking reward bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakingTier {
    Silver,
    Gold,
    Diamond,
}

impl StakingTier {
    pub const ALL: [StakingTier; 3] = [
        StakingTier::Silver,
        StakingTier::Gold,
        StakingTier::Diamond,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Diamond => "Diamond",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_kind_parses_key_and_label() {
        assert_eq!("swap".parse::<TxKind>().unwrap(), TxKind::Swap);
        assert_eq!("Unstake".parse::<TxKind>().unwrap(), TxKind::Unstake);
        assert_eq!(" deposit ".parse::<TxKind>().unwrap(), TxKind::Deposit);
        assert!(matches!(
            "mint".parse::<TxKind>(),
            Err(SimError::UnknownVariant { kind: "transaction kind", .. })
        ));
    }

    #[test]
    fn project_status_parses_display_label() {
        assert_eq!(
            "Pending Confirmation".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::PendingConfirmation
        );
        assert_eq!(
            "in_progress".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::InProgress
        );
    }

    #[test]
    fn badge_tables_cover_every_variant() {
        for s in TxStatus::ALL {
            assert!(s.badge().color.starts_with("text-"));
        }
        for s in ProjectStatus::ALL {
            assert!(s.badge().color.starts_with("bg-"));
        }
        for s in ProposalStatus::ALL {
            assert!(!s.badge().label.is_empty());
        }
        assert_eq!(TxStatus::Failed.badge().color, "text-red-500");
        assert_eq!(ProjectStatus::InProgress.badge().label, "In Progress");
    }

    #[test]
    fn transitions_only_target_outcome_states() {
        for from in ProjectStatus::ALL {
            assert!(!from.can_transition_to(ProjectStatus::InProgress));
            assert!(!from.can_transition_to(ProjectStatus::PendingConfirmation));
        }
        assert!(ProjectStatus::InProgress.can_transition_to(ProjectStatus::Disputed));
        assert!(ProjectStatus::PendingConfirmation.can_transition_to(ProjectStatus::Completed));
        assert!(!ProjectStatus::Completed.can_transition_to(ProjectStatus::Completed));
    }

    #[test]
    fn proposal_progress_is_clamped_for_display() {
        let mut p = Proposal {
            id: 1,
            title: "t".into(),
            description: "d".into(),
            votes: 25_000,
            threshold: 50_000,
            status: ProposalStatus::Voting,
        };
        assert!((p.progress_percent() - 50.0).abs() < f64::EPSILON);
        assert!(!p.threshold_reached());

        p.votes = 75_000;
        assert!((p.progress_ratio() - 1.5).abs() < f64::EPSILON);
        assert_eq!(p.progress_percent(), 100.0);
        assert!(p.threshold_reached());
    }

    #[test]
    fn only_voting_proposals_enable_action() {
        assert!(ProposalStatus::Voting.action_enabled());
        assert!(!ProposalStatus::Passed.action_enabled());
        assert!(!ProposalStatus::Executed.action_enabled());
    }
}
