//! # Assura Client-State Simulation
//!
//! In-memory state for the Assura freelance marketplace demo. Every number,
//! hash and address is generated locally; nothing is persisted and nothing
//! touches a chain.
//!
//! State is split into independently owned slices. Each slice owns its own
//! random generator and is mutated only through its own methods, so a
//! host can put every slice behind a separate lock.
//!
//! | Slice        | Type                          | Entry points                                          |
//! |--------------|-------------------------------|-------------------------------------------------------|
//! | Session      | [`session::SessionState`]     | `set_active_tab`, `toggle_dark_mode`, modals          |
//! | Dashboard    | [`dashboard::Dashboard`]      | `refresh_metrics`, `seed_suggestions`                 |
//! | Wallet       | [`wallet::WalletLedger`]      | `seed_transactions`, `record_mock_transaction`        |
//! | Projects     | [`projects::ProjectBoard`]    | `confirm_work`, `submit_work`, `request_revision`, `open_dispute`, `close_dispute`, `submit_dispute` |
//! | DAO          | [`dao::ProposalTally`]        | `seed_proposals`, `vote`                              |
//! | Chat         | [`chat::ChatRoom`]            | `send_message`                                        |
//! | Profile      | [`profile::ProfileState`]     | `on_load`, `toggle_section`, `download_job_id`        |
//!
//! Mutating actions return `Option<Notification>`: `Some` when the action
//! has something to tell the user, `None` when it was ignored or is silent.

pub mod chat;
pub mod dao;
pub mod dashboard;
pub mod entropy;
mod errors;
pub mod notify;
pub mod profile;
pub mod projects;
pub mod session;
mod types;
pub mod wallet;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_scenarios;

pub use errors::{Result, SimError};
pub use notify::{NoticeKind, Notification};
pub use types::{
    ChatMessage, DisplayBadge, FormInputs, Project, ProjectStatus, Proposal, ProposalStatus,
    StakingTier, Transaction, TxKind, TxStatus,
};
