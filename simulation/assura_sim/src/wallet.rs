//! # Wallet & Staking Ledger
//!
//! Holds display-only balances and staking figures, plus the simulated
//! transaction ledger. Balances are never recomputed from transactions.
//!
//! The ledger is seeded lazily the first time a wallet view is shown and
//! never re-seeded afterwards. Submitting a mock transaction produces a
//! fresh hash for display but does not append a ledger entry.

use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entropy::{full_hash, short_hash};
use crate::errors::{Result, SimError};
use crate::notify::{emit, NoticeKind, Notification};
use crate::types::{parse_keyed, FormInputs, StakingTier, Transaction, TxKind, TxStatus};

/// Entries created by [`WalletLedger::seed_transactions`].
pub const SEED_TRANSACTION_COUNT: usize = 10;
/// Mock conversion rate: 1 USDT buys this many ASRA.
pub const SWAP_RATE: f64 = 45.5;
/// Stake and unstake amounts are shown in ASRA at this multiple.
pub const STAKE_MULTIPLIER: f64 = 10.0;
/// Seeded dates fall within this many days before today.
const SEED_WINDOW_DAYS: u64 = 30;

/// Format a raw amount the way the ledger shows it for `kind`.
pub fn format_amount(kind: TxKind, value: f64) -> String {
    match kind {
        TxKind::Swap => format!("{:.2} USDT -> {:.2} ASRA", value, value * SWAP_RATE),
        TxKind::Stake | TxKind::Unstake => format!("{:.2} ASRA", value * STAKE_MULTIPLIER),
        TxKind::Deposit | TxKind::Withdraw => format!("${value:.2}"),
    }
}

/// Generate `count` random transactions with ids `1..=count`.
///
/// Shared by the wallet ledger and the profile history.
pub fn generate_transactions<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    count: usize,
) -> Vec<Transaction> {
    (1..=count)
        .map(|i| {
            let kind = *TxKind::ALL.choose(rng).unwrap_or(&TxKind::Deposit);
            let status = *TxStatus::ALL.choose(rng).unwrap_or(&TxStatus::Completed);
            let value: f64 = rng.gen_range(10.0..1000.0);
            let days_ago = rng.gen_range(1..=SEED_WINDOW_DAYS);
            Transaction {
                id: i.to_string(),
                kind,
                status,
                occurred_on: today - Days::new(days_ago),
                amount_display: format_amount(kind, value),
                hash: short_hash(rng),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletView {
    #[default]
    Wallet,
    Staking,
}

impl FromStr for WalletView {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed(
            "wallet view",
            s,
            &[WalletView::Wallet, WalletView::Staking],
            |v| match v {
                WalletView::Wallet => ("wallet", "Wallet"),
                WalletView::Staking => ("staking", "Staking"),
            },
        )
    }
}

/// Balances and staking position, display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletFigures {
    pub usdt_balance: f64,
    pub asra_balance: f64,
    pub staked_asra: f64,
    pub staking_tier: StakingTier,
    pub staking_rewards: f64,
    pub days_remaining: u32,
}

impl Default for WalletFigures {
    fn default() -> Self {
        Self {
            usdt_balance: 1250.75,
            asra_balance: 54320.5,
            staked_asra: 25000.0,
            staking_tier: StakingTier::Gold,
            staking_rewards: 1250.25,
            days_remaining: 45,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletSnapshot {
    pub view: WalletView,
    pub figures: WalletFigures,
    pub staking_tier_label: &'static str,
    pub open_modal: Option<TxKind>,
    pub last_transaction_hash: Option<String>,
    pub transactions: Vec<Transaction>,
}

pub struct WalletLedger {
    view: WalletView,
    figures: WalletFigures,
    open_modal: Option<TxKind>,
    last_transaction_hash: Option<String>,
    transactions: Vec<Transaction>,
    rng: StdRng,
}

impl WalletLedger {
    pub fn new(rng: StdRng) -> Self {
        Self {
            view: WalletView::default(),
            figures: WalletFigures::default(),
            open_modal: None,
            last_transaction_hash: None,
            transactions: Vec::new(),
            rng,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Populate the ledger if it is empty. Returns the number of entries added.
    pub fn seed_transactions(&mut self) -> usize {
        self.seed_transactions_on(Local::now().date_naive())
    }

    /// [`seed_transactions`](Self::seed_transactions) with an explicit "today".
    pub fn seed_transactions_on(&mut self, today: NaiveDate) -> usize {
        if !self.transactions.is_empty() {
            debug!("Ledger already seeded ({} entries)", self.transactions.len());
            return 0;
        }
        self.transactions = generate_transactions(&mut self.rng, today, SEED_TRANSACTION_COUNT);
        debug!("Seeded {} transactions", self.transactions.len());
        self.transactions.len()
    }

    /// Switch between wallet and staking views; seeds the ledger on first use.
    pub fn set_view(&mut self, view: WalletView) {
        self.view = view;
        self.seed_transactions();
    }

    /// Open the form for `kind`, replacing any other open form.
    pub fn open_modal(&mut self, kind: TxKind) {
        self.open_modal = Some(kind);
        self.last_transaction_hash = None;
    }

    pub fn close_modal(&mut self) {
        self.open_modal = None;
    }

    /// Accept any form and show a fresh hash. The ledger is left untouched.
    pub fn record_mock_transaction(&mut self, form: &FormInputs) -> Option<Notification> {
        let hash = full_hash(&mut self.rng);
        debug!(
            hash = %hash,
            kind = ?self.open_modal,
            fields = form.fields.len(),
            "Mock transaction recorded"
        );
        self.last_transaction_hash = Some(hash);
        emit(
            NoticeKind::TransactionSubmitted,
            "Your transaction is being processed.",
        )
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn figures(&self) -> &WalletFigures {
        &self.figures
    }

    pub fn view(&self) -> WalletView {
        self.view
    }

    pub fn open_modal_kind(&self) -> Option<TxKind> {
        self.open_modal
    }

    pub fn last_transaction_hash(&self) -> Option<&str> {
        self.last_transaction_hash.as_deref()
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            view: self.view,
            figures: self.figures.clone(),
            staking_tier_label: self.figures.staking_tier.label(),
            open_modal: self.open_modal,
            last_transaction_hash: self.last_transaction_hash.clone(),
            transactions: self.transactions.clone(),
        }
    }
}
