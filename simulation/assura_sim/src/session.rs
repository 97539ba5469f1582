//! Session and UI flags: active tab, theme, menus and modals.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dashboard::Suggestion;
use crate::entropy::full_hash;
use crate::errors::{Result, SimError};
use crate::notify::{emit, NoticeKind, Notification};
use crate::types::{parse_keyed, FormInputs, StakingTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    ChatAndCommunity,
    WalletAndStaking,
    Projects,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::ChatAndCommunity,
        Tab::WalletAndStaking,
        Tab::Projects,
        Tab::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::ChatAndCommunity => "chat_and_community",
            Self::WalletAndStaking => "wallet_and_staking",
            Self::Projects => "projects",
            Self::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::ChatAndCommunity => "Chat & Community",
            Self::WalletAndStaking => "Wallet & Staking",
            Self::Projects => "Projects",
            Self::Profile => "Profile",
        }
    }
}

impl FromStr for Tab {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed("tab", s, &Self::ALL, |t| (t.as_str(), t.label()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityView {
    #[default]
    Chat,
    Community,
}

impl FromStr for CommunityView {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed(
            "community view",
            s,
            &[CommunityView::Chat, CommunityView::Community],
            |v| match v {
                CommunityView::Chat => ("chat", "Chat"),
                CommunityView::Community => ("community", "Community"),
            },
        )
    }
}

/// Profile popup opened from a suggestion card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub name: String,
    pub portfolio: String,
    pub hash: String,
    pub staking_level: StakingTier,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub tabs: Vec<&'static str>,
    pub active_tab: Tab,
    pub is_dark_mode: bool,
    pub is_mobile_menu_open: bool,
    pub is_chat_modal_open: bool,
    pub community_view: CommunityView,
    pub selected_profile: Option<ProfileCard>,
}

pub struct SessionState {
    active_tab: Tab,
    is_dark_mode: bool,
    is_mobile_menu_open: bool,
    is_chat_modal_open: bool,
    community_view: CommunityView,
    selected_profile: Option<ProfileCard>,
    rng: StdRng,
}

impl SessionState {
    pub fn new(rng: StdRng) -> Self {
        Self {
            active_tab: Tab::default(),
            is_dark_mode: false,
            is_mobile_menu_open: false,
            is_chat_modal_open: false,
            community_view: CommunityView::default(),
            selected_profile: None,
            rng,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Switch tab. Navigating always closes the mobile menu.
    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.is_mobile_menu_open = false;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.is_mobile_menu_open = !self.is_mobile_menu_open;
    }

    pub fn set_community_view(&mut self, view: CommunityView) {
        self.community_view = view;
    }

    pub fn open_chat_modal(&mut self) {
        self.is_chat_modal_open = true;
    }

    pub fn close_chat_modal(&mut self) {
        self.is_chat_modal_open = false;
    }

    pub fn open_profile_modal(&mut self, suggestion: &Suggestion) {
        let staking_level = *StakingTier::ALL
            .choose(&mut self.rng)
            .unwrap_or(&StakingTier::Silver);
        self.selected_profile = Some(ProfileCard {
            name: suggestion.name.clone(),
            portfolio: "https://example.com/portfolio".to_string(),
            hash: full_hash(&mut self.rng),
            staking_level,
            avatar: suggestion.avatar.clone(),
        });
    }

    pub fn close_profile_modal(&mut self) {
        self.selected_profile = None;
    }

    /// Generic form sink (post-a-project and similar). Contents are ignored.
    pub fn handle_form_submit(&mut self, form: &FormInputs) -> Option<Notification> {
        debug!(fields = form.fields.len(), "Form submitted");
        emit(
            NoticeKind::FormSubmitted,
            "Your submission has been received.",
        )
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.is_mobile_menu_open
    }

    pub fn selected_profile(&self) -> Option<&ProfileCard> {
        self.selected_profile.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tabs: Tab::ALL.iter().map(Tab::label).collect(),
            active_tab: self.active_tab,
            is_dark_mode: self.is_dark_mode,
            is_mobile_menu_open: self.is_mobile_menu_open,
            is_chat_modal_open: self.is_chat_modal_open,
            community_view: self.community_view,
            selected_profile: self.selected_profile.clone(),
        }
    }
}
