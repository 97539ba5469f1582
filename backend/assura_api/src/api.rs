//! Axum REST API handlers.
//!
//! `GET` routes return read-only snapshots of one slice. Action routes
//! return the notification the action produced (or `null`).

use std::sync::Arc;

use assura_sim::chat::ChatSnapshot;
use assura_sim::dao::ProposalView;
use assura_sim::dashboard::DashboardSnapshot;
use assura_sim::profile::{ProfileSnapshot, ProfileView};
use assura_sim::projects::{DisputeForm, ProjectsSnapshot};
use assura_sim::session::{CommunityView, SessionSnapshot, Tab};
use assura_sim::wallet::{WalletSnapshot, WalletView};
use assura_sim::{FormInputs, Notification, TxKind};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::errors::{ApiError, Result};
use crate::state::AppState;

type Shared = State<Arc<AppState>>;

/// JSON body whose rejection is reported through [`ApiError`].
type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

/// Mock forms always go through: anything that is not a JSON object,
/// including an empty body, counts as a form with no fields.
fn form_inputs(body: &Bytes) -> FormInputs {
    if body.is_empty() {
        return FormInputs::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("Treating unparseable form body as empty: {e}");
        FormInputs::default()
    })
}

// ─────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        // Session
        .route("/session", get(get_session))
        .route("/session/tab/:tab", post(set_active_tab))
        .route("/session/dark-mode", post(toggle_dark_mode))
        .route("/session/mobile-menu", post(toggle_mobile_menu))
        .route("/session/community/:view", post(set_community_view))
        .route(
            "/session/chat-modal",
            post(open_chat_modal).delete(close_chat_modal),
        )
        .route("/session/profile/:suggestion_id", post(open_profile_modal))
        .route("/session/profile", delete(close_profile_modal))
        .route("/session/form", post(submit_form))
        // Dashboard
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_metrics))
        // Wallet
        .route("/wallet", get(get_wallet))
        .route("/wallet/seed", post(seed_transactions))
        .route("/wallet/view/:view", post(set_wallet_view))
        .route("/wallet/modal/:kind", post(open_wallet_modal))
        .route("/wallet/modal", delete(close_wallet_modal))
        .route("/wallet/transactions", post(record_mock_transaction))
        // Projects
        .route("/projects", get(get_projects))
        .route("/projects/:id/confirm", post(confirm_work))
        .route("/projects/:id/submit", post(submit_work))
        .route("/projects/:id/revision", post(request_revision))
        .route("/projects/:id/dispute", post(open_dispute))
        .route("/disputes", post(submit_dispute).delete(close_dispute))
        // DAO
        .route("/proposals", get(get_proposals))
        .route("/proposals/:id/vote", post(vote))
        // Chat
        .route("/chat", get(get_chat))
        .route("/chat/messages", post(send_message))
        // Profile
        .route("/profile", get(get_profile))
        .route("/profile/view/:view", post(set_profile_view))
        .route("/profile/sections/:name", post(toggle_section))
        .route("/profile/job-id", post(download_job_id))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub notification: Option<Notification>,
}

impl From<Option<Notification>> for ActionResponse {
    fn from(notification: Option<Notification>) -> Self {
        Self { notification }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MockTransactionResponse {
    pub notification: Option<Notification>,
    pub transaction_hash: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub added: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub accepted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionResponse {
    pub section: String,
    pub expanded: bool,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /session`
pub async fn get_session(State(state): Shared) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

/// `POST /session/tab/:tab`
///
/// Accepts either the snake_case key or the display label.
pub async fn set_active_tab(
    State(state): Shared,
    Path(tab): Path<String>,
) -> Result<Json<SessionSnapshot>> {
    let tab: Tab = tab.parse()?;
    let mut session = state.session.lock().await;
    session.set_active_tab(tab);
    Ok(Json(session.snapshot()))
}

/// `POST /session/dark-mode`
pub async fn toggle_dark_mode(State(state): Shared) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.toggle_dark_mode();
    Json(session.snapshot())
}

/// `POST /session/mobile-menu`
pub async fn toggle_mobile_menu(State(state): Shared) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.toggle_mobile_menu();
    Json(session.snapshot())
}

/// `POST /session/community/:view`
pub async fn set_community_view(
    State(state): Shared,
    Path(view): Path<String>,
) -> Result<Json<SessionSnapshot>> {
    let view: CommunityView = view.parse()?;
    let mut session = state.session.lock().await;
    session.set_community_view(view);
    Ok(Json(session.snapshot()))
}

/// `POST /session/chat-modal`
pub async fn open_chat_modal(State(state): Shared) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.open_chat_modal();
    Json(session.snapshot())
}

/// `DELETE /session/chat-modal`
pub async fn close_chat_modal(State(state): Shared) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.close_chat_modal();
    Json(session.snapshot())
}

/// `POST /session/profile/:suggestion_id`
///
/// Reads the suggestion from the dashboard slice, then releases that lock
/// before touching the session.
pub async fn open_profile_modal(
    State(state): Shared,
    Path(suggestion_id): Path<u32>,
) -> Result<Json<SessionSnapshot>> {
    let suggestion = state
        .dashboard
        .lock()
        .await
        .suggestion(suggestion_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("suggestion {suggestion_id}")))?;
    let mut session = state.session.lock().await;
    session.open_profile_modal(&suggestion);
    Ok(Json(session.snapshot()))
}

/// `DELETE /session/profile`
pub async fn close_profile_modal(State(state): Shared) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.close_profile_modal();
    Json(session.snapshot())
}

/// `POST /session/form`
pub async fn submit_form(State(state): Shared, body: Bytes) -> Json<ActionResponse> {
    let form = form_inputs(&body);
    Json(state.session.lock().await.handle_form_submit(&form).into())
}

/// `GET /dashboard`
pub async fn get_dashboard(State(state): Shared) -> Json<DashboardSnapshot> {
    Json(state.dashboard.lock().await.snapshot())
}

/// `POST /dashboard/refresh`
pub async fn refresh_metrics(State(state): Shared) -> Json<DashboardSnapshot> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.refresh_metrics();
    Json(dashboard.snapshot())
}

/// `GET /wallet`
pub async fn get_wallet(State(state): Shared) -> Json<WalletSnapshot> {
    Json(state.wallet.lock().await.snapshot())
}

/// `POST /wallet/seed`
///
/// Idempotent: a populated ledger reports `added: 0`.
pub async fn seed_transactions(State(state): Shared) -> Json<SeedResponse> {
    let mut wallet = state.wallet.lock().await;
    let added = wallet.seed_transactions();
    Json(SeedResponse {
        added,
        total: wallet.transactions().len(),
    })
}

/// `POST /wallet/view/:view`
pub async fn set_wallet_view(
    State(state): Shared,
    Path(view): Path<String>,
) -> Result<Json<WalletSnapshot>> {
    let view: WalletView = view.parse()?;
    let mut wallet = state.wallet.lock().await;
    wallet.set_view(view);
    Ok(Json(wallet.snapshot()))
}

/// `POST /wallet/modal/:kind`
pub async fn open_wallet_modal(
    State(state): Shared,
    Path(kind): Path<String>,
) -> Result<Json<WalletSnapshot>> {
    let kind: TxKind = kind.parse()?;
    let mut wallet = state.wallet.lock().await;
    wallet.open_modal(kind);
    Ok(Json(wallet.snapshot()))
}

/// `DELETE /wallet/modal`
pub async fn close_wallet_modal(State(state): Shared) -> Json<WalletSnapshot> {
    let mut wallet = state.wallet.lock().await;
    wallet.close_modal();
    Json(wallet.snapshot())
}

/// `POST /wallet/transactions`
///
/// Any body is accepted; the ledger itself is not appended to.
pub async fn record_mock_transaction(
    State(state): Shared,
    body: Bytes,
) -> Json<MockTransactionResponse> {
    let form = form_inputs(&body);
    let mut wallet = state.wallet.lock().await;
    let notification = wallet.record_mock_transaction(&form);
    Json(MockTransactionResponse {
        notification,
        transaction_hash: wallet.last_transaction_hash().map(str::to_string),
    })
}

/// `GET /projects`
pub async fn get_projects(State(state): Shared) -> Json<ProjectsSnapshot> {
    Json(state.projects.lock().await.snapshot())
}

/// `POST /projects/:id/confirm`
pub async fn confirm_work(State(state): Shared, Path(id): Path<u64>) -> Json<ActionResponse> {
    Json(state.projects.lock().await.confirm_work(id).into())
}

/// `POST /projects/:id/submit`
pub async fn submit_work(State(state): Shared, Path(id): Path<u64>) -> Json<ActionResponse> {
    Json(state.projects.lock().await.submit_work(id).into())
}

/// `POST /projects/:id/revision`
pub async fn request_revision(State(state): Shared, Path(id): Path<u64>) -> Json<ActionResponse> {
    Json(state.projects.lock().await.request_revision(id).into())
}

/// `POST /projects/:id/dispute`
pub async fn open_dispute(State(state): Shared, Path(id): Path<u64>) -> Json<ProjectsSnapshot> {
    let mut projects = state.projects.lock().await;
    projects.open_dispute(id);
    Json(projects.snapshot())
}

/// `DELETE /disputes`
pub async fn close_dispute(State(state): Shared) -> Json<ProjectsSnapshot> {
    let mut projects = state.projects.lock().await;
    projects.close_dispute();
    Json(projects.snapshot())
}

/// `POST /disputes`
///
/// Files the dispute opened by the last `POST /projects/:id/dispute`.
pub async fn submit_dispute(
    State(state): Shared,
    payload: JsonBody<DisputeForm>,
) -> Result<Json<ActionResponse>> {
    let Json(form) = payload?;
    Ok(Json(state.projects.lock().await.submit_dispute(&form).into()))
}

/// `GET /proposals`
pub async fn get_proposals(State(state): Shared) -> Json<Vec<ProposalView>> {
    Json(state.dao.lock().await.views())
}

/// `POST /proposals/:id/vote`
pub async fn vote(State(state): Shared, Path(id): Path<u64>) -> Json<ActionResponse> {
    Json(state.dao.lock().await.vote(id).into())
}

/// `GET /chat`
pub async fn get_chat(State(state): Shared) -> Json<ChatSnapshot> {
    Json(state.chat.snapshot().await)
}

/// `POST /chat/messages`
///
/// Returns `202 Accepted` once the user message is appended; the persona
/// reply lands later. Blank text is ignored with `200 OK`.
pub async fn send_message(
    State(state): Shared,
    payload: JsonBody<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload?;
    let accepted = state.chat.send_message(&req.text).await.is_some();
    let status = if accepted {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SendMessageResponse { accepted })))
}

/// `GET /profile`
pub async fn get_profile(State(state): Shared) -> Json<ProfileSnapshot> {
    Json(state.profile.lock().await.snapshot())
}

/// `POST /profile/view/:view`
pub async fn set_profile_view(
    State(state): Shared,
    Path(view): Path<String>,
) -> Result<Json<ProfileSnapshot>> {
    let view: ProfileView = view.parse()?;
    let mut profile = state.profile.lock().await;
    profile.set_view(view);
    Ok(Json(profile.snapshot()))
}

/// `POST /profile/sections/:name`
pub async fn toggle_section(
    State(state): Shared,
    Path(name): Path<String>,
) -> Json<SectionResponse> {
    let expanded = state.profile.lock().await.toggle_section(&name);
    Json(SectionResponse {
        section: name,
        expanded,
    })
}

/// `POST /profile/job-id`
pub async fn download_job_id(State(state): Shared) -> Json<ActionResponse> {
    Json(state.profile.lock().await.download_job_id().into())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
