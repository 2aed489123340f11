//! Portal notifications panel: pending join requests and recent members.
//!
//! `NotificationsPanel` owns the state machine behind the notifications
//! surface: a fetch lifecycle scoped to one portal, approve/reject
//! mutations gated per user, and a toast queue for failures. Renderers
//! subscribe via [`NotificationsPanel::watch`] and call
//! [`NotificationsPanel::snapshot`] after every change signal.
//!
//! Concurrency rules: fetches race freely and the latest one wins
//! (responses from superseded fetches are discarded wholesale), and at
//! most one approve/reject is in flight per user at a time. Switching
//! portals retires everything in flight for the old one; a fetch or
//! action that completes afterwards is dropped without touching the
//! new portal's state.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use portico_client::PortalClient;
use portico_common::id::{PortalId, UserId};
use portico_common::media::AvatarUrlBuilder;
use portico_common::models::{JoinRequest, RecentMember};

use crate::avatar::AvatarView;
use crate::timefmt;
use crate::toast::{Toast, ToastLevel, ToastQueue};

/// Default copy for a failed approval when the backend gave no reason.
pub const APPROVE_FAILED: &str = "Could not approve the request. Try again.";
/// Default copy for a failed rejection when the backend gave no reason.
pub const REJECT_FAILED: &str = "Could not reject the request. Try again.";
/// Requests tab empty state.
pub const NO_PENDING_REQUESTS: &str = "No pending join requests.";
/// Members tab empty state.
pub const NO_RECENT_MEMBERS: &str = "No members have joined recently.";

/// Shown when a row carries no usable timestamp.
const TIME_UNKNOWN: &str = "recently";

/// The two tabs of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Requests,
    Members,
}

struct PanelState {
    portal: PortalId,
    /// Bumped on every portal switch. An approve/reject completion (or
    /// its cancellation guard) from an older epoch is discarded whole.
    scope_epoch: u64,
    loading: bool,
    active_tab: Tab,
    join_requests: Vec<JoinRequest>,
    recent_members: Vec<RecentMember>,
    /// Users with an approve/reject currently in flight.
    pending_actions: HashSet<UserId>,
    toasts: ToastQueue,
}

/// Stateful controller for the notifications surface.
///
/// Thread-safe behind `&self`; share it in an `Arc` across UI tasks.
pub struct NotificationsPanel {
    client: PortalClient,
    state: Mutex<PanelState>,
    /// Generation counter for fetches; only the newest may apply.
    fetch_seq: AtomicU64,
    revision: watch::Sender<u64>,
}

impl NotificationsPanel {
    /// Panel scoped to `portal`. Starts in the loading state; call
    /// [`refresh`](Self::refresh) to load it.
    pub fn new(client: PortalClient, portal: PortalId) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            client,
            state: Mutex::new(PanelState {
                portal,
                scope_epoch: 0,
                loading: true,
                active_tab: Tab::default(),
                join_requests: Vec::new(),
                recent_members: Vec::new(),
                pending_actions: HashSet::new(),
                toasts: ToastQueue::default(),
            }),
            fetch_seq: AtomicU64::new(0),
            revision,
        }
    }

    /// Re-render signal: the value increments on every state change.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Portal this panel is currently scoped to.
    pub fn portal(&self) -> PortalId {
        self.state.lock().unwrap().portal.clone()
    }

    fn changed(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    // ── Fetch lifecycle ───────────────────────────────────────────────────────

    /// Fetch both lists for the current portal.
    ///
    /// Concurrent calls race safely: each takes the next fetch
    /// generation, and a response only applies while its generation is
    /// still the newest. A fetch superseded before it even starts is
    /// skipped outright; a superseded response is dropped entirely.
    /// Clearing the loading flag is owned by the winning fetch.
    ///
    /// On success both lists are replaced. On failure the previous
    /// lists stay (stale beats blank) and the error is logged, not
    /// surfaced.
    pub async fn refresh(&self) {
        let generation = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let portal = {
            let mut state = self.state.lock().unwrap();
            if self.fetch_seq.load(Ordering::SeqCst) != generation {
                debug!(generation, "Skipping a fetch superseded before it started");
                return;
            }
            state.loading = true;
            state.portal.clone()
        };
        self.changed();
        debug!(portal = %portal, generation, "Fetching portal notifications");

        let result = self.client.notifications(&portal).await;

        {
            let mut state = self.state.lock().unwrap();
            if self.fetch_seq.load(Ordering::SeqCst) != generation {
                debug!(portal = %portal, generation, "Discarding superseded notifications response");
                return;
            }
            match result {
                Ok(payload) => {
                    let overlap: Vec<String> =
                        payload.overlapping_ids().iter().map(|id| id.to_string()).collect();
                    if !overlap.is_empty() {
                        warn!(
                            portal = %portal,
                            users = ?overlap,
                            "Payload lists users as both pending and joined"
                        );
                    }
                    state.join_requests = payload.join_requests;
                    state.recent_members = payload.recent_members;
                }
                Err(error) => {
                    warn!(portal = %portal, %error, "Failed to fetch portal notifications");
                }
            }
            state.loading = false;
        }
        self.changed();
    }

    /// Re-scope the panel to another portal and fetch it.
    ///
    /// A no-op when the id is unchanged, so callers can invoke this on
    /// every render pass without re-fetching.
    pub async fn set_portal(&self, portal: PortalId) {
        {
            let mut state = self.state.lock().unwrap();
            if state.portal == portal {
                return;
            }
            // Invalidate in-flight fetches and actions for the old
            // portal before their completions can land on the new one.
            self.fetch_seq.fetch_add(1, Ordering::SeqCst);
            state.scope_epoch += 1;
            debug!(from = %state.portal, to = %portal, "Re-scoping notifications panel");
            state.portal = portal;
            state.join_requests.clear();
            state.recent_members.clear();
            state.pending_actions.clear();
            state.loading = true;
        }
        self.changed();
        self.refresh().await;
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    /// Approve a pending join request.
    ///
    /// Ignored while an approve/reject for the same user is in flight.
    /// On success the row is removed locally right away, then a refresh
    /// reconciles the lists (the member now belongs under recent
    /// members). On failure nothing moves and an error toast carries
    /// the backend's reason, or [`APPROVE_FAILED`] without one. A
    /// completion that lands after the panel switched portals is
    /// dropped whole, outcome included.
    pub async fn approve(&self, user: UserId) {
        let Some((portal, mut guard)) = self.begin_action(&user) else {
            return;
        };

        let result = self.client.approve_member(&portal, &user).await;

        let reconcile = {
            let mut state = self.state.lock().unwrap();
            guard.disarm();
            if state.scope_epoch != guard.epoch {
                debug!(portal = %portal, user = %user, "Discarding approval that finished after a portal switch");
                return;
            }
            state.pending_actions.remove(&user);
            match result {
                Ok(()) => {
                    state.join_requests.retain(|r| r.member.id != user);
                    true
                }
                Err(error) => {
                    warn!(portal = %portal, user = %user, %error, "Failed to approve join request");
                    let message = error.server_message().unwrap_or(APPROVE_FAILED).to_owned();
                    state.toasts.push(ToastLevel::Error, message);
                    false
                }
            }
        };
        self.changed();

        if reconcile {
            self.refresh().await;
        }
    }

    /// Reject a pending join request.
    ///
    /// Same gating and portal scoping as [`approve`](Self::approve); a
    /// successful rejection only removes the row locally, nothing else
    /// changed server-side that would need a refetch.
    pub async fn reject(&self, user: UserId) {
        let Some((portal, mut guard)) = self.begin_action(&user) else {
            return;
        };

        let result = self.client.reject_member(&portal, &user).await;

        {
            let mut state = self.state.lock().unwrap();
            guard.disarm();
            if state.scope_epoch != guard.epoch {
                debug!(portal = %portal, user = %user, "Discarding rejection that finished after a portal switch");
                return;
            }
            state.pending_actions.remove(&user);
            match result {
                Ok(()) => {
                    state.join_requests.retain(|r| r.member.id != user);
                }
                Err(error) => {
                    warn!(portal = %portal, user = %user, %error, "Failed to reject join request");
                    let message = error.server_message().unwrap_or(REJECT_FAILED).to_owned();
                    state.toasts.push(ToastLevel::Error, message);
                }
            }
        }
        self.changed();
    }

    /// Mark `user` as having an action in flight.
    ///
    /// Returns the portal to hit plus a guard that releases the mark
    /// should the caller's future be dropped mid-flight, or `None`
    /// when an action for this user is already running.
    fn begin_action(&self, user: &UserId) -> Option<(PortalId, ActionGuard<'_>)> {
        let (portal, epoch) = {
            let mut state = self.state.lock().unwrap();
            if !state.pending_actions.insert(user.clone()) {
                debug!(user = %user, "Action already in flight for user, ignoring");
                return None;
            }
            (state.portal.clone(), state.scope_epoch)
        };
        self.changed();
        let guard = ActionGuard {
            panel: self,
            user: user.clone(),
            epoch,
            armed: true,
        };
        Some((portal, guard))
    }

    // ── Local state ───────────────────────────────────────────────────────────

    /// Switch the visible tab. Purely local, never touches the network.
    pub fn set_active_tab(&self, tab: Tab) {
        {
            let mut state = self.state.lock().unwrap();
            if state.active_tab == tab {
                return;
            }
            state.active_tab = tab;
        }
        self.changed();
    }

    /// Dismiss a toast by id.
    pub fn dismiss_toast(&self, id: Uuid) {
        {
            let mut state = self.state.lock().unwrap();
            state.toasts.dismiss(id);
        }
        self.changed();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render-ready view of the panel at `now`.
    pub fn snapshot(&self, now: DateTime<Utc>, urls: &dyn AvatarUrlBuilder) -> PanelSnapshot {
        let state = self.state.lock().unwrap();
        if state.loading {
            return PanelSnapshot::Loading {
                toasts: state.toasts.to_vec(),
            };
        }

        let body = match state.active_tab {
            Tab::Requests if state.join_requests.is_empty() => TabBody::Empty {
                message: NO_PENDING_REQUESTS,
            },
            Tab::Requests => TabBody::Requests(
                state
                    .join_requests
                    .iter()
                    .map(|request| request_row(request, &state.pending_actions, now, urls))
                    .collect(),
            ),
            Tab::Members if state.recent_members.is_empty() => TabBody::Empty {
                message: NO_RECENT_MEMBERS,
            },
            Tab::Members => TabBody::Members(
                state
                    .recent_members
                    .iter()
                    .map(|member| recent_row(member, now, urls))
                    .collect(),
            ),
        };

        PanelSnapshot::Ready(PanelView {
            active_tab: state.active_tab,
            requests_badge: match state.join_requests.len() {
                0 => None,
                n => Some(n),
            },
            body,
            toasts: state.toasts.to_vec(),
        })
    }
}

/// Releases a user's in-flight mark when an approve/reject future is
/// dropped before its completion block runs, so a cancelled action
/// cannot gate its user forever. Completions disarm it; after a portal
/// switch it leaves the set alone, since the switch already reset the
/// marks for the new scope.
struct ActionGuard<'a> {
    panel: &'a NotificationsPanel,
    user: UserId,
    epoch: u64,
    armed: bool,
}

impl ActionGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let released = {
            let mut state = self.panel.state.lock().unwrap();
            state.scope_epoch == self.epoch && state.pending_actions.remove(&self.user)
        };
        if released {
            self.panel.changed();
        }
    }
}

fn request_row(
    request: &JoinRequest,
    pending: &HashSet<UserId>,
    now: DateTime<Utc>,
    urls: &dyn AvatarUrlBuilder,
) -> RequestRow {
    RequestRow {
        key: request.member.id.clone(),
        display_name: request.member.display_name().to_owned(),
        avatar: AvatarView::resolve(&request.member, urls),
        requested: request
            .created_at
            .map(|at| timefmt::relative(at, now))
            .unwrap_or_else(|| TIME_UNKNOWN.to_owned()),
        action_pending: pending.contains(&request.member.id),
    }
}

fn recent_row(member: &RecentMember, now: DateTime<Utc>, urls: &dyn AvatarUrlBuilder) -> RecentRow {
    RecentRow {
        key: member.member.id.clone(),
        display_name: member.member.display_name().to_owned(),
        avatar: AvatarView::resolve(&member.member, urls),
        joined: member
            .joined_at
            .map(|at| timefmt::relative(at, now))
            .unwrap_or_else(|| TIME_UNKNOWN.to_owned()),
    }
}

/// One pending join request, ready to render.
#[derive(Debug, Clone)]
pub struct RequestRow {
    /// Stable render key: the user's backend id.
    pub key: UserId,
    pub display_name: String,
    pub avatar: AvatarView,
    /// "Requested … ago" text.
    pub requested: String,
    /// An approve/reject is in flight; disable the row's buttons.
    pub action_pending: bool,
}

/// One recently joined member, ready to render.
#[derive(Debug, Clone)]
pub struct RecentRow {
    pub key: UserId,
    pub display_name: String,
    pub avatar: AvatarView,
    /// "Joined … ago" text.
    pub joined: String,
}

/// Body of the active tab.
#[derive(Debug, Clone)]
pub enum TabBody {
    Requests(Vec<RequestRow>),
    Members(Vec<RecentRow>),
    /// The active tab has nothing to show.
    Empty { message: &'static str },
}

/// Everything a renderer needs once the panel has data.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub active_tab: Tab,
    /// Count on the Requests tab, present only when nonzero.
    pub requests_badge: Option<usize>,
    pub body: TabBody,
    pub toasts: Vec<Toast>,
}

/// Render-ready panel state.
#[derive(Debug, Clone)]
pub enum PanelSnapshot {
    /// A fetch owns the panel; draw the spinner (and any toasts).
    Loading { toasts: Vec<Toast> },
    Ready(PanelView),
}

impl PanelSnapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelSnapshot::Loading { .. })
    }

    pub fn view(&self) -> Option<&PanelView> {
        match self {
            PanelSnapshot::Ready(view) => Some(view),
            PanelSnapshot::Loading { .. } => None,
        }
    }

    pub fn toasts(&self) -> &[Toast] {
        match self {
            PanelSnapshot::Loading { toasts } => toasts,
            PanelSnapshot::Ready(view) => &view.toasts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_client::ClientConfig;
    use portico_common::media::CdnUrlBuilder;

    fn panel() -> NotificationsPanel {
        let client =
            PortalClient::new(ClientConfig::new("https://portico.example.com")).unwrap();
        NotificationsPanel::new(client, PortalId::from("p1"))
    }

    #[test]
    fn starts_loading_on_the_requests_tab() {
        let panel = panel();
        let snap = panel.snapshot(Utc::now(), &CdnUrlBuilder::new("https://cdn.test"));
        assert!(snap.is_loading());
    }

    #[test]
    fn tab_switch_is_purely_local() {
        let panel = panel();
        let mut rx = panel.watch();
        let before = *rx.borrow_and_update();

        panel.set_active_tab(Tab::Members);
        assert!(*rx.borrow_and_update() > before);

        // Same tab again: no change, no signal.
        let before = *rx.borrow_and_update();
        panel.set_active_tab(Tab::Members);
        assert_eq!(*rx.borrow_and_update(), before);
    }

    #[test]
    fn panel_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NotificationsPanel>();
    }
}
