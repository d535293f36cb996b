use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;

pub type SessionId = u64;

#[derive(Default)]
struct HubState {
    /// round id -> senders of the sessions currently subscribed to it.
    rounds: HashMap<String, HashMap<SessionId, UnboundedSender<String>>>,
    /// Each session's most recent subscription; relays resolve through this.
    current_round: HashMap<SessionId, String>,
}

/// In-memory fan-out registry for live score updates. One hub is created at
/// startup and shared with every socket task; it never touches the datastore
/// and drops messages it cannot deliver.
pub struct RoundHub {
    next_id: AtomicU64,
    state: RwLock<HubState>,
}

impl Default for RoundHub {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundHub {
    pub fn new() -> Self {
        RoundHub {
            next_id: AtomicU64::new(1),
            state: RwLock::new(HubState::default()),
        }
    }

    pub fn next_session_id(&self) -> SessionId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Adds the session to the round's subscriber set and records the round
    /// as the session's current one. Subscribe only ever adds: membership in
    /// a previously joined round's set is left in place, matching the relay
    /// this reimplements.
    pub async fn subscribe(
        &self,
        session: SessionId,
        round_id: &str,
        sender: UnboundedSender<String>,
    ) {
        let mut state = self.state.write().await;
        state
            .rounds
            .entry(round_id.to_string())
            .or_default()
            .insert(session, sender);
        state.current_round.insert(session, round_id.to_string());
    }

    /// Delivers `payload` to every other subscriber of the sender's current
    /// round whose channel is still open. Best-effort: closed peers are
    /// skipped silently. Returns the number of deliveries attempted.
    pub async fn relay(&self, sender: SessionId, payload: &str) -> usize {
        let state = self.state.read().await;
        let Some(round_id) = state.current_round.get(&sender) else {
            return 0;
        };
        let Some(subscribers) = state.rounds.get(round_id) else {
            return 0;
        };
        let mut delivered = 0;
        for (id, tx) in subscribers {
            if *id == sender || tx.is_closed() {
                continue;
            }
            if tx.send(payload.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Removes the session from its recorded round's subscriber set, if any.
    pub async fn disconnect(&self, session: SessionId) {
        let mut state = self.state.write().await;
        if let Some(round_id) = state.current_round.remove(&session) {
            if let Some(subscribers) = state.rounds.get_mut(&round_id) {
                subscribers.remove(&session);
                if subscribers.is_empty() {
                    state.rounds.remove(&round_id);
                }
            }
        }
    }
}
