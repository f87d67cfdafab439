use tracing::{debug, warn};

use crate::api_client::{ApiError, RoastApi};
use crate::models::RoastResult;

/// Where the result view stands for the current roast id. Exactly one
/// variant holds at any time; `Loaded` and `Failed` are terminal until the
/// id changes.
#[derive(Debug, Clone, Default)]
pub enum RetrievalState {
    /// No identifier requested yet. Distinct from `Pending`.
    #[default]
    Idle,
    Pending,
    Loaded(RoastResult),
    Failed(String),
}

/// Proof that a fetch was started, carrying the generation it belongs to.
/// Hand it back to [`ResultRetriever::finish`] with the outcome; a ticket
/// from a superseded generation is silently discarded.
#[derive(Debug)]
pub struct FetchTicket {
    roast_id: String,
    generation: u64,
}

impl FetchTicket {
    pub fn roast_id(&self) -> &str {
        &self.roast_id
    }
}

/// Fetches the roast for one identifier exactly once and exposes
/// [`RetrievalState`] to the presentation layer.
///
/// The generation counter is the stale-response guard: if a fetch for id A
/// is still in flight when a fetch for id B starts, A's late outcome no
/// longer matches the current generation and is dropped instead of
/// overwriting B's state. This substitutes for request cancellation.
#[derive(Debug, Default)]
pub struct ResultRetriever {
    state: RetrievalState,
    requested_id: Option<String>,
    generation: u64,
}

impl ResultRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RetrievalState {
        &self.state
    }

    /// Starts a fetch for `roast_id`, transitioning to `Pending`.
    ///
    /// Returns `None` without touching state when the id is empty, or when
    /// the same id has already been requested (one attempt per identifier,
    /// no auto-retry). A different id restarts the machine from `Pending`.
    pub fn begin(&mut self, roast_id: &str) -> Option<FetchTicket> {
        if roast_id.is_empty() {
            return None;
        }
        if self.requested_id.as_deref() == Some(roast_id) {
            debug!(roast_id, "already requested, not refetching");
            return None;
        }

        self.generation += 1;
        self.requested_id = Some(roast_id.to_string());
        self.state = RetrievalState::Pending;
        debug!(roast_id, generation = self.generation, "fetch started");

        Some(FetchTicket {
            roast_id: roast_id.to_string(),
            generation: self.generation,
        })
    }

    /// Commits a fetch outcome, unless a newer fetch has started since the
    /// ticket was issued.
    pub fn finish(&mut self, ticket: FetchTicket, outcome: Result<RoastResult, ApiError>) {
        if ticket.generation != self.generation {
            debug!(
                roast_id = %ticket.roast_id,
                "discarding stale response for superseded request"
            );
            return;
        }

        self.state = match outcome {
            Ok(roast) => RetrievalState::Loaded(roast),
            Err(err) => {
                warn!(roast_id = %ticket.roast_id, "roast fetch failed: {err}");
                RetrievalState::Failed(failure_message(&err))
            }
        };
    }

    /// Sequential driver for the one-shot path: begin, fetch, finish.
    /// Event-driven callers that need to interleave requests use
    /// [`begin`](Self::begin)/[`finish`](Self::finish) directly.
    pub async fn load(&mut self, roast_id: &str, api: &dyn RoastApi) {
        let Some(ticket) = self.begin(roast_id) else {
            return;
        };
        let outcome = api.fetch_roast(ticket.roast_id()).await;
        self.finish(ticket, outcome);
    }
}

fn failure_message(err: &ApiError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
