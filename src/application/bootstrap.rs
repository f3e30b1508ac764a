//! Bootstrap Trigger
//!
//! Runs the gate exactly once per page load, as soon as the document is
//! ready: immediately when it already is, otherwise on the ready signal.

use crate::application::CountryGate;
use crate::domain::entities::GateOutcome;
use crate::infrastructure::document::{Document, ReadyState};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

pub struct Bootstrap {
    gate: Arc<CountryGate>,
    document: Arc<Document>,
    outcome: OnceCell<GateOutcome>,
}

impl Bootstrap {
    pub fn new(gate: Arc<CountryGate>, document: Arc<Document>) -> Self {
        Self {
            gate,
            document,
            outcome: OnceCell::new(),
        }
    }

    /// Run the gate once and return its outcome.
    ///
    /// Later or concurrent calls wait for and return the same outcome
    /// without running the gate again.
    pub async fn run(&self) -> GateOutcome {
        self.outcome
            .get_or_init(|| async {
                if self.document.ready_state() == ReadyState::Loading {
                    tracing::debug!("document loading, deferring country check until ready");
                    self.document.wait_until_ready().await;
                }
                self.gate.check_and_block().await
            })
            .await
            .clone()
    }

    /// Run on a background task.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<GateOutcome> {
        tokio::spawn(async move { self.run().await })
    }

    /// Outcome of the run, once it has reached a terminal state.
    pub fn outcome(&self) -> Option<&GateOutcome> {
        self.outcome.get()
    }
}
