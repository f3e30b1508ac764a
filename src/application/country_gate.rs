//! Country Gate - Decision executor
//!
//! Resolves the visitor's country, checks it against the blocklist and
//! either invokes the block action or lets the page continue. Any failure
//! to resolve lets the page continue: a geolocation outage must never
//! block a legitimate visitor.

use crate::application::CountryResolver;
use crate::domain::entities::{GateOutcome, GateState};
use crate::domain::ports::BlockRenderer;
use crate::domain::services::evaluate;
use crate::domain::value_objects::BlockList;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct CountryGate {
    blocked: BlockList,
    resolver: CountryResolver,
    renderer: Arc<dyn BlockRenderer>,
    state: Mutex<GateState>,
}

impl CountryGate {
    pub fn new(
        blocked: BlockList,
        resolver: CountryResolver,
        renderer: Arc<dyn BlockRenderer>,
    ) -> Self {
        Self {
            blocked,
            resolver,
            renderer,
            state: Mutex::new(GateState::Idle),
        }
    }

    pub fn state(&self) -> GateState {
        *self.state.lock()
    }

    pub fn blocked_countries(&self) -> &BlockList {
        &self.blocked
    }

    /// Run the check for this page load and return its terminal outcome.
    ///
    /// An empty blocklist allows the page without resolving anything.
    pub async fn check_and_block(&self) -> GateOutcome {
        if self.blocked.is_empty() {
            tracing::info!("blocklist is empty, allowing all visitors");
            return self.finish(GateOutcome::Allowed { country: None });
        }

        self.transition(GateState::Resolving);

        let outcome = match self.resolver.resolve().await {
            Ok(country) => {
                let decision = evaluate(&country, &self.blocked);
                if decision.blocked {
                    tracing::info!(country = %decision.country_code, "blocking visitor");
                    self.renderer.render(&decision.country_code);
                    GateOutcome::Blocked {
                        country: decision.country_code,
                    }
                } else {
                    tracing::info!(country = %decision.country_code, "allowing visitor");
                    GateOutcome::Allowed {
                        country: Some(decision.country_code),
                    }
                }
            }
            Err(failure) => {
                tracing::error!("country check failed, allowing by default: {}", failure);
                GateOutcome::AllowedOnFailure
            }
        };

        self.finish(outcome)
    }

    fn finish(&self, outcome: GateOutcome) -> GateOutcome {
        self.transition(outcome.state());
        outcome
    }

    fn transition(&self, next: GateState) {
        let mut state = self.state.lock();
        tracing::debug!("gate {} -> {}", *state, next);
        *state = next;
    }
}
