// src/panel.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{aggregator::AdminDataAggregator, models::AdminViewModel};

/// What the admin screen currently has to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelSnapshot {
    /// Never activated.
    Idle,
    Loading,
    Ready(AdminViewModel),
    /// The last run failed before anything was published. Retry with `refresh`.
    Failed { error: String },
}

impl PanelSnapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelSnapshot::Idle | PanelSnapshot::Loading)
    }

    pub fn view_model(&self) -> Option<&AdminViewModel> {
        match self {
            PanelSnapshot::Ready(model) => Some(model),
            _ => None,
        }
    }
}

/// Owns the aggregator and publishes the outcome of its runs.
///
/// Only aggregation runs write the snapshot; readers get clones.
pub struct AdminPanel {
    aggregator: AdminDataAggregator,
    state: watch::Sender<PanelSnapshot>,
}

impl AdminPanel {
    pub fn new(aggregator: AdminDataAggregator) -> Arc<Self> {
        let (state, _) = watch::channel(PanelSnapshot::Idle);
        Arc::new(Self { aggregator, state })
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        self.state.borrow().clone()
    }

    /// First activation starts loading in the background; later calls do nothing.
    /// Returns whether a run was started.
    pub fn activate(self: &Arc<Self>) -> bool {
        let started = self.state.send_if_modified(|state| {
            if matches!(state, PanelSnapshot::Idle) {
                *state = PanelSnapshot::Loading;
                true
            } else {
                false
            }
        });

        if started {
            tracing::info!("Admin panel activated");
            self.spawn_load();
        }
        started
    }

    /// Starts a new run unless one is already in flight.
    /// Returns whether a run was started.
    pub fn refresh(self: &Arc<Self>) -> bool {
        let started = self.state.send_if_modified(|state| {
            if matches!(state, PanelSnapshot::Loading) {
                false
            } else {
                *state = PanelSnapshot::Loading;
                true
            }
        });

        if started {
            tracing::info!("Admin data refresh requested");
            self.spawn_load();
        } else {
            tracing::debug!("Refresh ignored, a load is already running");
        }
        started
    }

    /// Runs one aggregation on the current task and publishes its outcome.
    ///
    /// If a run is already in flight, waits for that one instead of starting another.
    pub async fn load(&self) -> PanelSnapshot {
        let claimed = self.state.send_if_modified(|state| {
            if matches!(state, PanelSnapshot::Loading) {
                false
            } else {
                *state = PanelSnapshot::Loading;
                true
            }
        });

        if !claimed {
            tracing::debug!("Load joined the run already in flight");
            return self.settled().await;
        }
        self.run().await
    }

    /// Waits until the panel holds either data or an error.
    /// Does not return while the panel was never activated.
    pub async fn settled(&self) -> PanelSnapshot {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // the sender lives in `self`, so the channel cannot close while we wait
            Err(_) => self.snapshot(),
        }
    }

    /// Aggregates and publishes. The caller must already have moved the state to `Loading`.
    async fn run(&self) -> PanelSnapshot {
        let next = match self.aggregator.aggregate().await {
            Ok(model) => PanelSnapshot::Ready(model),
            Err(e) => {
                tracing::error!("Failed to load admin data: {}", e);
                PanelSnapshot::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.state.send_replace(next.clone());
        next
    }

    fn spawn_load(self: &Arc<Self>) {
        let panel = Arc::clone(self);
        tokio::spawn(async move {
            panel.run().await;
        });
    }
}
