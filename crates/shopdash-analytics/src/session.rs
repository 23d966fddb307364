//! Latest published dashboard and the view state derived from it.

use crate::data_fetcher::load_dashboard_data;
use crate::snapshot::{AnalyticsOptions, DashboardSnapshot};
use crate::traits::RecordSource;
use arc_swap::ArcSwapOption;
use chrono::Utc;
use shopdash_common::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What the analytics page should display right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No cycle has finished yet.
    Loading,
    /// The last published snapshot has no records at all.
    Empty,
    Ready(Arc<DashboardSnapshot>),
    /// The newest cycle failed. `previous` is the last good snapshot, if any.
    Failed {
        message: String,
        previous: Option<Arc<DashboardSnapshot>>,
    },
}

#[derive(Debug)]
struct Published {
    cycle: u64,
    snapshot: Arc<DashboardSnapshot>,
}

#[derive(Debug)]
struct Failure {
    cycle: u64,
    message: String,
}

/// Holds the most recent snapshot behind an `ArcSwapOption`.
///
/// Every cycle takes a ticket from [`DashboardSession::begin_cycle`]. A result is only
/// published when no newer cycle has published already, so a slow superseded cycle
/// cannot overwrite fresher data.
#[derive(Debug, Default)]
pub struct DashboardSession {
    cycles: AtomicU64,
    published: ArcSwapOption<Published>,
    failure: ArcSwapOption<Failure>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next cycle number, starting at 1.
    pub fn begin_cycle(&self) -> u64 {
        self.cycles.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publishes `snapshot` for `cycle` unless a newer cycle got there first.
    /// Returns whether it was published.
    pub fn publish(&self, cycle: u64, snapshot: Arc<DashboardSnapshot>) -> bool {
        let fresh = Arc::new(Published { cycle, snapshot });
        let previous = self.published.rcu(|current| match current {
            Some(newer) if newer.cycle > cycle => Some(Arc::clone(newer)),
            _ => Some(Arc::clone(&fresh)),
        });

        let accepted = previous.map_or(true, |p| p.cycle <= cycle);
        if accepted {
            debug!(cycle, "Published dashboard snapshot");
        } else {
            debug!(cycle, "Discarded snapshot of a superseded cycle");
        }
        accepted
    }

    /// Records that `cycle` failed. Ignored when a newer cycle already failed.
    pub fn fail(&self, cycle: u64, message: impl Into<String>) {
        let fresh = Arc::new(Failure {
            cycle,
            message: message.into(),
        });
        self.failure.rcu(|current| match current {
            Some(newer) if newer.cycle > cycle => Some(Arc::clone(newer)),
            _ => Some(Arc::clone(&fresh)),
        });
    }

    /// The last published snapshot.
    pub fn snapshot(&self) -> Option<Arc<DashboardSnapshot>> {
        self.published.load_full().map(|p| Arc::clone(&p.snapshot))
    }

    /// Message of the newest failed cycle, if it is newer than the published snapshot.
    pub fn last_error(&self) -> Option<String> {
        let failure = self.failure.load_full()?;
        let published_cycle = self.published.load().as_ref().map_or(0, |p| p.cycle);
        (failure.cycle > published_cycle).then(|| failure.message.clone())
    }

    pub fn state(&self) -> ViewState {
        let snapshot = self.snapshot();
        if let Some(message) = self.last_error() {
            return ViewState::Failed {
                message,
                previous: snapshot,
            };
        }

        match snapshot {
            None => ViewState::Loading,
            Some(snapshot) if snapshot.is_empty() => ViewState::Empty,
            Some(snapshot) => ViewState::Ready(snapshot),
        }
    }

    /// Runs one fetch-and-aggregate cycle against `source`.
    ///
    /// On failure the previous snapshot stays published and the error is remembered
    /// for [`DashboardSession::state`].
    #[instrument(skip_all, fields(cycle))]
    pub async fn refresh<S>(&self, source: &S, options: &AnalyticsOptions) -> Result<Arc<DashboardSnapshot>>
    where
        S: RecordSource + ?Sized,
    {
        let cycle = self.begin_cycle();
        tracing::Span::current().record("cycle", cycle);

        match load_dashboard_data(source).await {
            Ok(data) => {
                let snapshot = Arc::new(DashboardSnapshot::from_data(&data, options, Utc::now()));
                if self.publish(cycle, Arc::clone(&snapshot)) {
                    info!("Dashboard refreshed");
                }
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "Dashboard refresh failed, keeping previous snapshot");
                self.fail(cycle, e.user_message());
                Err(e)
            }
        }
    }
}
