use std::{
    future::Future,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use vitaldb_state::{CaseId, CaseRecord, TrackName, api};

use crate::notification::{Notification, Notifier};

/// Where the loader gets its records from.
pub trait CaseSource: Send + Sync + 'static {
    /// Every case, ordered by ID.
    fn fetch_cases(&self) -> impl Future<Output = api::ClientResult<Vec<CaseRecord>>> + Send;
    /// The tracks recorded for `case_id`.
    fn fetch_tracks(
        &self,
        case_id: CaseId,
    ) -> impl Future<Output = api::ClientResult<Vec<TrackName>>> + Send;
}

/// A [`CaseSource`] backed by a VitalDB server.
pub struct HttpSource {
    client: api::Client,
    concurrency: usize,
}
impl HttpSource {
    pub const DEFAULT_CONCURRENCY: usize = 8;

    /// `concurrency` bounds how many clinical-info requests are in flight at once.
    pub fn new(client: api::Client, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    pub fn client(&self) -> &api::Client {
        &self.client
    }
}
impl CaseSource for HttpSource {
    async fn fetch_cases(&self) -> api::ClientResult<Vec<CaseRecord>> {
        vitaldb_state::fetch_all(&self.client, self.concurrency, |fetched, total| {
            if fetched % 100 == 0 || fetched == total {
                tracing::debug!("Fetched {fetched}/{total} cases");
            }
        })
        .await
    }

    async fn fetch_tracks(&self, case_id: CaseId) -> api::ClientResult<Vec<TrackName>> {
        vitaldb_state::fetch_tracks(&self.client, case_id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    FetchCasesFailed { error: String },
    FetchTracksFailed { case_id: CaseId, error: String },
}
impl LoadError {
    /// Should be paired with [`Self::display_message`]
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadError::FetchCasesFailed { .. } => "Failed to load data",
            LoadError::FetchTracksFailed { .. } => "Failed to load tracks",
        }
    }

    /// Should be paired with [`Self::display_name`]
    pub fn display_message(&self) -> String {
        match self {
            LoadError::FetchCasesFailed { error } => error.clone(),
            LoadError::FetchTracksFailed { case_id, error } => {
                format!("Tracks for case {case_id} failed to load: {error}")
            }
        }
    }
}
impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.display_name(), self.display_message())
    }
}
impl std::error::Error for LoadError {}

#[derive(Debug, Clone, Default)]
pub struct LoaderState {
    pub status: LoadStatus,
    pub cases: Arc<Vec<CaseRecord>>,
    /// The tracks available for the first case.
    pub tracks: Vec<TrackName>,
    pub error: Option<LoadError>,
    /// Bumped every time a load succeeds.
    pub revision: u64,
}

/// Loads the case collection and keeps the last good one.
///
/// A failed load leaves the previous cases and tracks in place and records
/// the error; calling [`Loader::load`] again retries. Loads may overlap, in
/// which case whichever finishes last decides the state.
pub struct Loader<S> {
    source: Arc<S>,
    state: Arc<RwLock<LoaderState>>,
    notifier: Notifier,
}
impl<S> Clone for Loader<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            state: self.state.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
impl<S: CaseSource> Loader<S> {
    pub fn new(source: S, notifier: Notifier) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(RwLock::new(LoaderState::default())),
            notifier,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load(&self) -> Result<Arc<Vec<CaseRecord>>, LoadError> {
        {
            let mut state = self.write_state();
            state.status = LoadStatus::Loading;
            state.error = None;
        }

        match self.fetch().await {
            Ok((cases, tracks)) => {
                let cases = Arc::new(cases);
                let count = cases.len();
                {
                    let mut state = self.write_state();
                    state.status = LoadStatus::Success;
                    state.cases = cases.clone();
                    state.tracks = tracks;
                    state.error = None;
                    state.revision += 1;
                }

                tracing::info!("Loaded {count} cases");
                self.notifier.notify(Notification::success(
                    "Data loaded",
                    format!("{count} cases loaded"),
                ));
                Ok(cases)
            }
            Err(error) => {
                tracing::warn!("{error}");
                {
                    let mut state = self.write_state();
                    state.status = LoadStatus::Error;
                    state.error = Some(error.clone());
                }

                self.notifier.notify(Notification::failure(
                    error.display_name(),
                    error.display_message(),
                ));
                Err(error)
            }
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.read_state().status
    }

    pub fn cases(&self) -> Arc<Vec<CaseRecord>> {
        self.read_state().cases.clone()
    }

    pub fn tracks(&self) -> Vec<TrackName> {
        self.read_state().tracks.clone()
    }

    pub fn error(&self) -> Option<LoadError> {
        self.read_state().error.clone()
    }

    pub fn revision(&self) -> u64 {
        self.read_state().revision
    }

    pub fn snapshot(&self) -> LoaderState {
        self.read_state().clone()
    }
}
impl<S: CaseSource> Loader<S> {
    async fn fetch(&self) -> Result<(Vec<CaseRecord>, Vec<TrackName>), LoadError> {
        let cases = self
            .source
            .fetch_cases()
            .await
            .map_err(|e| LoadError::FetchCasesFailed {
                error: e.to_string(),
            })?;

        let tracks = match cases.first() {
            Some(first) => self.source.fetch_tracks(first.id).await.map_err(|e| {
                LoadError::FetchTracksFailed {
                    case_id: first.id,
                    error: e.to_string(),
                }
            })?,
            None => vec![],
        };

        Ok((cases, tracks))
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LoaderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, LoaderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}
