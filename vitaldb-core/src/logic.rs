use vitaldb_state::CaseId;

use crate::{
    loader::{CaseSource, LoadError, LoadStatus, Loader},
    notification::Notifier,
    table::TableController,
    tokio_thread::TokioThread,
    tracks::{TrackSelection, viewer_query},
    url_sync::Location,
};

/// Ties a loader running on a background runtime to the synchronous table.
///
/// Front ends call [`Logic::tick`] once per frame (or whenever they poll) to
/// pick up the result of the latest load.
pub struct Logic<S, L> {
    tokio: TokioThread,
    loader: Loader<S>,
    table: TableController<L>,
    tracks: TrackSelection,
    adopted_revision: u64,
}

pub struct LogicArgs<S, L> {
    pub source: S,
    pub location: L,
    pub notifier: Notifier,
}

impl<S: CaseSource, L: Location> Logic<S, L> {
    /// Starts the background runtime and kicks off the first load.
    pub fn new(
        LogicArgs {
            source,
            location,
            notifier,
        }: LogicArgs<S, L>,
    ) -> std::io::Result<Self> {
        let logic = Self {
            tokio: TokioThread::new()?,
            loader: Loader::new(source, notifier),
            table: TableController::new(location),
            tracks: TrackSelection::default(),
            adopted_revision: 0,
        };
        logic.refresh();
        Ok(logic)
    }

    /// Reloads the collection in the background.
    pub fn refresh(&self) {
        let loader = self.loader.clone();
        self.tokio.spawn(async move {
            // The outcome lands in the loader state.
            let _ = loader.load().await;
        });
    }

    /// Adopts the most recently loaded collection, if there's one the table
    /// hasn't seen. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        let state = self.loader.snapshot();
        if state.revision == self.adopted_revision {
            return false;
        }

        self.adopted_revision = state.revision;
        self.table.set_collection(state.cases);
        self.tracks = TrackSelection::new(state.tracks);
        true
    }

    pub fn status(&self) -> LoadStatus {
        self.loader.status()
    }

    pub fn is_loading(&self) -> bool {
        self.status() == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<LoadError> {
        self.loader.error()
    }

    pub fn table(&self) -> &TableController<L> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableController<L> {
        &mut self.table
    }

    pub fn tracks(&self) -> &TrackSelection {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut TrackSelection {
        &mut self.tracks
    }

    /// The viewer link for `case_id` with the currently selected tracks.
    pub fn viewer_query(&self, case_id: CaseId) -> String {
        viewer_query(case_id, self.tracks.selected())
    }
}
