use url::form_urlencoded;

use vitaldb_state::{CaseId, TrackName};

/// Which of the available tracks should be opened in the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSelection {
    available: Vec<TrackName>,
    selected: Vec<TrackName>,
}
impl TrackSelection {
    /// Starts with whichever of [`TrackName::DEFAULTS`] are available.
    pub fn new(available: Vec<TrackName>) -> Self {
        let selected = TrackName::DEFAULTS
            .iter()
            .map(|name| TrackName::new(name))
            .filter(|track| available.contains(track))
            .collect();
        Self {
            available,
            selected,
        }
    }

    pub fn available(&self) -> &[TrackName] {
        &self.available
    }

    /// In the order they were selected.
    pub fn selected(&self) -> &[TrackName] {
        &self.selected
    }

    pub fn is_selected(&self, track: &TrackName) -> bool {
        self.selected.contains(track)
    }

    pub fn all_selected(&self) -> bool {
        self.selected.len() == self.available.len()
    }

    /// Unavailable tracks are ignored.
    pub fn toggle(&mut self, track: &TrackName) {
        if let Some(idx) = self.selected.iter().position(|t| t == track) {
            self.selected.remove(idx);
        } else if self.available.contains(track) {
            self.selected.push(track.clone());
        } else {
            tracing::debug!("ignoring unavailable track {track}");
        }
    }

    /// Selects every track, or none if they all are.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.available.clone();
        }
    }
}

/// The query string that opens `case_id` in the viewer with `tracks` shown.
pub fn viewer_query(case_id: CaseId, tracks: &[TrackName]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("caseid", &case_id.to_string());
    if !tracks.is_empty() {
        let joined = tracks
            .iter()
            .map(TrackName::as_str)
            .collect::<Vec<_>>()
            .join(",");
        serializer.append_pair("tracks", &joined);
    }
    serializer.finish()
}
