//! Representations of the case browser's state, as well as a way to retrieve it from a VitalDB server.
//!
//! Separated out to allow for use in other utilities.
#![deny(missing_docs)]

use futures::{StreamExt as _, stream};

pub use vitaldb_api as api;

mod case;
pub use case::{CaseId, CaseRecord, Sex};

mod collation;
pub use collation::TextCollator;

mod field;
pub use field::{Field, FieldValue};

mod track;
pub use track::TrackName;

/// Fetches every case and its clinical info from the server.
///
/// Clinical info is requested for up to `concurrency` cases at a time.
/// `on_cases_fetched` is called after each case with the number of cases
/// fetched so far and the total number of cases. The result is ordered by
/// case ID, with duplicate IDs removed.
pub async fn fetch_all(
    client: &api::Client,
    concurrency: usize,
    on_cases_fetched: impl Fn(usize, usize),
) -> api::ClientResult<Vec<CaseRecord>> {
    let case_ids = client.cases().await?;
    let total = case_ids.len();

    let mut infos = stream::iter(case_ids)
        .map(|id| async move {
            client
                .clinical_info(id)
                .await
                .map(|info| CaseRecord::from_clinical_info(CaseId(id), info))
        })
        .buffered(concurrency.max(1));

    let mut records = Vec::with_capacity(total);
    while let Some(record) = infos.next().await {
        records.push(record?);
        on_cases_fetched(records.len(), total);
    }

    records.sort_by_key(|r| r.id);
    records.dedup_by_key(|r| r.id);
    Ok(records)
}

/// Fetches the names of the tracks recorded for a case.
pub async fn fetch_tracks(client: &api::Client, case_id: CaseId) -> api::ClientResult<Vec<TrackName>> {
    Ok(client
        .signals(case_id.0)
        .await?
        .into_iter()
        .filter(|name| name != api::TIME_COLUMN)
        .map(TrackName::new)
        .collect())
}
