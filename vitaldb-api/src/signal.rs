use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult};

/// The name of the time column in [`CaseData::data`] rows.
pub const TIME_COLUMN: &str = "time";

/// One sample row: the `time` column plus one entry per requested signal.
/// Missing or non-finite samples are `None`.
pub type DataPoint = HashMap<String, Option<f64>>;

/// A request to the `data` endpoint.
#[derive(Debug, Clone, Default)]
pub struct DataRequest {
    /// The signals to return. Empty means every signal.
    pub signals: Vec<String>,
    /// Only return samples at or after this time, in seconds.
    pub start_time: Option<f64>,
    /// Only return samples at or before this time, in seconds.
    pub end_time: Option<f64>,
    /// The maximum number of points to return. The server downsamples evenly
    /// when there are more; it defaults to 500.
    pub resolution: Option<u32>,
}

/// Signal samples for a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseData {
    /// The sample rows, in time order.
    pub data: Vec<DataPoint>,
    /// Information about the returned range.
    pub meta: DataMeta,
}

/// Information about the range returned by the `data` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataMeta {
    /// The number of points before downsampling.
    pub original_points: u64,
    /// The number of points returned.
    pub returned_points: u64,
    /// The time of the first returned point.
    #[serde(default)]
    pub start_time: Option<f64>,
    /// The time of the last returned point.
    #[serde(default)]
    pub end_time: Option<f64>,
    /// Set when the server could not satisfy the request, e.g. no valid signals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Summary statistics for one signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignalStatistics {
    /// The minimum sample
    pub min: Option<f64>,
    /// The maximum sample
    pub max: Option<f64>,
    /// The mean of the samples
    pub mean: Option<f64>,
    /// The standard deviation of the samples
    pub std: Option<f64>,
    /// The number of present samples
    pub count: u64,
    /// The number of missing samples
    pub missing: u64,
}

/// Signal-related endpoints.
impl Client {
    /// Get the names of the signals (tracks) recorded for a case.
    pub async fn signals(&self, case_id: u32) -> ClientResult<Vec<String>> {
        #[derive(Deserialize)]
        struct SignalsResponse {
            signals: Vec<String>,
        }

        Ok(self
            .request::<SignalsResponse>(&format!("case/{case_id}/signals"), &[])
            .await?
            .signals)
    }

    /// Get signal samples for a case.
    pub async fn case_data(&self, case_id: u32, request: &DataRequest) -> ClientResult<CaseData> {
        let mut parameters = vec![];
        for signal in &request.signals {
            parameters.push(("signals", signal.clone()));
        }
        if let Some(start_time) = request.start_time {
            parameters.push(("start_time", start_time.to_string()));
        }
        if let Some(end_time) = request.end_time {
            parameters.push(("end_time", end_time.to_string()));
        }
        if let Some(resolution) = request.resolution {
            parameters.push(("resolution", resolution.to_string()));
        }

        self.request::<CaseData>(&format!("case/{case_id}/data"), &parameters)
            .await
    }

    /// Get summary statistics for the given signals of a case. An empty
    /// `signals` returns statistics for every signal.
    pub async fn statistics(
        &self,
        case_id: u32,
        signals: &[String],
        start_time: Option<f64>,
        end_time: Option<f64>,
    ) -> ClientResult<BTreeMap<String, SignalStatistics>> {
        let mut parameters = vec![];
        for signal in signals {
            parameters.push(("signals", signal.clone()));
        }
        if let Some(start_time) = start_time {
            parameters.push(("start_time", start_time.to_string()));
        }
        if let Some(end_time) = end_time {
            parameters.push(("end_time", end_time.to_string()));
        }

        #[derive(Deserialize)]
        struct StatisticsResponse {
            statistics: BTreeMap<String, SignalStatistics>,
        }

        Ok(self
            .request::<StatisticsResponse>(&format!("case/{case_id}/statistics"), &parameters)
            .await?
            .statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_data_keeps_null_samples() {
        let body = r#"{
            "data": [
                {"time": 0, "Solar8000/HR": 72.0, "BIS/BIS": null},
                {"time": 5, "Solar8000/HR": 74.0, "BIS/BIS": 45.0}
            ],
            "meta": {"original_points": 1440, "returned_points": 2, "start_time": 0, "end_time": 5}
        }"#;
        let data: CaseData = serde_json::from_str(body).unwrap();
        assert_eq!(data.data.len(), 2);
        assert_eq!(data.data[0]["BIS/BIS"], None);
        assert_eq!(data.data[1][TIME_COLUMN], Some(5.0));
        assert_eq!(data.meta.original_points, 1440);
        assert_eq!(data.meta.message, None);
    }

    #[test]
    fn empty_statistics_have_no_values() {
        let stats: SignalStatistics = serde_json::from_str(
            r#"{"min": null, "max": null, "mean": null, "std": null, "count": 0, "missing": 12}"#,
        )
        .unwrap();
        assert_eq!(stats.min, None);
        assert_eq!(stats.missing, 12);
    }
}
