use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult};

/// Clinical information for a case, as the server reports it.
///
/// The server stores these as free-form strings; parsing them into numbers is
/// left to the consumer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClinicalInfo {
    /// The case ID, as a string
    pub caseid: String,
    /// The patient's age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// The patient's sex (`M` or `F`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// The patient's height in centimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// The patient's weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// The patient's body mass index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<String>,
    /// The ASA physical status classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asa: Option<String>,
    /// The surgical department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// The diagnosis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dx: Option<String>,
    /// The name of the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opname: Option<String>,
}

/// Case-related endpoints.
impl Client {
    /// Get the IDs of every case the server has data for, in ascending order.
    pub async fn cases(&self) -> ClientResult<Vec<u32>> {
        #[derive(Deserialize)]
        struct CasesResponse {
            cases: Vec<u32>,
        }

        Ok(self.request::<CasesResponse>("cases", &[]).await?.cases)
    }

    /// Get the clinical information for a case.
    pub async fn clinical_info(&self, case_id: u32) -> ClientResult<ClinicalInfo> {
        self.request::<ClinicalInfo>(&format!("case/{case_id}/clinical-info"), &[])
            .await
    }
}
