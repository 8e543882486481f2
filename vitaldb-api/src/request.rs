use serde::{Deserialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult};

/// Making requests to the VitalDB API.
impl Client {
    /// Make a GET request to `/api/{endpoint}`. `T` is the full JSON body of the
    /// response: for `cases`, `T` should be `{ cases: Vec<u32> }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the response is not valid.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self
            .client
            .get(format!("{}/api/{endpoint}", self.base_url))
            .query(parameters)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        Self::parse_response::<T>(status, &bytes)
    }

    pub(crate) fn parse_response<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> ClientResult<T> {
        if !(200..300).contains(&status) {
            return Err(ClientError::Status {
                status,
                detail: serde_json::from_slice::<ErrorBody>(bytes)
                    .ok()
                    .map(|body| body.detail),
            });
        }

        Ok(serde_json::from_slice(bytes)?)
    }
}

/// The body FastAPI sends alongside an `HTTPException`.
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    detail: String,
}
