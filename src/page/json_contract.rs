use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};
use crate::page::Page;

pub const PAGE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageJsonContractV1 {
    pub schema_version: u32,
    pub page: Page,
}

impl Page {
    pub fn to_json_contract_v1_pretty(&self) -> LabResult<String> {
        let payload = PageJsonContractV1 {
            schema_version: PAGE_JSON_SCHEMA_V1,
            page: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| LabError::InvalidData(format!("failed to serialize page contract v1: {e}")))
    }

    /// Accepts either a bare page or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> LabResult<Self> {
        if let Ok(page) = serde_json::from_str::<Page>(input) {
            return Ok(page);
        }
        let payload: PageJsonContractV1 = serde_json::from_str(input)
            .map_err(|e| LabError::InvalidData(format!("failed to parse page json payload: {e}")))?;
        if payload.schema_version != PAGE_JSON_SCHEMA_V1 {
            return Err(LabError::InvalidData(format!(
                "unsupported page schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.page)
    }
}
