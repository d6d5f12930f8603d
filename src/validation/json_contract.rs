use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

use super::ValidationReport;

pub const VALIDATION_REPORT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReportJsonContractV1 {
    pub schema_version: u32,
    pub report: ValidationReport,
}

impl ValidationReport {
    pub fn to_json_pretty(&self) -> RulesResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            RulesError::InvalidData(format!("failed to serialize validation report json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> RulesResult<String> {
        let payload = ValidationReportJsonContractV1 {
            schema_version: VALIDATION_REPORT_JSON_SCHEMA_V1,
            report: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            RulesError::InvalidData(format!(
                "failed to serialize validation report contract v1: {e}"
            ))
        })
    }

    /// Parses either a bare report or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> RulesResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            RulesError::InvalidData(format!("failed to parse validation report json payload: {e}"))
        })?;
        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                RulesError::InvalidData(format!("failed to parse validation report json: {e}"))
            });
        }
        let payload: ValidationReportJsonContractV1 =
            serde_json::from_value(value).map_err(|e| {
                RulesError::InvalidData(format!(
                    "failed to parse validation report contract v1: {e}"
                ))
            })?;
        if payload.schema_version != VALIDATION_REPORT_JSON_SCHEMA_V1 {
            return Err(RulesError::InvalidData(format!(
                "unsupported validation report schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.report)
    }
}
