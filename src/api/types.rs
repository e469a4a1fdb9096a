//! Wire types for the CMVP JSON API.
//!
//! The API publishes three module collections plus a metadata document as
//! static JSON. Field names follow the upstream payloads, including the
//! space-separated keys on the validated-module records.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Metadata document describing the published dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub total_modules: u64,
    #[serde(default)]
    pub total_historical_modules: u64,
    #[serde(default)]
    pub total_modules_in_process: u64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub version: String,
}

/// One validated (active or historical) module as published by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleJson {
    #[serde(default, rename = "Certificate Number")]
    pub certificate_number: String,
    #[serde(default, rename = "Certificate Number_url")]
    pub certificate_number_url: String,
    #[serde(default, rename = "Vendor Name")]
    pub vendor_name: String,
    #[serde(default, rename = "Module Name")]
    pub module_name: String,
    #[serde(default, rename = "Module Type")]
    pub module_type: String,
    #[serde(default, rename = "Validation Date")]
    pub validation_date: String,

    // Extended fields from certificate detail extraction.
    #[serde(default)]
    pub standard: String,
    /// Published as either a number or a string; unparseable values
    /// recover to zero rather than failing the whole fetch.
    #[serde(default, deserialize_with = "level_lenient")]
    pub overall_level: u8,
    #[serde(default)]
    pub sunset_date: String,
    #[serde(default)]
    pub caveat: String,
    #[serde(default)]
    pub embodiment: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lab: String,
    #[serde(default)]
    pub algorithms: Vec<String>,
    #[serde(default)]
    pub algorithms_detailed: Vec<String>,
    #[serde(default)]
    pub security_policy_url: String,
}

/// One in-process module. The in-process list carries a reduced shape:
/// no certificate, no dates, and the standard doubles as the module type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InProcessModuleJson {
    #[serde(default, rename = "Module Name")]
    pub module_name: String,
    #[serde(default, rename = "Vendor Name")]
    pub vendor_name: String,
    #[serde(default, rename = "Standard")]
    pub standard: String,
    #[serde(default, rename = "Status")]
    pub status: String,
}

/// Envelope for the active and historical module endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModulesResponse {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub modules: Vec<ModuleJson>,
}

/// Envelope for the in-process module endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InProcessModulesResponse {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub modules: Vec<InProcessModuleJson>,
}

/// Accept `2`, `"2"`, or anything else (as zero) for the overall level.
fn level_lenient<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => u8::try_from(n.as_u64().unwrap_or(0)).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_validated_module_with_numeric_level() {
        let raw = r#"{
            "Certificate Number": "4782",
            "Certificate Number_url": "https://example.test/cert/4782",
            "Vendor Name": "Acme Corp",
            "Module Name": "Acme Crypto Module",
            "Module Type": "Software",
            "Validation Date": "03/14/2023",
            "standard": "FIPS 140-3",
            "overall_level": 2,
            "caveat": "Export restricted",
            "lab": "ACME LABS",
            "algorithms": ["AES", "SHS"]
        }"#;
        let module: ModuleJson = serde_json::from_str(raw).unwrap();
        assert_eq!(module.certificate_number, "4782");
        assert_eq!(module.overall_level, 2);
        assert_eq!(module.algorithms, vec!["AES", "SHS"]);
        assert!(module.algorithms_detailed.is_empty());
    }

    #[test]
    fn decodes_string_level() {
        let module: ModuleJson =
            serde_json::from_str(r#"{"Module Name": "M", "overall_level": "3"}"#).unwrap();
        assert_eq!(module.overall_level, 3);
    }

    #[test]
    fn unparseable_level_recovers_to_zero() {
        let module: ModuleJson =
            serde_json::from_str(r#"{"Module Name": "M", "overall_level": "N/A"}"#).unwrap();
        assert_eq!(module.overall_level, 0);

        let module: ModuleJson =
            serde_json::from_str(r#"{"Module Name": "M", "overall_level": null}"#).unwrap();
        assert_eq!(module.overall_level, 0);
    }

    #[test]
    fn decodes_in_process_module() {
        let raw = r#"{
            "Module Name": "Pending Module",
            "Vendor Name": "Acme Corp",
            "Standard": "FIPS 140-3",
            "Status": "Review Pending"
        }"#;
        let module: InProcessModuleJson = serde_json::from_str(raw).unwrap();
        assert_eq!(module.module_name, "Pending Module");
        assert_eq!(module.standard, "FIPS 140-3");
    }

    #[test]
    fn decodes_response_envelope_without_metadata() {
        let response: ModulesResponse =
            serde_json::from_str(r#"{"modules": [{"Module Name": "M"}]}"#).unwrap();
        assert_eq!(response.modules.len(), 1);
        assert_eq!(response.metadata.total_modules, 0);
    }

    #[test]
    fn decodes_metadata() {
        let raw = r#"{
            "generated_at": "2025-01-01T00:00:00Z",
            "total_modules": 1200,
            "total_historical_modules": 3400,
            "total_modules_in_process": 150,
            "source": "NIST CMVP",
            "version": "1.0"
        }"#;
        let metadata: Metadata = serde_json::from_str(raw).unwrap();
        assert_eq!(metadata.total_modules, 1200);
        assert_eq!(metadata.total_modules_in_process, 150);
    }
}
