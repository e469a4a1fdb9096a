//! HTTP client for the CMVP JSON API.
//!
//! The dataset is published as static JSON in three collections: validated
//! modules, historical modules, and modules still in process. A fetch merges
//! all three into one ordered sequence, stamping the lifecycle status per
//! collection. Any transport or decode error fails the whole fetch; there is
//! no partial result.

use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{InProcessModulesResponse, Metadata, ModulesResponse};
use super::{InProcessModuleJson, ModuleJson};
use crate::model::{Module, ModuleStatus};

/// Default base URL of the published dataset.
pub const BASE_URL: &str = "https://ethanolivertroy.github.io/NIST-CMVP-API/api";

const MODULES_ENDPOINT: &str = "/modules.json";
const HISTORICAL_ENDPOINT: &str = "/historical-modules.json";
const IN_PROCESS_ENDPOINT: &str = "/modules-in-process.json";
const METADATA_ENDPOINT: &str = "/metadata.json";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A dataset failed to transport or to parse as the expected shape.
    #[error("fetching {dataset}: {source}")]
    Fetch {
        dataset: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Blocking HTTP client for the CMVP API.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Client {
    /// Create a client against the default base URL.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client against a custom base URL with the given timeout.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// The base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all three module collections and merge them in order:
    /// active, historical, in-process.
    pub fn fetch_all(&self) -> Result<Vec<Module>, ApiError> {
        let mut all = self.fetch_validated(MODULES_ENDPOINT, ModuleStatus::Active, "active modules")?;
        all.extend(self.fetch_validated(
            HISTORICAL_ENDPOINT,
            ModuleStatus::Historical,
            "historical modules",
        )?);
        all.extend(self.fetch_in_process()?);
        log::info!("Fetched {} modules from {}", all.len(), self.base_url);
        Ok(all)
    }

    /// Fetch the dataset metadata document.
    pub fn fetch_metadata(&self) -> Result<Metadata, ApiError> {
        self.get_json(METADATA_ENDPOINT, "metadata")
    }

    fn fetch_validated(
        &self,
        endpoint: &str,
        status: ModuleStatus,
        dataset: &'static str,
    ) -> Result<Vec<Module>, ApiError> {
        let response: ModulesResponse = self.get_json(endpoint, dataset)?;
        log::debug!("{dataset}: {} records", response.modules.len());
        Ok(response
            .modules
            .into_iter()
            .map(|m| map_module(m, status))
            .collect())
    }

    fn fetch_in_process(&self) -> Result<Vec<Module>, ApiError> {
        let response: InProcessModulesResponse =
            self.get_json(IN_PROCESS_ENDPOINT, "in-process modules")?;
        log::debug!("in-process modules: {} records", response.modules.len());
        Ok(response.modules.into_iter().map(map_in_process).collect())
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        dataset: &'static str,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("GET {url}");
        self.http
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|source| ApiError::Fetch { dataset, source })
    }
}

/// Map a validated-module record, stamping the collection's status.
pub(crate) fn map_module(json: ModuleJson, status: ModuleStatus) -> Module {
    Module {
        certificate_number: json.certificate_number,
        certificate_url: json.certificate_number_url,
        vendor_name: json.vendor_name,
        module_name: json.module_name,
        module_type: json.module_type,
        validation_date: parse_date(&json.validation_date),
        status,
        standard: json.standard,
        overall_level: json.overall_level,
        sunset_date: json.sunset_date,
        caveat: json.caveat,
        embodiment: json.embodiment,
        description: json.description,
        lab: json.lab,
        algorithms: json.algorithms,
        algorithms_detailed: json.algorithms_detailed,
        security_policy_url: json.security_policy_url,
    }
}

/// Map an in-process record. No certificate has been issued yet, so the
/// certificate fields stay empty and the date stays the sentinel; the
/// published standard doubles as the module type.
pub(crate) fn map_in_process(json: InProcessModuleJson) -> Module {
    Module {
        vendor_name: json.vendor_name,
        module_name: json.module_name,
        module_type: json.standard,
        status: ModuleStatus::InProcess,
        ..Module::default()
    }
}

/// Parse an MM/DD/YYYY date string. Empty or unparseable input resolves to
/// the `None` sentinel rather than an error.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}
