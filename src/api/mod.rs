//! CMVP API access: wire types and the blocking HTTP client.

pub mod client;
pub mod types;

pub use client::{ApiError, Client, BASE_URL, DEFAULT_TIMEOUT};
pub use types::{
    InProcessModuleJson, InProcessModulesResponse, Metadata, ModuleJson, ModulesResponse,
};
