//! Party (company / client) model.

use serde::{Deserialize, Serialize};

/// Name and contact block, used for both the issuing company and the billed
/// client. All fields are free text; only the client name gates document
/// generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
}
