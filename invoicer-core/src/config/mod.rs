use crate::error::AppError;
use crate::models::PartyInfo;
use serde::Deserialize;
use std::path::PathBuf;

/// Application settings, layered from `config/base.yaml` (optional) and
/// `APP_`-prefixed environment variables.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub company: CompanyDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Inputs for document rendering that do not come from the form session.
#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    /// Label prefixed to every money value, e.g. `PKR 1,234.50`.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Logo image to embed at the top of the invoice. Missing or unreadable
    /// files are tolerated; the document is produced without the image.
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            logo_path: default_logo_path(),
        }
    }
}

fn default_currency() -> String {
    "PKR".to_string()
}

fn default_logo_path() -> PathBuf {
    PathBuf::from("assets/logo.jpg")
}

/// Company block pre-filled into a fresh session. All fields are free text
/// and remain editable through the form.
#[derive(Debug, Deserialize, Clone)]
pub struct CompanyDefaults {
    #[serde(default = "default_company_name")]
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

impl Default for CompanyDefaults {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            website: None,
        }
    }
}

fn default_company_name() -> String {
    "My Company".to_string()
}

impl CompanyDefaults {
    pub fn party_info(&self) -> PartyInfo {
        PartyInfo {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/base").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
