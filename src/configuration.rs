use std::{path::Path, time::Duration};

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub google: GoogleSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Credentials and endpoint for the Google Programmable Search (custom search) API.
#[derive(Deserialize, Clone, Debug)]
pub struct GoogleSettings {
    pub api_key: String,
    pub search_engine_id: String,
    pub base_url: String,
    pub site: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl GoogleSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        let required = [
            ("google.api_key (GOOGLE_API_KEY)", &self.api_key),
            ("google.search_engine_id (GOOGLE_CSE_ID)", &self.search_engine_id),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(config::ConfigError::Message(format!(
                "{} must not be empty",
                name
            ))),
            None => Ok(()),
        }
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");

    load_settings(
        &configuration_directory,
        &environment,
        std::env::var("GOOGLE_API_KEY").ok(),
        std::env::var("GOOGLE_CSE_ID").ok(),
    )
}

/// Layers the yaml files, `APP_*` variables and the google credentials, then rejects
/// settings the search api would refuse on every request.
fn load_settings(
    configuration_directory: &Path,
    environment: &Environment,
    api_key: Option<String>,
    search_engine_id: Option<String>,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment.as_str());

    // GOOGLE_API_KEY / GOOGLE_CSE_ID win over everything else
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("google.api_key", api_key)?
        .set_override_option("google.search_engine_id", search_engine_id)?
        .build()?
        .try_deserialize::<Settings>()?;

    settings.google.validate()?;

    Ok(settings)
}
