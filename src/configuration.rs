use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub record_store: RecordStoreSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Show downstream and internal error text to callers.
    /// Only meant for local development.
    pub expose_error_details: bool,
    pub cors_allowed_origin: String,
    /// Largest accepted waitlist submission body.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_body_bytes: usize,
}

#[derive(serde::Deserialize, Clone)]
pub struct RecordStoreSettings {
    pub base_url: String,
    pub base_id: String,
    pub table_name: String,
    pub access_token: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl RecordStoreSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Reads `APP_ENVIRONMENT` to pick the environment layer.
/// Falls back to `production` when it is not set.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "production".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    get_configuration_for(environment)
}

pub fn get_configuration_for(environment: Environment) -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_RECORD_STORE__ACCESS_TOKEN=pat123` would set `Settings.record_store.access_token`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
