use config::{Config, ConfigError, Environment as ConfigEnvironment};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub keycloak: KeycloakSettings,
    #[serde(default)]
    pub clementine: ClementineSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(
        default = "default_application_port",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub port: u16,
    #[serde(default = "default_application_host")]
    pub host: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            port: default_application_port(),
            host: default_application_host(),
        }
    }
}

/// Identity-provider settings. `enabled = false` turns both token
/// verification and the authorization gate off.
#[derive(serde::Deserialize, Clone)]
pub struct KeycloakSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub host: String,
    #[serde(
        default = "default_keycloak_port",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub port: u16,
    #[serde(default)]
    pub realm: String,
    #[serde(default)]
    pub client_id: String,
}

impl Default for KeycloakSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: default_keycloak_port(),
            realm: String::new(),
            client_id: String::new(),
        }
    }
}

impl KeycloakSettings {
    pub fn userinfo_endpoint(&self) -> String {
        format!(
            "{}:{}/auth/realms/{}/protocol/openid-connect/userinfo",
            self.host, self.port, self.realm
        )
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct ClementineSettings {
    #[serde(default = "default_clementine_host")]
    pub host: String,
    #[serde(
        default = "default_clementine_port",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub port: u16,
}

impl ClementineSettings {
    pub fn url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ClementineSettings {
    fn default() -> Self {
        Self {
            host: default_clementine_host(),
            port: default_clementine_port(),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_application_port() -> u16 {
    3000
}

fn default_application_host() -> String {
    "0.0.0.0".to_string()
}

fn default_keycloak_port() -> u16 {
    8080
}

fn default_clementine_host() -> String {
    "http://localhost".to_string()
}

fn default_clementine_port() -> u16 {
    3141
}

fn default_database_url() -> String {
    "sqlite:maeve.db".to_string()
}

/// Collects the environment into an immutable `Settings`, read once at
/// startup. Variables use the `ABOTKIT_MAEVE` prefix with `__` separating
/// sections, e.g. `ABOTKIT_MAEVE_KEYCLOAK__REALM`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        .add_source(
            ConfigEnvironment::with_prefix("ABOTKIT_MAEVE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
