use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mongodb: MongoDbConfig,
    pub llm: LlmConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(skip)]
    pub admin: Option<AdminCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Alternate Gemini endpoint (proxies, local mocks)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl From<LlmConfig> for pana_types::LLMConfig {
    fn from(config: LlmConfig) -> Self {
        Self {
            model: config.model,
            temperature: config.temperature,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Docusaurus site root; `docs/` and `src/` live directly under it
    pub project_root: PathBuf,
    pub summary_dir: PathBuf,
    #[serde(default = "default_index_ttl")]
    pub index_ttl_secs: u64,
}

fn default_index_ttl() -> u64 {
    300
}

impl ContentConfig {
    /// Summary cache directory, relative paths resolved against the project root
    pub fn summary_path(&self) -> PathBuf {
        self.project_root.join(&self.summary_dir)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Credentials guarding the admin endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn section(prefix: &str) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("__")
        .separator("__")
        .keep_prefix(true)
        .try_parsing(true)
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables such as `SERVER__PORT` or `CONTENT__PROJECT_ROOT`,
    ///    plus `LOG_LEVEL` and `LOG_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(section("SERVER"))
            .add_source(
                section("CORS")
                    .list_separator(",")
                    .with_list_parse_key("cors.origins"),
            )
            .add_source(section("MONGODB"))
            .add_source(section("LLM"))
            .add_source(section("CONTENT"))
            .set_override_option("logging.level", std::env::var("LOG_LEVEL").ok())?
            .set_override_option("logging.format", std::env::var("LOG_FORMAT").ok())?;

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
            ConfigError::Message("MONGODB_URI environment variable is required".to_string())
        })?;
        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ConfigError::Message("GEMINI_API_KEY environment variable is required".to_string())
        })?;
        cfg.admin = admin_from_env();

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    pub fn with_admin(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = Some(AdminCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }
}

fn admin_from_env() -> Option<AdminCredentials> {
    let username = std::env::var("ADMIN_USERNAME").ok().filter(|u| !u.is_empty())?;
    let password = std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty())?;
    Some(AdminCredentials { username, password })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3001

        [cors]
        enabled = true
        origins = ["http://localhost:3000"]

        [mongodb]
        database = "test"

        [llm]
        model = "gemini-2.0-flash"

        [content]
        project_root = "/srv/book"
        summary_dir = "summary"

        [logging]
        level = "debug"
        format = "json"
    "#;

    #[test]
    fn test_config_structure() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.request_timeout_secs, 300);
        assert_eq!(config.mongodb.database, "test");
        assert_eq!(config.content.index_ttl_secs, 300);
        assert!(config.llm.temperature.is_none());
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_summary_path_resolution() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.content.summary_path(), PathBuf::from("/srv/book/summary"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pana.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.cors.origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_admin_password_is_redacted() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let config = config.with_admin("root", "hunter2");
        assert!(!format!("{:?}", config.admin).contains("hunter2"));
    }

    #[test]
    fn test_llm_section_converts() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let llm: pana_types::LLMConfig = config.llm.into();
        assert_eq!(llm.model, "gemini-2.0-flash");
        assert!(llm.max_tokens.is_none());
    }
}
