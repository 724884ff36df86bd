use serde::{Deserialize, Deserializer, Serialize};

/// Main configuration structure for taskdeck
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Identity provider / auth gate configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Remote metadata document configuration
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            metadata: MetadataConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally-advertised base URL of this service
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_public_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: default_public_url(),
        }
    }
}

/// Identity provider / auth gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthConfig {
    /// Process-wide auth gate. When false every caller shares one task
    /// collection and the identity provider is never consulted.
    #[serde(default = "default_auth_enabled")]
    pub enabled: bool,

    /// Base URL of the identity provider's auth API
    #[serde(default = "default_auth_base_url")]
    pub base_url: String,

    /// Path of the session-verification endpoint, relative to `base_url`
    #[serde(default = "default_session_path")]
    pub session_path: String,

    /// Deadline for a single session-verification call, in seconds
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,
}

const fn default_auth_enabled() -> bool {
    true
}

fn default_auth_base_url() -> String {
    "http://localhost:3001/api/auth".to_string()
}

fn default_session_path() -> String {
    "/session".to_string()
}

const fn default_session_timeout_secs() -> u64 {
    5
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: default_auth_enabled(),
            base_url: default_auth_base_url(),
            session_path: default_session_path(),
            session_timeout_secs: default_session_timeout_secs(),
        }
    }
}

impl AuthConfig {
    /// Full URL of the session-verification endpoint.
    pub fn session_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.session_path)
    }
}

/// Remote metadata document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetadataConfig {
    /// URL of the remote MCP metadata document
    #[serde(default = "default_mcp_url")]
    pub mcp_url: String,

    /// URL of the OAuth authorization-server discovery document
    #[serde(default = "default_oauth_discovery_url")]
    pub oauth_discovery_url: String,

    /// Deadline for a single metadata fetch, in seconds
    #[serde(default = "default_metadata_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a fetched document stays fresh, in seconds
    #[serde(default = "default_metadata_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_mcp_url() -> String {
    "http://localhost:3001/mcp".to_string()
}

fn default_oauth_discovery_url() -> String {
    "http://localhost:3001/.well-known/oauth-authorization-server".to_string()
}

const fn default_metadata_timeout_secs() -> u64 {
    10
}

const fn default_metadata_ttl_secs() -> u64 {
    300
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            mcp_url: default_mcp_url(),
            oauth_discovery_url: default_oauth_discovery_url(),
            timeout_secs: default_metadata_timeout_secs(),
            ttl_secs: default_metadata_ttl_secs(),
        }
    }
}

/// Cross-origin policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CorsConfig {
    /// Origins allowed to make credentialed cross-origin requests.
    ///
    /// Accepts either a list or a single comma-separated string, so
    /// `TASKDECK_CORS__TRUSTED_ORIGINS=https://a.example,https://b.example`
    /// works from the environment.
    #[serde(default, deserialize_with = "de_origin_list")]
    pub trusted_origins: Vec<String>,
}

fn de_origin_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OriginList {
        List(Vec<String>),
        Csv(String),
    }

    let origins = match OriginList::deserialize(deserializer)? {
        OriginList::List(list) => list,
        OriginList::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };
    Ok(origins
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect())
}
