//! HTTP listener and cross-origin settings

use serde::{Deserialize, Serialize};

/// Port the profile API has always listened on
pub const DEFAULT_PORT: u16 = 1323;

const DEFAULT_METHODS: [&str; 4] = ["GET", "POST", "PUT", "OPTIONS"];
const DEFAULT_HEADERS: [&str; 3] = ["Content-Type", "Authorization", "Accept"];

/// actix `HttpServer` settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// 0 keeps actix's default of one worker per core
    pub workers: usize,

    /// Seconds an idle keep-alive connection stays open
    pub keep_alive: u64,

    /// Seconds a client has to deliver the request head
    pub request_timeout: u64,

    /// Largest accepted JSON body in bytes
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            workers: 0,
            keep_alive: 75,
            request_timeout: 30,
            // profile bodies are a name, a phone number and a password
            max_payload_size: 16 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cross-origin policy for browser clients
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// When false every cross-origin request is refused
    pub enabled: bool,

    /// Exact origins; a `"*"` entry accepts any
    pub allowed_origins: Vec<String>,

    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,

    /// Preflight cache lifetime in seconds
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
            allowed_methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
            allowed_headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
            allow_credentials: false,
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    /// Any origin, for local front-end work
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            ..Self::default()
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
