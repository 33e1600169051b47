use std::env;

use crate::client::SupabaseConfig;
use crate::common::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Supabase,
    /// Local development without the hosted service.
    Memory { email: String, password: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: String,
    pub cookie_secure: bool,
    pub backend: Backend,
    pub supabase: Option<SupabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source; blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let static_dir = get("STATIC_DIR").unwrap_or_else(|| "./static".to_string());

        let cookie_secure = match get("COOKIE_SECURE") {
            None => true,
            Some(raw) => raw.parse::<bool>().map_err(|e| ConfigError::Invalid {
                name: "COOKIE_SECURE",
                reason: e.to_string(),
            })?,
        };

        let backend = match get("CATALOG_BACKEND").as_deref() {
            None | Some("supabase") => Backend::Supabase,
            Some("memory") => Backend::Memory {
                email: get("ADMIN_EMAIL").ok_or(ConfigError::Missing("ADMIN_EMAIL"))?,
                password: get("ADMIN_PASSWORD").ok_or(ConfigError::Missing("ADMIN_PASSWORD"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "CATALOG_BACKEND",
                    reason: format!("unknown backend '{other}', expected 'supabase' or 'memory'"),
                });
            }
        };

        let supabase = match backend {
            Backend::Supabase => Some(SupabaseConfig {
                url: get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                anon_key: get("SUPABASE_ANON_KEY")
                    .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            }),
            Backend::Memory { .. } => None,
        };

        if let Some(cfg) = &supabase {
            if !(cfg.url.starts_with("http://") || cfg.url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    name: "SUPABASE_URL",
                    reason: "must start with http:// or https://".to_string(),
                });
            }
        }

        Ok(Self {
            bind_addr,
            static_dir,
            cookie_secure,
            backend,
            supabase,
        })
    }
}
