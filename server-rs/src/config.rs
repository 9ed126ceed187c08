use std::env;

use crate::authz::DEFAULT_EVENT_PLANNER_ROLES;
use crate::models::Role;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub authz: AuthzConfig,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: u32,
}

#[derive(Clone, Debug)]
pub struct AuthzConfig {
    pub event_planner_roles: Vec<Role>,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            event_planner_roles: DEFAULT_EVENT_PLANNER_ROLES.to_vec(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env_or_parse("PORT", 3000),
            cors_origins: split_list(&env_or(
                "CORS_ORIGINS",
                "http://localhost:3000,http://localhost:5173",
            )),
            jwt: JwtConfig {
                secret: env_or("JWT_SECRET", "change-me-to-a-secure-random-string"),
            },
            rate_limit: RateLimitConfig {
                window_secs: 60,
                max_requests: env_or_parse("RATE_LIMIT_MAX", 100),
            },
            authz: AuthzConfig {
                event_planner_roles: env::var("EVENT_PLANNER_ROLES")
                    .map(|v| parse_role_list(&v))
                    .unwrap_or_else(|_| DEFAULT_EVENT_PLANNER_ROLES.to_vec()),
            },
        }
    }

    /// Defaults with a fixed secret, for tests and local tooling.
    pub fn for_secret(secret: &str) -> Self {
        Self {
            port: 0,
            cors_origins: Vec::new(),
            jwt: JwtConfig {
                secret: secret.to_string(),
            },
            rate_limit: RateLimitConfig {
                window_secs: 60,
                max_requests: 1000,
            },
            authz: AuthzConfig::default(),
        }
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Unknown names are skipped rather than widened to `MEMBER`.
fn parse_role_list(s: &str) -> Vec<Role> {
    let mut roles = Vec::new();
    for name in split_list(s) {
        match Role::parse(&name) {
            Ok(role) if !roles.contains(&role) => roles.push(role),
            Ok(_) => {}
            Err(_) => tracing::warn!(role = %name, "ignoring unknown role in EVENT_PLANNER_ROLES"),
        }
    }
    roles
}
