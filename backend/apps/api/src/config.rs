//! Server configuration from the environment

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose;
use platform::password::HashingParams;
use users::UsersConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `None` runs on the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub users: UsersConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let database_max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let defaults = HashingParams::default();
        let hashing = HashingParams::new(
            parse_or("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            parse_or("ARGON2_ITERATIONS", defaults.iterations)?,
            parse_or("ARGON2_PARALLELISM", defaults.parallelism)?,
        );

        let password_pepper = env::var("PASSWORD_PEPPER")
            .ok()
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        let users = match env::var("CREDENTIAL_SECRET") {
            Ok(secret_b64) => UsersConfig {
                credential_secret: decode_secret(&secret_b64)?,
                hashing,
                password_pepper,
            },
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("CREDENTIAL_SECRET not set, using a random secret");
                UsersConfig {
                    hashing,
                    password_pepper,
                    ..UsersConfig::development()
                }
            }
            Err(_) => bail!("CREDENTIAL_SECRET must be set in production"),
        };

        Ok(Self {
            bind_addr,
            database_url,
            database_max_connections,
            users,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        Err(_) => Ok(default),
    }
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("CREDENTIAL_SECRET must be base64")?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("CREDENTIAL_SECRET must decode to 32 bytes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret_requires_32_bytes() {
        let ok = general_purpose::STANDARD.encode([1u8; 32]);
        assert_eq!(decode_secret(&ok).unwrap(), [1u8; 32]);

        let short = general_purpose::STANDARD.encode([1u8; 16]);
        assert!(decode_secret(&short).is_err());
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn test_parse_or_falls_back_when_unset() {
        assert_eq!(parse_or("USERS_API_TEST_SURELY_UNSET", 7u32).unwrap(), 7);
    }
}
