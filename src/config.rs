use std::env;
use std::net::{IpAddr, SocketAddr};
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Shortest accepted token-signing secret, in bytes.
const MIN_JWT_SECRET_LEN: usize = 32;

/// Connection settings for the S3-compatible bucket.
#[derive(Clone)]
pub struct StorageConfig {
    /// The bucket every object lives in.
    pub bucket: String,
    /// A custom endpoint (R2, MinIO, ...). `None` means AWS itself.
    pub endpoint: Option<String>,
    /// The signing region.
    pub region: String,
    /// Static access key id; falls back to the default credential chain when unset.
    pub access_key_id: Option<String>,
    /// Static secret access key.
    pub secret_access_key: Option<Zeroizing<String>>,
}

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The HMAC key session tokens are signed with.
    pub jwt_secret: Zeroizing<Vec<u8>>,
    /// How long an issued session token stays valid, in hours.
    pub token_ttl_hours: i64,
    /// Object storage settings.
    pub storage: StorageConfig,
    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,
    /// Email of the account created on first boot.
    pub admin_email: String,
    /// Initial password of the account created on first boot.
    pub admin_password: Zeroizing<String>,
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Creates a new `Config` from environment variables.
    pub fn from_env() -> Result<Self> {
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .context("Invalid PORT")?;
        let bind: IpAddr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()
            .context("Invalid BIND_ADDR")?;

        let jwt_secret = Zeroizing::new(
            env::var("JWT_SECRET")
                .context("JWT_SECRET must be set (generate with: openssl rand -hex 32)")?
                .into_bytes(),
        );
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            anyhow::bail!("JWT_SECRET must be at least {} bytes", MIN_JWT_SECRET_LEN);
        }

        let token_ttl_hours: i64 = env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "720".to_string())
            .parse()
            .context("Invalid TOKEN_TTL_HOURS")?;
        if token_ttl_hours <= 0 {
            anyhow::bail!("TOKEN_TTL_HOURS must be positive");
        }

        let storage = StorageConfig {
            bucket: env::var("STORAGE_BUCKET").context("STORAGE_BUCKET must be set")?,
            endpoint: optional("STORAGE_ENDPOINT").map(|e| e.trim_end_matches('/').to_string()),
            region: optional("STORAGE_REGION").unwrap_or_else(|| "auto".to_string()),
            access_key_id: optional("STORAGE_ACCESS_KEY_ID"),
            secret_access_key: optional("STORAGE_SECRET_ACCESS_KEY").map(Zeroizing::new),
        };

        let cors_origins = optional("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty() && *o != "*")
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            listen_addr: SocketAddr::new(bind, port),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret,
            token_ttl_hours,
            storage,
            cors_origins,
            admin_email: optional("ADMIN_EMAIL").unwrap_or_else(|| "admin@example.com".to_string()),
            admin_password: Zeroizing::new(
                optional("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
            ),
        })
    }
}
