use std::path::PathBuf;

/// Which [`DocumentStore`](kindred_db::DocumentStore) backend to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL JSONB table; requires `DATABASE_URL`.
    Postgres,
    /// Process memory; data is lost on restart.
    Memory,
}

impl StorageBackend {
    fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => panic!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
        }
    }
}

/// Settings handed to the hosted checkout widget.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Publishable key of the payment provider account.
    pub public_key: String,
    /// Currency used when a checkout request does not name one.
    pub default_currency: String,
    /// Prefix of generated transaction references.
    pub tx_prefix: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    /// Required when `storage` is [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    /// Bearer token guarding `/api/v1/admin`. `None` leaves the admin API open.
    pub admin_token: Option<String>,
    pub payment: PaymentConfig,
    /// Organization name shown in the checkout widget.
    pub organization_name: String,
    /// Directory of a prebuilt frontend bundle to serve for non-API paths.
    pub static_dir: Option<PathBuf>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORAGE_BACKEND`      | `postgres`                 |
    /// | `DATABASE_URL`         | (none)                     |
    /// | `ADMIN_API_TOKEN`      | (none, admin API open)     |
    /// | `PAYMENT_PUBLIC_KEY`   | `""`                       |
    /// | `PAYMENT_CURRENCY`     | `USD`                      |
    /// | `PAYMENT_TX_PREFIX`    | `DON`                      |
    /// | `ORGANIZATION_NAME`    | `Kindred Foundation`       |
    /// | `STATIC_DIR`           | (none)                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage = StorageBackend::from_env_value(
            &std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".into()),
        );

        let payment = PaymentConfig {
            public_key: non_empty_var("PAYMENT_PUBLIC_KEY").unwrap_or_default(),
            default_currency: non_empty_var("PAYMENT_CURRENCY")
                .unwrap_or_else(|| "USD".into())
                .to_ascii_uppercase(),
            tx_prefix: non_empty_var("PAYMENT_TX_PREFIX").unwrap_or_else(|| "DON".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            database_url: non_empty_var("DATABASE_URL"),
            admin_token: non_empty_var("ADMIN_API_TOKEN"),
            payment,
            organization_name: non_empty_var("ORGANIZATION_NAME")
                .unwrap_or_else(|| "Kindred Foundation".into()),
            static_dir: non_empty_var("STATIC_DIR").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parsing() {
        assert_eq!(StorageBackend::from_env_value("memory"), StorageBackend::Memory);
        assert_eq!(StorageBackend::from_env_value(" Postgres "), StorageBackend::Postgres);
    }

    #[test]
    #[should_panic(expected = "STORAGE_BACKEND")]
    fn unknown_storage_backend_panics() {
        StorageBackend::from_env_value("sqlite");
    }
}
