use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub bridge_base_url: String,
    pub bridge_token: Option<String>,
    pub default_country_code: String,
    pub lookup_timeout_ms: u64,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            bridge_base_url: std::env::var("WA_BRIDGE_URL")
                .map_err(|_| anyhow::anyhow!("WA_BRIDGE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("WA_BRIDGE_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("WA_BRIDGE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })?,
            bridge_token: std::env::var("WA_BRIDGE_TOKEN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            default_country_code: {
                let code =
                    std::env::var("DEFAULT_COUNTRY_CODE").unwrap_or_else(|_| "55".to_string());
                if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                    anyhow::bail!("DEFAULT_COUNTRY_CODE must contain only digits");
                }
                code
            },
            lookup_timeout_ms: std::env::var("LOOKUP_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("LOOKUP_TIMEOUT_MS must be a number of milliseconds")
                })?,
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Bridge URL: {}", config.bridge_base_url);
        tracing::debug!("Default country code: {}", config.default_country_code);
        tracing::debug!("Lookup timeout: {}ms", config.lookup_timeout_ms);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Whether internal error detail may be echoed to clients.
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
