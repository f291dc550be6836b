#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Browser origins allowed to call the API. Empty means same-origin only;
    /// `*` admits any origin but never with credentials.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://purchase_list.db".into());
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid DB_MAX_CONNECTIONS: {}", e))?;
        let cors_origins = parse_origins(&std::env::var("CORS_ORIGINS").unwrap_or_default());

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            cors_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
