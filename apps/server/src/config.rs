use std::{net::SocketAddr, time::Duration};

// 32 ASCII bytes, accepted by decode_secret_key.
const DEV_JWT_SECRET: &str = "moneylens-development-secret-32b";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub calendar_month_window: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("ML_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid ML_LISTEN_ADDR");
        let db_path = std::env::var("ML_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("ML_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("ML_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = match std::env::var("ML_JWT_SECRET") {
            Ok(raw) => crate::auth::decode_secret_key(&raw).expect("Invalid ML_JWT_SECRET"),
            Err(_) => {
                tracing::warn!(
                    "ML_JWT_SECRET is not set; tokens are signed with a built-in development secret"
                );
                DEV_JWT_SECRET.as_bytes().to_vec()
            }
        };
        let ttl_hours: u64 = std::env::var("ML_TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .unwrap_or(24);
        let calendar_month_window = std::env::var("ML_CALENDAR_MONTH_WINDOW")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_hours * 3600),
            calendar_month_window,
        }
    }
}
