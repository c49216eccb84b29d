use anyhow::{anyhow, Context};
use pricewatch_market_data::provider::alpha_vantage::BASE_URL as ALPHA_VANTAGE_URL;
use pricewatch_market_data::FallbackPolicy;
use pricewatch_notify::DEFAULT_SERVER_CHAN_URL;
use std::net::{Ipv4Addr, SocketAddr};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SYMBOL: &str = "QQQ";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub symbol: String,
    /// No key means no provider: every quote is synthetic.
    pub alpha_vantage_api_key: Option<String>,
    pub alpha_vantage_url: String,
    pub push_gateway_url: String,
    pub quote_fallback: FallbackPolicy,
    pub cors_allow: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let listen_addr: SocketAddr = match (non_empty("PW_LISTEN_ADDR"), non_empty("PORT")) {
            (Some(addr), _) => addr
                .parse()
                .with_context(|| format!("Invalid PW_LISTEN_ADDR '{}'", addr))?,
            (None, Some(port)) => {
                let port: u16 = port
                    .parse()
                    .with_context(|| format!("Invalid PORT '{}'", port))?;
                SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
            }
            (None, None) => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(|e| anyhow!("Invalid default listen address: {}", e))?,
        };

        let quote_fallback = match non_empty("PW_QUOTE_FALLBACK") {
            Some(raw) => raw.parse::<FallbackPolicy>().map_err(|e: String| anyhow!(e))?,
            None => FallbackPolicy::default(),
        };

        let cors_allow = var("PW_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            symbol: non_empty("PW_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
            alpha_vantage_api_key: non_empty("PW_ALPHA_VANTAGE_API_KEY")
                .or_else(|| non_empty("ALPHA_VANTAGE_API_KEY")),
            alpha_vantage_url: non_empty("PW_ALPHA_VANTAGE_URL")
                .unwrap_or_else(|| ALPHA_VANTAGE_URL.to_string()),
            push_gateway_url: non_empty("PW_PUSH_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_SERVER_CHAN_URL.to_string()),
            quote_fallback,
            cors_allow,
        })
    }
}
