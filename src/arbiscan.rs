use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;

/// Read-only client for an Arbiscan-style block explorer API. Every
/// endpoint lives under one base URL and is selected via `module` and
/// `action` query parameters; responses are returned as raw JSON without
/// unwrapping the provider envelope.
#[derive(Clone)]
pub struct ArbiscanClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ArbiscanClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.arbiscan_api_url)
            .context("invalid Arbiscan API URL")?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: config.arbiscan_api_key.clone(),
        })
    }

    /// Current balance of an account, in Wei.
    pub async fn get_balance(&self, address: &str) -> Result<Value> {
        self.get(&[
            ("module", "account"),
            ("action", "balance"),
            ("address", address),
            ("tag", "latest"),
        ])
        .await
        .context("Arbiscan balance lookup failed")
    }

    /// Total ETH supply on the network.
    pub async fn get_eth_supply(&self) -> Result<Value> {
        self.get(&[("module", "stats"), ("action", "ethsupply")])
            .await
            .context("Arbiscan ETH supply lookup failed")
    }

    /// Latest block number via the proxy eth_blockNumber action. The
    /// `result` field of the envelope is a hex string.
    pub async fn get_latest_block_number(&self) -> Result<Value> {
        self.get(&[("module", "proxy"), ("action", "eth_blockNumber")])
            .await
            .context("Arbiscan block number lookup failed")
    }

    /// Full block body for `tag` (a hex block number), with complete
    /// transaction objects rather than hashes.
    pub async fn get_block_by_number(&self, tag: &str) -> Result<Value> {
        self.get(&[
            ("module", "proxy"),
            ("action", "eth_getBlockByNumber"),
            ("tag", tag),
            ("boolean", "true"),
        ])
        .await
        .context("Arbiscan block lookup failed")
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<Value> {
        debug!("Querying Arbiscan: {:?}", params);

        let response = self
            .client
            .get(self.base_url.clone())
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
