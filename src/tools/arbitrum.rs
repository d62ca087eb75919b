use super::Tool;
use crate::arbiscan::ArbiscanClient;
use crate::claude::ClaudeClient;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
pub struct GetArbitrumDataRequest {
    #[serde(rename = "fullPrompt")]
    pub full_prompt: String,
    pub address: Option<String>,
}

/// The chain data fetched for one invocation. Provider responses are kept
/// as raw JSON; nothing is unwrapped or converted before it reaches the
/// prompt.
#[derive(Debug)]
pub struct ChainSnapshot {
    pub account: Option<Value>,
    pub supply: Value,
    pub latest_block: Value,
    pub block_body: Value,
}

pub struct GetArbitrumDataTool {
    arbiscan: ArbiscanClient,
    claude: ClaudeClient,
}

impl GetArbitrumDataTool {
    pub fn new(arbiscan: ArbiscanClient, claude: ClaudeClient) -> Self {
        Self { arbiscan, claude }
    }

    /// Balance (when an address was given), supply, and block number have
    /// no ordering dependency and run concurrently; the block body fetch
    /// needs the block number and runs after the join.
    async fn fetch_snapshot(&self, address: Option<&str>) -> Result<ChainSnapshot> {
        let account = async {
            match address {
                Some(addr) => self.arbiscan.get_balance(addr).await.map(Some),
                None => Ok(None),
            }
        };

        let (account, supply, latest_block) = tokio::try_join!(
            account,
            self.arbiscan.get_eth_supply(),
            self.arbiscan.get_latest_block_number(),
        )?;

        let tag = latest_block
            .get("result")
            .and_then(|result| result.as_str())
            .ok_or_else(|| anyhow!("eth_blockNumber response is missing a result field"))?
            .to_string();

        let block_body = self.arbiscan.get_block_by_number(&tag).await?;

        Ok(ChainSnapshot {
            account,
            supply,
            latest_block,
            block_body,
        })
    }

    async fn answer(&self, request: &GetArbitrumDataRequest) -> Result<String> {
        let snapshot = self.fetch_snapshot(request.address.as_deref()).await?;

        let prompt = build_prompt(&snapshot, &request.full_prompt, request.address.as_deref());
        debug!("Built completion prompt ({} bytes)", prompt.len());

        self.claude.complete(&prompt).await
    }
}

#[async_trait::async_trait]
impl Tool for GetArbitrumDataTool {
    fn name(&self) -> &'static str {
        "getArbitrumData"
    }

    fn description(&self) -> &'static str {
        "Analyze Arbitrum blockchain data and answer natural-language questions about it"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "fullPrompt": {
                    "type": "string",
                    "description": "The complete user query about Arbitrum data"
                },
                "address": {
                    "type": "string",
                    "description": "Optional specific address to focus on"
                }
            },
            "required": ["fullPrompt"]
        })
    }

    /// Upstream failures never escape this boundary: the tool always
    /// returns a single text content item, carrying either the model's
    /// answer or an error message.
    async fn call(&self, args: Value) -> Result<Value> {
        let request: GetArbitrumDataRequest =
            serde_json::from_value(args).context("invalid getArbitrumData arguments")?;

        let text = match self.answer(&request).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("getArbitrumData pipeline failed: {:#}", e);
                format!("Error fetching Arbitrum data: {:#}", e)
            }
        };

        Ok(text_response(text))
    }
}

fn text_response(text: String) -> Value {
    json!({
        "content": [
            {
                "type": "text",
                "text": text
            }
        ]
    })
}

fn build_prompt(snapshot: &ChainSnapshot, query: &str, address: Option<&str>) -> String {
    let data = json!({
        "accountData": snapshot.account,
        "statsData": snapshot.supply,
        "latestBlock": snapshot.latest_block,
        "latestBlockTransactions": snapshot.block_body,
    });
    let data = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());

    let address_line = address
        .map(|addr| format!("Address: {}\n", addr))
        .unwrap_or_default();

    format!(
        r#"You are an Arbitrum blockchain data assistant. Your task is to analyze Arbitrum data and respond to user queries.

Here is the data from the Arbiscan API:
{}

User query: {}
{}
Provide a well-structured response that directly addresses the user's query about the Arbitrum data.
Focus on being accurate, informative, and comprehensive.

When discussing transaction data:
1. List the transactions in chronological order (newest first)
2. Include relevant details like hash, from/to addresses (abbreviated), value, and transaction type
3. Format the response in a clear, readable way
4. Highlight any interesting patterns or notable transactions
5. Explain the context of the Arbitrum network for users who may be unfamiliar

For transaction values in Wei, convert them to ETH (1 ETH = 1e18 Wei).
Format addresses as shortened versions (e.g., 0x1234...5678)."#,
        data, query, address_line
    )
}
