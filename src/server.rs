use crate::arbiscan::ArbiscanClient;
use crate::claude::ClaudeClient;
use crate::tools::{arbitrum::GetArbitrumDataTool, Tool};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{self, BufRead};
use tracing::{debug, error, info};

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<Value>,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

pub async fn run(arbiscan: ArbiscanClient, claude: ClaudeClient) -> Result<()> {
    let mut tools: HashMap<String, Box<dyn Tool>> = HashMap::new();

    let arbitrum_tool = GetArbitrumDataTool::new(arbiscan, claude);
    tools.insert(arbitrum_tool.name().to_string(), Box::new(arbitrum_tool));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    info!("MCP Server Ready. Waiting for JSON-RPC requests on stdin...");

    while let Some(Ok(line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }

        debug!("Received request: {}", line);

        let req: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                continue;
            }
        };

        let response = handle_request(&req, &tools).await;

        let response_str = serde_json::to_string(&response)?;
        println!("{}", response_str);
    }

    Ok(())
}

pub async fn handle_request(
    req: &JsonRpcRequest,
    tools: &HashMap<String, Box<dyn Tool>>,
) -> JsonRpcResponse {
    match req.method.as_str() {
        "tools/list" => {
            let tool_list: Vec<Value> = tools
                .values()
                .map(|t| {
                    json!({
                        "name": t.name(),
                        "description": t.description(),
                        "inputSchema": t.schema()
                    })
                })
                .collect();

            JsonRpcResponse {
                jsonrpc: "2.0".into(),
                result: Some(json!({ "tools": tool_list })),
                error: None,
                id: req.id.clone(),
            }
        }
        "tools/call" => {
            if let Some(params) = &req.params {
                let name = params.get("name").and_then(|v| v.as_str());
                let args = params.get("arguments").cloned().unwrap_or(json!({}));

                if let Some(tool_name) = name {
                    if let Some(tool) = tools.get(tool_name) {
                        // Tools produce the MCP content envelope themselves,
                        // on success and failure alike; an Err here means the
                        // arguments did not match the tool's schema.
                        match tool.call(args).await {
                            Ok(result) => JsonRpcResponse {
                                jsonrpc: "2.0".into(),
                                result: Some(result),
                                error: None,
                                id: req.id.clone(),
                            },
                            Err(e) => JsonRpcResponse {
                                jsonrpc: "2.0".into(),
                                result: None,
                                error: Some(JsonRpcError {
                                    code: -32602,
                                    message: format!("Invalid tool arguments: {:#}", e),
                                    data: None,
                                }),
                                id: req.id.clone(),
                            },
                        }
                    } else {
                        JsonRpcResponse {
                            jsonrpc: "2.0".into(),
                            result: None,
                            error: Some(JsonRpcError {
                                code: -32601,
                                message: format!("Tool not found: {}", tool_name),
                                data: None,
                            }),
                            id: req.id.clone(),
                        }
                    }
                } else {
                    JsonRpcResponse {
                        jsonrpc: "2.0".into(),
                        result: None,
                        error: Some(JsonRpcError {
                            code: -32602,
                            message: "Missing 'name' parameter".into(),
                            data: None,
                        }),
                        id: req.id.clone(),
                    }
                }
            } else {
                JsonRpcResponse {
                    jsonrpc: "2.0".into(),
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32602,
                        message: "Missing params".into(),
                        data: None,
                    }),
                    id: req.id.clone(),
                }
            }
        }
        _ => JsonRpcResponse {
            jsonrpc: "2.0".into(),
            result: None,
            error: Some(JsonRpcError {
                code: -32601,
                message: "Method not found".into(),
                data: None,
            }),
            id: req.id.clone(),
        },
    }
}
