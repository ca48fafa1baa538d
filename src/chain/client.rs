//! JSON-RPC Chain Client
//!
//! Reads the token contract through `eth_call` against a JSON-RPC node.
//!
//! [`ChainEndpoint`] holds the immutable connection settings and is shared
//! by the server. Every render opens its own [`ChainReader`] from it, which
//! lives only for the four reads of that render.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use super::abi::{decode_hex_result, decode_string, decode_uint256, ViewFunction};
use super::error::{ChainError, ChainResult};
use super::types::{ContractAddress, ContractView};
use super::ChainSource;
use alloy_primitives::U256;

/// Connection settings for the RPC node and the bound contract
#[derive(Debug, Clone)]
pub struct ChainEndpoint {
    client: Client,
    rpc_url: String,
    contract: ContractAddress,
    pin_block: bool,
}

impl ChainEndpoint {
    /// Create an endpoint with its own HTTP connection pool
    pub fn new(
        rpc_url: impl Into<String>,
        contract: ContractAddress,
        request_timeout: Duration,
        pin_block: bool,
    ) -> ChainResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("nav-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
            contract,
            pin_block,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn contract(&self) -> &ContractAddress {
        &self.contract
    }

    /// Send one JSON-RPC request and return its `result` member
    async fn request(&self, method: &str, params: Value) -> ChainResult<Value> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        tracing::debug!(rpc_url = %self.rpc_url, method, "Sending JSON-RPC request");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(ChainError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::Http {
                status: status.as_u16(),
            });
        }

        let reply: RpcResponse = response.json().await.map_err(ChainError::from_request)?;

        if let Some(error) = reply.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        reply
            .result
            .ok_or_else(|| ChainError::Decode(format!("{} returned neither result nor error", method)))
    }
}

#[async_trait]
impl ChainSource for ChainEndpoint {
    async fn fetch_view(&self) -> ChainResult<ContractView> {
        let reader = ChainReader::connect(self).await?;
        reader.fetch_view().await
    }

    fn contract_address(&self) -> ContractAddress {
        self.contract
    }
}

/// Block a read is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Number(u64),
}

impl BlockTag {
    fn to_param(self) -> Value {
        match self {
            BlockTag::Latest => Value::String("latest".to_string()),
            BlockTag::Number(n) => Value::String(format!("0x{:x}", n)),
        }
    }
}

/// Reader scoped to a single render
pub struct ChainReader<'a> {
    endpoint: &'a ChainEndpoint,
    block: BlockTag,
}

impl<'a> ChainReader<'a> {
    /// Open a reader. With block pinning enabled this resolves the current
    /// head once so all subsequent reads observe the same block.
    pub async fn connect(endpoint: &'a ChainEndpoint) -> ChainResult<Self> {
        let block = if endpoint.pin_block {
            let result = endpoint.request("eth_blockNumber", json!([])).await?;
            BlockTag::Number(parse_quantity(&result)?)
        } else {
            BlockTag::Latest
        };

        tracing::debug!(contract = %endpoint.contract, block = ?block, "Opened chain reader");

        Ok(Self { endpoint, block })
    }

    pub fn block(&self) -> BlockTag {
        self.block
    }

    pub async fn get_nav(&self) -> ChainResult<U256> {
        let data = self.call(ViewFunction::GetNav).await?;
        decode_uint256(&data)
    }

    pub async fn get_total_supply(&self) -> ChainResult<U256> {
        let data = self.call(ViewFunction::TotalSupply).await?;
        decode_uint256(&data)
    }

    pub async fn get_name(&self) -> ChainResult<String> {
        let data = self.call(ViewFunction::Name).await?;
        decode_string(&data)
    }

    pub async fn get_symbol(&self) -> ChainResult<String> {
        let data = self.call(ViewFunction::Symbol).await?;
        decode_string(&data)
    }

    /// Run the four reads in order and assemble the snapshot
    pub async fn fetch_view(&self) -> ChainResult<ContractView> {
        let nav_raw = self.get_nav().await?;
        let name = self.get_name().await?;
        let symbol = self.get_symbol().await?;
        let total_supply_raw = self.get_total_supply().await?;

        let block = match self.block() {
            BlockTag::Number(n) => Some(n),
            BlockTag::Latest => None,
        };

        tracing::info!(
            contract = %self.endpoint.contract,
            block = ?block,
            symbol = %symbol,
            "Fetched contract state"
        );

        Ok(ContractView {
            nav_raw,
            total_supply_raw,
            name,
            symbol,
            block,
        })
    }

    async fn call(&self, function: ViewFunction) -> ChainResult<Vec<u8>> {
        let params = json!([
            {
                "to": self.endpoint.contract.checksummed(),
                "data": function.call_data(),
            },
            self.block.to_param(),
        ]);

        let result = self.endpoint.request("eth_call", params).await?;
        let hex_result = result.as_str().ok_or_else(|| {
            ChainError::Decode(format!("{} result is not a string", function.signature()))
        })?;

        decode_hex_result(hex_result)
    }
}

/// Parse a JSON-RPC hex quantity such as `"0x1b4"`
fn parse_quantity(value: &Value) -> ChainResult<u64> {
    let text = value
        .as_str()
        .ok_or_else(|| ChainError::Decode(format!("quantity is not a string: {}", value)))?;
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::Decode(format!("quantity is not 0x-prefixed: {}", text)))?;

    u64::from_str_radix(digits, 16)
        .map_err(|e| ChainError::Decode(format!("invalid quantity {}: {}", text, e)))
}

// ============================================
// JSON-RPC envelopes
// ============================================

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;
    use axum::{extract::State, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    const CONTRACT: &str = "0xfD5a2488f3ea1F61FF462730B14f57a108a7f9eC";

    type RequestLog = Arc<Mutex<Vec<Value>>>;

    fn abi_word(value: U256) -> Vec<u8> {
        value.to_be_bytes::<32>().to_vec()
    }

    fn abi_string(s: &str) -> Vec<u8> {
        let mut out = abi_word(U256::from(32u64));
        out.extend(abi_word(U256::from(s.len() as u64)));
        out.extend_from_slice(s.as_bytes());
        out.resize(64 + (s.len() + 31) / 32 * 32, 0);
        out
    }

    /// Minimal JSON-RPC node serving the token's four view functions
    async fn node_handler(State(log): State<RequestLog>, Json(request): Json<Value>) -> Json<Value> {
        log.lock().unwrap().push(request.clone());

        let result = match request["method"].as_str() {
            Some("eth_blockNumber") => json!("0x1b4"),
            Some("eth_call") => {
                let data = request["params"][0]["data"].as_str().unwrap_or_default();
                let returned = if data == ViewFunction::GetNav.call_data() {
                    abi_word(U256::from(1_234_500_000_000_000_000u64))
                } else if data == ViewFunction::TotalSupply.call_data() {
                    abi_word(U256::from(2_500_000u64) * U256::from(1_000_000_000_000_000_000u64))
                } else if data == ViewFunction::Name.call_data() {
                    abi_string("Fund NAV Token")
                } else if data == ViewFunction::Symbol.call_data() {
                    abi_string("FNQT")
                } else {
                    Vec::new()
                };
                json!(format!("0x{}", hex::encode(returned)))
            }
            _ => {
                return Json(json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "error": {"code": -32601, "message": "method not found"},
                }))
            }
        };

        Json(json!({"jsonrpc": "2.0", "id": request["id"], "result": result}))
    }

    async fn spawn_node(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_token_node() -> (String, RequestLog) {
        let log = RequestLog::default();
        let router = Router::new()
            .route("/", post(node_handler))
            .with_state(log.clone());
        (spawn_node(router).await, log)
    }

    fn endpoint(url: String, pin_block: bool) -> ChainEndpoint {
        let contract = ContractAddress::parse(CONTRACT).unwrap();
        ChainEndpoint::new(url, contract, Duration::from_secs(5), pin_block).unwrap()
    }

    fn expected_view(block: Option<u64>) -> ContractView {
        ContractView {
            nav_raw: U256::from(1_234_500_000_000_000_000u64),
            total_supply_raw: U256::from(2_500_000u64) * U256::from(1_000_000_000_000_000_000u64),
            name: "Fund NAV Token".to_string(),
            symbol: "FNQT".to_string(),
            block,
        }
    }

    fn methods(log: &RequestLog) -> Vec<String> {
        log.lock()
            .unwrap()
            .iter()
            .map(|r| r["method"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_pinned_reads_share_one_block() {
        let (url, log) = spawn_token_node().await;
        let endpoint = endpoint(url, true);

        let reader = ChainReader::connect(&endpoint).await.unwrap();
        assert_eq!(reader.block(), BlockTag::Number(436));

        let view = reader.fetch_view().await.unwrap();
        assert_eq!(view, expected_view(Some(436)));

        assert_eq!(
            methods(&log),
            vec!["eth_blockNumber", "eth_call", "eth_call", "eth_call", "eth_call"]
        );

        let requests = log.lock().unwrap().clone();
        let calls = &requests[1..];
        for call in calls {
            assert_eq!(call["jsonrpc"], "2.0");
            assert_eq!(call["params"][0]["to"], CONTRACT);
            assert_eq!(call["params"][1], "0x1b4");
        }

        let data: Vec<&str> = calls
            .iter()
            .map(|c| c["params"][0]["data"].as_str().unwrap())
            .collect();
        assert_eq!(
            data,
            vec![
                ViewFunction::GetNav.call_data(),
                ViewFunction::Name.call_data(),
                ViewFunction::Symbol.call_data(),
                ViewFunction::TotalSupply.call_data(),
            ]
        );
    }

    #[tokio::test]
    async fn test_unpinned_reads_use_latest() {
        let (url, log) = spawn_token_node().await;
        let endpoint = endpoint(url, false);

        let view = endpoint.fetch_view().await.unwrap();
        assert_eq!(view, expected_view(None));

        assert_eq!(methods(&log), vec!["eth_call"; 4]);
        for call in log.lock().unwrap().iter() {
            assert_eq!(call["params"][1], "latest");
        }
    }

    #[tokio::test]
    async fn test_rpc_error_object() {
        let router = Router::new().route(
            "/",
            post(|| async {
                Json(json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": {"code": 3, "message": "execution reverted"},
                }))
            }),
        );
        let endpoint = endpoint(spawn_node(router).await, false);

        match endpoint.fetch_view().await {
            Err(ChainError::Rpc { code, message }) => {
                assert_eq!(code, 3);
                assert_eq!(message, "execution reverted");
            }
            other => panic!("expected RPC error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_envelope_body_is_decode_error() {
        let router = Router::new().route("/", post(|| async { "upstream maintenance" }));
        let endpoint = endpoint(spawn_node(router).await, true);

        let result = endpoint.fetch_view().await;
        assert!(matches!(result, Err(ChainError::Decode(_))));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let router = Router::new().route(
            "/",
            post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let endpoint = endpoint(spawn_node(router).await, false);

        let result = endpoint.fetch_view().await;
        assert!(matches!(result, Err(ChainError::Http { status: 503 })));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&json!("0x1b4")).unwrap(), 436);
        assert!(parse_quantity(&json!("1b4")).is_err());
        assert!(parse_quantity(&json!(436)).is_err());
    }

    #[test]
    fn test_block_tag_param() {
        assert_eq!(BlockTag::Latest.to_param(), json!("latest"));
        assert_eq!(BlockTag::Number(255).to_param(), json!("0xff"));
    }

    #[test]
    fn test_rpc_error_envelope() {
        let reply: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted"}}"#,
        )
        .unwrap();
        assert!(reply.result.is_none());
        let error = reply.error.unwrap();
        assert_eq!(error.code, 3);
        assert_eq!(error.message, "execution reverted");
    }

    #[test]
    fn test_request_envelope() {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_blockNumber",
            params: json!([]),
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            json!({"jsonrpc": "2.0", "id": 1, "method": "eth_blockNumber", "params": []})
        );
    }

    #[test]
    fn test_endpoint_construction() {
        let contract =
            ContractAddress::parse("0xfD5a2488f3ea1F61FF462730B14f57a108a7f9eC").unwrap();
        let endpoint = ChainEndpoint::new(
            "https://polygon-rpc.com",
            contract,
            Duration::from_secs(5),
            true,
        )
        .unwrap();
        assert_eq!(endpoint.rpc_url(), "https://polygon-rpc.com");
        assert_eq!(endpoint.contract(), &contract);
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        let contract =
            ContractAddress::parse("0xfD5a2488f3ea1F61FF462730B14f57a108a7f9eC").unwrap();
        // Port 9 (discard) on loopback is not serving HTTP
        let endpoint = ChainEndpoint::new(
            "http://127.0.0.1:9",
            contract,
            Duration::from_secs(2),
            false,
        )
        .unwrap();

        let result = endpoint.fetch_view().await;
        assert!(matches!(
            result,
            Err(ChainError::Transport(_)) | Err(ChainError::Timeout)
        ));
    }
}
