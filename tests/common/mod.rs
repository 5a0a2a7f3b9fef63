//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crowdfund_portal::campaign::CampaignSource;
use crowdfund_portal::wallet::{InjectedProvider, WalletStore};
use crowdfund_portal::{Portal, PortalConfig, PortalServer, Shutdown};

/// Anvil's first development account.
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// A portal running on an ephemeral port.
pub struct TestPortal {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestPortal {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Provider whose RPC endpoint refuses connections, so transactions fail
/// quickly after client-side checks pass.
#[allow(dead_code)]
pub fn unreachable_provider() -> InjectedProvider {
    InjectedProvider::new(
        "http://127.0.0.1:1".parse().unwrap(),
        31337,
        TEST_PRIVATE_KEY.to_string(),
        false,
    )
}

/// Start a portal over `source` with an optional wallet provider.
pub async fn start_portal(
    config: PortalConfig,
    source: CampaignSource,
    provider: Option<InjectedProvider>,
) -> TestPortal {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let portal = Arc::new(Portal::new(config, WalletStore::new(provider), source));
    let shutdown = Shutdown::new();
    let server = PortalServer::new(portal);
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    TestPortal { addr, shutdown, handle }
}

/// Address the portal is pointed at when talking to [`MockNode`].
#[allow(dead_code)]
pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
/// Hash the mock node assigns to every broadcast transaction.
#[allow(dead_code)]
pub const TX_HASH: &str = "0xabababababababababababababababababababababababababababababababab";
#[allow(dead_code)]
pub const RECEIPT_BLOCK: u64 = 42;

/// How the mock node settles a broadcast transaction.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Receipt with status 1.
    Confirmed,
    /// Receipt with status 0.
    Reverted,
    /// `eth_sendRawTransaction` never answers.
    Stalled,
}

struct NodeState {
    settlement: Settlement,
    raw_transactions: AtomicUsize,
}

/// Minimal JSON-RPC node: enough of the `eth_` namespace for the signing
/// provider to fill, send and confirm one transaction.
#[allow(dead_code)]
pub struct MockNode {
    pub addr: SocketAddr,
    state: Arc<NodeState>,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl MockNode {
    pub async fn start(settlement: Settlement) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(NodeState {
            settlement,
            raw_transactions: AtomicUsize::new(0),
        });

        let router = Router::new().route("/", post(rpc)).with_state(Arc::clone(&state));
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { addr, state, handle }
    }

    /// Wallet provider signing with the test key against this node.
    pub fn provider(&self) -> InjectedProvider {
        InjectedProvider::new(
            format!("http://{}/", self.addr).parse().unwrap(),
            31337,
            TEST_PRIVATE_KEY.to_string(),
            false,
        )
    }

    /// Number of `eth_sendRawTransaction` calls received.
    pub fn raw_transactions(&self) -> usize {
        self.state.raw_transactions.load(Ordering::SeqCst)
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn rpc(State(state): State<Arc<NodeState>>, Json(request): Json<Value>) -> Json<Value> {
    match request {
        Value::Array(batch) => {
            let mut responses = Vec::with_capacity(batch.len());
            for call in batch {
                responses.push(answer(&state, call).await);
            }
            Json(Value::Array(responses))
        }
        call => Json(answer(&state, call).await),
    }
}

async fn answer(state: &NodeState, call: Value) -> Value {
    let id = call["id"].clone();
    let method = call["method"].as_str().unwrap_or_default();

    let result = match method {
        "eth_chainId" => json!("0x7a69"),
        "net_version" => json!("31337"),
        "eth_blockNumber" => json!(format!("{:#x}", RECEIPT_BLOCK)),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_estimateGas" => json!("0x30000"),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
        "eth_feeHistory" => json!({
            "oldestBlock": "0x29",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]],
        }),
        "eth_sendRawTransaction" => {
            state.raw_transactions.fetch_add(1, Ordering::SeqCst);
            if state.settlement == Settlement::Stalled {
                std::future::pending::<()>().await;
            }
            json!(TX_HASH)
        }
        "eth_getTransactionReceipt" => receipt(state.settlement),
        "eth_getBlockByNumber" => Value::Null,
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {} not found", method) },
            })
        }
    };

    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn receipt(settlement: Settlement) -> Value {
    let status = match settlement {
        Settlement::Reverted => "0x0",
        _ => "0x1",
    };
    json!({
        "type": "0x2",
        "status": status,
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "11".repeat(32)),
        "blockNumber": format!("{:#x}", RECEIPT_BLOCK),
        "from": TEST_ADDRESS,
        "to": CONTRACT_ADDRESS.to_lowercase(),
        "cumulativeGasUsed": "0x30000",
        "gasUsed": "0x30000",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
    })
}
