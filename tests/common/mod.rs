//! Shared test doubles and helpers for the integration suite.

// Each integration binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, Log as PrimitiveLog, TxHash, U256};
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use crowdfund_gateway::config::GatewayConfig;
use crowdfund_gateway::http::{build_router, AppState};
use crowdfund_gateway::ledger::contract::Crowdfund;
use crowdfund_gateway::ledger::{
    CampaignLedger, CampaignRecord, ConfirmedTx, LedgerError, LedgerResult, WriteOp, NATIVE_TOKEN,
};

pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const OWNER_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub const MOCK_BLOCK_NUMBER: u64 = 7;
pub const MOCK_GAS_USED: u64 = 21_000;

/// In-memory stand-in for the on-chain contract behind the gateway.
///
/// Reads serve from the configured campaign list; writes are recorded so
/// tests can assert exactly which operation reached the ledger. A create
/// appends a campaign and stages the creation event for the next
/// confirmation, mirroring the contract's behavior.
pub struct MockLedger {
    campaigns: Mutex<Vec<CampaignRecord>>,
    raised: Mutex<Vec<U256>>,
    pub submitted: Mutex<Vec<WriteOp>>,
    confirm_logs: Mutex<Vec<Log>>,
    pub emit_created_event: bool,
    pub fail_read_at: Option<u64>,
    pub fail_submit: Option<String>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self {
            campaigns: Mutex::new(Vec::new()),
            raised: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            confirm_logs: Mutex::new(Vec::new()),
            emit_created_event: true,
            fail_read_at: None,
            fail_submit: None,
        }
    }
}

impl MockLedger {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_campaigns(entries: Vec<(CampaignRecord, U256)>) -> Self {
        let (campaigns, raised): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        Self {
            campaigns: Mutex::new(campaigns),
            raised: Mutex::new(raised),
            ..Self::default()
        }
    }

    pub fn submitted_ops(&self) -> Vec<WriteOp> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CampaignLedger for MockLedger {
    async fn total_campaigns(&self) -> LedgerResult<u64> {
        Ok(self.campaigns.lock().unwrap().len() as u64)
    }

    async fn campaign(&self, id: u64) -> LedgerResult<CampaignRecord> {
        if self.fail_read_at == Some(id) {
            return Err(LedgerError::Unavailable(
                "connection reset by node".to_string(),
            ));
        }
        self.campaigns
            .lock()
            .unwrap()
            .get(id as usize)
            .cloned()
            .ok_or_else(|| {
                LedgerError::ContractCall(format!("execution reverted: no campaign {}", id))
            })
    }

    async fn total_raised(&self, id: u64, token: Address) -> LedgerResult<U256> {
        if token != NATIVE_TOKEN {
            return Ok(U256::ZERO);
        }
        Ok(self
            .raised
            .lock()
            .unwrap()
            .get(id as usize)
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn submit(&self, op: WriteOp) -> LedgerResult<TxHash> {
        if let Some(reason) = &self.fail_submit {
            return Err(LedgerError::Reverted(reason.clone()));
        }

        if let WriteOp::CreateCampaign {
            goal_amount,
            deadline,
            title,
            description,
        } = &op
        {
            let mut campaigns = self.campaigns.lock().unwrap();
            let id = campaigns.len() as u64;
            campaigns.push(CampaignRecord {
                owner: OWNER_ADDRESS.parse().unwrap(),
                goal_amount: *goal_amount,
                deadline: *deadline,
                title: title.clone(),
                description: description.clone(),
                withdrawn: false,
            });
            self.raised.lock().unwrap().push(U256::ZERO);

            if self.emit_created_event {
                *self.confirm_logs.lock().unwrap() =
                    vec![campaign_created_log(id, *goal_amount, *deadline)];
            }
        }

        self.submitted.lock().unwrap().push(op);
        Ok(mock_tx_hash())
    }

    async fn confirm(&self, tx_hash: TxHash) -> LedgerResult<ConfirmedTx> {
        Ok(ConfirmedTx {
            tx_hash,
            block_number: MOCK_BLOCK_NUMBER,
            gas_used: MOCK_GAS_USED,
            logs: self.confirm_logs.lock().unwrap().drain(..).collect(),
        })
    }
}

pub fn mock_tx_hash() -> TxHash {
    TxHash::from(B256::repeat_byte(0xab))
}

pub fn mock_tx_hash_string() -> String {
    mock_tx_hash().to_string()
}

pub fn campaign_record(goal: u64, deadline: u64, title: &str, description: &str) -> CampaignRecord {
    CampaignRecord {
        owner: OWNER_ADDRESS.parse().unwrap(),
        goal_amount: U256::from(goal),
        deadline: U256::from(deadline),
        title: title.to_string(),
        description: description.to_string(),
        withdrawn: false,
    }
}

pub fn campaign_created_log(id: u64, goal_amount: U256, deadline: U256) -> Log {
    let event = Crowdfund::CampaignCreated {
        id: U256::from(id),
        owner: OWNER_ADDRESS.parse().unwrap(),
        goalAmount: goal_amount,
        deadline,
    };
    Log {
        inner: PrimitiveLog {
            address: CONTRACT_ADDRESS.parse().unwrap(),
            data: event.encode_log_data(),
        },
        ..Default::default()
    }
}

/// Build the full router around a mock ledger, with default middleware.
pub fn test_router(ledger: Arc<MockLedger>) -> Router {
    let state = AppState::new(ledger, CONTRACT_ADDRESS.parse().unwrap());
    build_router(&GatewayConfig::default(), state)
}

/// Drive one request through the router and decode the JSON response.
pub async fn send_json(
    router: &Router,
    method: &str,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn send_get(router: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
