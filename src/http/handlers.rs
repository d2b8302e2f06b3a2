//! Request handlers, one per operation.
//!
//! Each handler is a straight mapping: validate the input shape, invoke the
//! aggregator (reads) or orchestrator (writes), serialize the result.
//! Validation always runs before any ledger interaction, so a malformed
//! request can never submit a transaction.

use alloy::primitives::{Address, U256};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};

use crate::campaigns::events::first_event;
use crate::campaigns::types::Campaign;
use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::ledger::contract::Crowdfund;
use crate::ledger::{ConfirmedTx, WriteOp, NATIVE_TOKEN};

/// Unsigned integer that clients may send as a JSON string or a numeric
/// literal. Carried as `U256` so 256-bit currency amounts survive intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub U256);

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Amount(U256::from(n))),
            Raw::Text(s) => s
                .trim()
                .parse::<U256>()
                .map(Amount)
                .map_err(|_| serde::de::Error::custom(format!("invalid unsigned integer: {s:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Request/response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCampaignRequest {
    pub goal_amount: Option<Amount>,
    pub deadline: Option<Amount>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributeRequest {
    pub campaign_id: Option<Amount>,
    pub amount: Option<Amount>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RefundRequest {
    pub campaign_id: Option<Amount>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WithdrawRequest {
    pub campaign_id: Option<Amount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub contract_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListResponse {
    pub campaigns: Vec<Campaign>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptBody {
    pub block_number: u64,
    pub gas_used: String,
}

impl ReceiptBody {
    fn from_confirmed(tx: &ConfirmedTx) -> Self {
        Self {
            block_number: tx.block_number,
            gas_used: tx.gas_used.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignResponse {
    pub success: bool,
    pub transaction_hash: String,
    /// Ledger-assigned id, or null when the creation event was not found
    /// in the receipt. Absence of the event is not an error.
    pub campaign_id: Option<String>,
    pub receipt: ReceiptBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    pub success: bool,
    pub transaction_hash: String,
    pub receipt: ReceiptBody,
}

impl WriteResponse {
    fn from_confirmed(confirmed: &ConfirmedTx) -> Self {
        Self {
            success: true,
            transaction_hash: confirmed.tx_hash.to_string(),
            receipt: ReceiptBody::from_confirmed(confirmed),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// A body the Json extractor rejected (bad JSON, wrong types) is a
/// validation failure, not a server error.
fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}

/// Optional token field. Absent or empty means native currency; anything
/// else must parse as an address.
fn parse_token(token: Option<&str>) -> Result<Option<Address>, ApiError> {
    match token.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<Address>().map(Some).map_err(|e| {
            ApiError::Validation(format!("Invalid token address '{}': {}", raw, e))
        }),
    }
}

fn require_campaign_id(id: Option<Amount>, message: &str) -> Result<U256, ApiError> {
    id.map(|a| a.0)
        .ok_or_else(|| ApiError::Validation(message.to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        contract_address: state.contract_address.to_string(),
    })
}

/// GET /campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> ApiResult<CampaignListResponse> {
    let campaigns = state.aggregator.list().await?;
    let total = campaigns.len();
    Ok(Json(CampaignListResponse { campaigns, total }))
}

/// POST /campaigns
///
/// All four fields are required; an empty or zero value counts as missing.
pub async fn create_campaign(
    State(state): State<AppState>,
    payload: Result<Json<CreateCampaignRequest>, JsonRejection>,
) -> ApiResult<CreateCampaignResponse> {
    let Json(req) = payload.map_err(bad_body)?;

    let goal_amount = req.goal_amount.map(|a| a.0).filter(|v| !v.is_zero());
    let deadline = req.deadline.map(|a| a.0).filter(|v| !v.is_zero());
    let title = req.title.filter(|t| !t.is_empty());
    let description = req.description.filter(|d| !d.is_empty());

    let (goal_amount, deadline, title, description) =
        match (goal_amount, deadline, title, description) {
            (Some(g), Some(d), Some(t), Some(desc)) => (g, d, t, desc),
            _ => {
                return Err(ApiError::Validation(
                    "Missing required fields: goalAmount, deadline, title, description"
                        .to_string(),
                ))
            }
        };

    let confirmed = state
        .orchestrator
        .submit_and_confirm(WriteOp::CreateCampaign {
            goal_amount,
            deadline,
            title,
            description,
        })
        .await?;

    let campaign_id = first_event::<Crowdfund::CampaignCreated>(&confirmed.logs)
        .map(|event| event.id.to_string());
    if campaign_id.is_none() {
        tracing::warn!(tx_hash = %confirmed.tx_hash, "No CampaignCreated event in receipt");
    }

    Ok(Json(CreateCampaignResponse {
        success: true,
        transaction_hash: confirmed.tx_hash.to_string(),
        campaign_id,
        receipt: ReceiptBody::from_confirmed(&confirmed),
    }))
}

/// POST /contribute
///
/// `campaignId` and `amount` are required but zero is a legal value for
/// both. A present `token` selects the token path with the amount as a call
/// argument; otherwise the amount rides along as transferred value.
pub async fn contribute(
    State(state): State<AppState>,
    payload: Result<Json<ContributeRequest>, JsonRejection>,
) -> ApiResult<WriteResponse> {
    let Json(req) = payload.map_err(bad_body)?;

    let (campaign_id, amount) = match (req.campaign_id, req.amount) {
        (Some(id), Some(amount)) => (id.0, amount.0),
        _ => {
            return Err(ApiError::Validation(
                "Missing required fields: campaignId, amount".to_string(),
            ))
        }
    };

    let op = match parse_token(req.token.as_deref())? {
        Some(token) => WriteOp::ContributeToken {
            campaign_id,
            token,
            amount,
        },
        None => WriteOp::ContributeNative {
            campaign_id,
            amount,
        },
    };

    let confirmed = state.orchestrator.submit_and_confirm(op).await?;
    Ok(Json(WriteResponse::from_confirmed(&confirmed)))
}

/// POST /refund
///
/// `token` defaults to the native-currency sentinel address when absent.
pub async fn refund(
    State(state): State<AppState>,
    payload: Result<Json<RefundRequest>, JsonRejection>,
) -> ApiResult<WriteResponse> {
    let Json(req) = payload.map_err(bad_body)?;

    let campaign_id =
        require_campaign_id(req.campaign_id, "Missing required field: campaignId")?;
    let token = parse_token(req.token.as_deref())?.unwrap_or(NATIVE_TOKEN);

    let confirmed = state
        .orchestrator
        .submit_and_confirm(WriteOp::Refund { campaign_id, token })
        .await?;
    Ok(Json(WriteResponse::from_confirmed(&confirmed)))
}

/// POST /withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    payload: Result<Json<WithdrawRequest>, JsonRejection>,
) -> ApiResult<WriteResponse> {
    let Json(req) = payload.map_err(bad_body)?;

    let campaign_id =
        require_campaign_id(req.campaign_id, "Missing required field: campaignId")?;

    let confirmed = state
        .orchestrator
        .submit_and_confirm(WriteOp::Withdraw { campaign_id })
        .await?;
    Ok(Json(WriteResponse::from_confirmed(&confirmed)))
}
