//! Client-facing campaign projection.

use alloy::primitives::U256;
use serde::Serialize;

use crate::ledger::CampaignRecord;

/// Normalized view of one campaign, assembled fresh on every list request.
///
/// `id` is the campaign's position in the contract's enumeration order:
/// 0-indexed and contiguous, since campaigns are only ever marked withdrawn,
/// never deleted. Amounts are decimal strings to avoid precision loss on
/// 256-bit values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: u64,
    pub owner: String,
    pub goal_amount: String,
    pub deadline: String,
    pub title: String,
    pub description: String,
    /// Native-currency contributions only. Token contributions are tracked
    /// by the contract but not reflected in this figure.
    pub raised_amount: String,
    pub withdrawn: bool,
}

impl Campaign {
    /// Combine the stored record with the separately read raised total.
    pub fn from_record(id: u64, record: CampaignRecord, raised: U256) -> Self {
        Self {
            id,
            owner: record.owner.to_string(),
            goal_amount: record.goal_amount.to_string(),
            deadline: record.deadline.to_string(),
            title: record.title,
            description: record.description,
            raised_amount: raised.to_string(),
            withdrawn: record.withdrawn,
        }
    }
}
