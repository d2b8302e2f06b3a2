//! Event extraction from confirmed receipts.

use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;

/// Find and decode the first log entry matching event `E`.
///
/// Entries are scanned in the order they appear in the block. Entries that
/// fail to decode are skipped rather than reported: a receipt routinely
/// carries logs from unrelated events or other contracts, and those are
/// expected noise, not failures.
///
/// First match wins. If one transaction emits several events of the same
/// kind (nested calls, for instance), only the first is returned. Known
/// limitation.
pub fn first_event<E: SolEvent>(logs: &[Log]) -> Option<E> {
    logs.iter()
        .find_map(|log| log.log_decode::<E>().ok())
        .map(|decoded| decoded.inner.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::contract::Crowdfund;
    use alloy::primitives::{Address, Log as PrimitiveLog, LogData, U256};

    fn created_log(id: u64) -> Log {
        let event = Crowdfund::CampaignCreated {
            id: U256::from(id),
            owner: Address::ZERO,
            goalAmount: U256::from(1000u64),
            deadline: U256::from(1_999_999_999u64),
        };
        Log {
            inner: PrimitiveLog {
                address: Address::ZERO,
                data: event.encode_log_data(),
            },
            ..Default::default()
        }
    }

    fn unrelated_log() -> Log {
        Log {
            inner: PrimitiveLog {
                address: Address::ZERO,
                data: LogData::new_unchecked(Vec::new(), Default::default()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_decodes_matching_entry() {
        let logs = vec![created_log(4)];
        let event = first_event::<Crowdfund::CampaignCreated>(&logs).unwrap();
        assert_eq!(event.id, U256::from(4u64));
    }

    #[test]
    fn test_skips_unrelated_entries() {
        let logs = vec![unrelated_log(), created_log(3)];
        let event = first_event::<Crowdfund::CampaignCreated>(&logs).unwrap();
        assert_eq!(event.id, U256::from(3u64));
    }

    #[test]
    fn test_first_match_wins() {
        let logs = vec![created_log(7), created_log(9)];
        let event = first_event::<Crowdfund::CampaignCreated>(&logs).unwrap();
        assert_eq!(event.id, U256::from(7u64));
    }

    #[test]
    fn test_absent_event_is_none() {
        let logs = vec![unrelated_log()];
        assert!(first_event::<Crowdfund::CampaignCreated>(&logs).is_none());
        assert!(first_event::<Crowdfund::CampaignCreated>(&[]).is_none());
    }
}
