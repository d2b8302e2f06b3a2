//! Campaign list assembly.

use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::campaigns::types::Campaign;
use crate::ledger::{CampaignLedger, LedgerError, LedgerResult, NATIVE_TOKEN};

/// Assembles the full campaign list from per-index contract reads.
pub struct CampaignAggregator {
    ledger: Arc<dyn CampaignLedger>,
}

impl CampaignAggregator {
    pub fn new(ledger: Arc<dyn CampaignLedger>) -> Self {
        Self { ledger }
    }

    /// List every campaign, ordered by id ascending.
    ///
    /// One count read, then two reads per index: the stored record and the
    /// native-currency raised total. The per-index reads are independent
    /// and run concurrently, but results are joined in index order, so the
    /// output position always equals the campaign id regardless of which
    /// read completes first.
    ///
    /// Any failed read fails the whole listing. The campaign set is
    /// presented as a consistent whole or not at all.
    pub async fn list(&self) -> LedgerResult<Vec<Campaign>> {
        let total = self
            .ledger
            .total_campaigns()
            .await
            .map_err(|e| LedgerError::Aggregation(Box::new(e)))?;

        tracing::debug!(total, "Aggregating campaign list");

        let fetches = (0..total).map(|id| {
            let ledger = Arc::clone(&self.ledger);
            async move {
                let (record, raised) = tokio::try_join!(
                    ledger.campaign(id),
                    ledger.total_raised(id, NATIVE_TOKEN)
                )?;
                Ok::<_, LedgerError>(Campaign::from_record(id, record, raised))
            }
        });

        try_join_all(fetches)
            .await
            .map_err(|e| LedgerError::Aggregation(Box::new(e)))
    }
}
