use roost_core::model::QuotaRecord;
use roost_core::store::CacheStore;
use roost_core::{Config, Error, Result};
use twitter_api_client::RateLimit;

use crate::util::timestamp_seconds;

const PERCENT: f64 = 100.0;

/// Tracks the shared per-company call budget against the upstream rate-limit
/// window. Advisory only: two concurrent requests can read the same record
/// before either writes an update.
pub(crate) struct QuotaGuard<'a, S> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: CacheStore> QuotaGuard<'a, S> {
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        QuotaGuard { store, config }
    }

    /// Pre-check before an upstream call. Allows when no record exists, when
    /// budget remains, or when the window has already rolled over.
    pub async fn check(&self, company_id: &str) -> Result<()> {
        let record = match self.store.quota(company_id).await {
            Ok(record) => record,
            Err(error) => {
                // A failed quota read must not take the request down with it.
                tracing::warn!("Cannot read quota record for company {}: {}", company_id, error);
                return Ok(());
            }
        };
        match record {
            Some(quota) if quota.remaining <= 0 && quota.reset_ts >= timestamp_seconds() => Err(Error::QuotaExceeded),
            _ => Ok(()),
        }
    }

    /// Persist the quota metadata of an upstream interaction and emit usage
    /// warnings. When the vendor itself rejected the call (`throttled`), its
    /// budget is authoritative zero no matter what the headers said.
    pub async fn record(&self, company_id: &str, rate_limit: Option<&RateLimit>, throttled: bool) {
        self.log_usage(company_id, rate_limit);

        let Some(rate_limit) = rate_limit else { return };
        if !rate_limit.valid {
            return;
        }
        let record = QuotaRecord {
            remaining: if throttled { 0 } else { rate_limit.remaining },
            reset_ts: rate_limit.reset,
        };
        if let Err(error) = self.store.save_quota(company_id, &record).await {
            tracing::warn!("Cannot save quota record for company {}: {}", company_id, error);
        }
    }

    fn log_usage(&self, company_id: &str, rate_limit: Option<&RateLimit>) {
        let Some(rate_limit) = rate_limit.filter(|r| r.valid && r.limit > 0) else {
            tracing::warn!("Missing rate limit headers for company: {}", company_id);
            return;
        };
        let remaining = rate_limit.remaining as f64;
        let total = rate_limit.limit as f64;
        if remaining < total * self.config.quota_severe_pct {
            tracing::warn!(
                "Current quota usage above {}% for company: {}",
                (1.0 - self.config.quota_severe_pct) * PERCENT,
                company_id
            );
        } else if remaining < total * self.config.quota_normal_pct {
            tracing::warn!(
                "Current quota usage above {}% for company: {}",
                (1.0 - self.config.quota_normal_pct) * PERCENT,
                company_id
            );
        }
    }
}
