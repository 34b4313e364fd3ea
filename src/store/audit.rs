//! Audit sink interface
//!
//! Rating changes are recorded per match and keyed by match id. The record
//! is written transactionally as part of the match commit; this seam exists
//! for reading the trail back and for the processor's idempotency check.

use crate::types::{MatchId, RatingAuditRecord};
use async_trait::async_trait;

/// Trait for the rating-change audit trail
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Look up the audit record for a match, if it was ever processed
    async fn find_rating_change(
        &self,
        match_id: &MatchId,
    ) -> crate::error::Result<Option<RatingAuditRecord>>;

    /// Record a rating change outside a match commit
    ///
    /// Most records arrive through `PlayerStore::apply_match`; this entry
    /// point backfills or repairs the trail.
    async fn record_rating_change(&self, record: RatingAuditRecord) -> crate::error::Result<()>;
}
