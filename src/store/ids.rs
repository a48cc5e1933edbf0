//! Id assignment

use serde::{Deserialize, Serialize};

use super::config::IdPolicy;
use crate::product::{Product, ProductId};

/// Contents of the sidecar file used by `IdPolicy::Monotonic`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMeta {
    /// Highest id ever issued by this store
    pub last_id: ProductId,
}

/// Picks the id for the next record.
///
/// `last_issued` is only consulted by the monotonic policy. Taking the max
/// with the live ids keeps the result unique even when the sidecar is
/// missing or older than the data file.
///
/// Returns `None` once `ProductId::MAX` has been issued.
pub fn next_id(
    policy: IdPolicy,
    products: &[Product],
    last_issued: ProductId,
) -> Option<ProductId> {
    let max_live = products.iter().map(|p| p.id).max().unwrap_or(0);
    match policy {
        IdPolicy::MaxPlusOne => max_live.checked_add(1),
        IdPolicy::Monotonic => max_live.max(last_issued).checked_add(1),
    }
}
