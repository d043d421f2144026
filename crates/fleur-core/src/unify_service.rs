//! Merges order and request rows into one consistently-ordered collection.

use std::cmp::Reverse;
use std::collections::HashSet;

use fleur_domain::record::FulfillmentRecord;
use fleur_domain::rows::{OrderRow, RequestRow};

pub struct UnifyService;

impl UnifyService {
    /// Unifies raw store rows into fulfillment records.
    pub fn unify(orders: Vec<OrderRow>, requests: Vec<RequestRow>) -> Vec<FulfillmentRecord> {
        Self::unify_records(
            orders.into_iter().map(Into::into).collect(),
            requests.into_iter().map(Into::into).collect(),
        )
    }

    /// Core merge: an order spawned from a request supersedes that request,
    /// so the bare request is suppressed. Output is sorted newest-first; the
    /// sort is stable, so equal timestamps keep insertion order (orders
    /// before surviving requests).
    pub fn unify_records(
        orders: Vec<FulfillmentRecord>,
        requests: Vec<FulfillmentRecord>,
    ) -> Vec<FulfillmentRecord> {
        let superseded: HashSet<String> = orders
            .iter()
            .filter_map(|order| order.linked_id.clone())
            .collect();

        let mut merged = orders;
        merged.extend(
            requests
                .into_iter()
                .filter(|request| !superseded.contains(&request.id)),
        );
        merged.sort_by_key(|record| Reverse(record.created_at));
        merged
    }
}
