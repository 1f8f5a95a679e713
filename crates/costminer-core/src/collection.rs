//! Read-only container of billing records
//!
//! A [`BillingCollection`] is an ordered view over a shared, immutable arena of
//! [`BillingRecord`]s. Filtering and grouping never copy or mutate records:
//! they build new index vectors over the same arena. This keeps every derived
//! collection cheap to create and lets errors cite a record by its position in
//! the imported data.
//!
//! Aggregates are exact `Decimal` sums. Nothing here rounds, so the sum of the
//! group totals of any partition equals the parent total.
//!
//! # Examples
//!
//! ```
//! use costminer_core::collection::BillingCollection;
//! use costminer_core::types::{BillingRecord, PricingModel};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> costminer_core::Result<()> {
//! let billing = BillingCollection::new(vec![
//!     BillingRecord::instance("m5.large", PricingModel::OnDemand, Decimal::from(10), Decimal::from(5)),
//!     BillingRecord::instance("m5.large", PricingModel::Spot, Decimal::from(6), Decimal::from(4)),
//!     BillingRecord::service("AmazonS3", Decimal::from(3), Decimal::ZERO),
//! ])?;
//!
//! let instances = billing.filter(|r| r.is_instance());
//! assert_eq!(instances.total_cost(), Decimal::from(16));
//!
//! let by_type = instances.group_by("instance type", |r| r.resource_type.clone())?;
//! assert_eq!(by_type.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::error::{CostMinerError, Result};
use crate::types::BillingRecord;
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Immutable, ordered set of billing records
#[derive(Debug, Clone)]
pub struct BillingCollection {
    records: Arc<[BillingRecord]>,
    indices: Vec<usize>,
}

impl BillingCollection {
    /// Build a collection, validating every record
    ///
    /// # Errors
    ///
    /// Returns [`CostMinerError::InvalidRecord`] for the first record that
    /// breaks a data-model invariant.
    pub fn new(records: Vec<BillingRecord>) -> Result<Self> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| CostMinerError::InvalidRecord { index, reason })?;
        }

        debug!("Built billing collection with {} records", records.len());
        let indices = (0..records.len()).collect();
        Ok(Self {
            records: records.into(),
            indices,
        })
    }

    /// A collection with no records
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            indices: Vec::new(),
        }
    }

    fn with_indices(&self, indices: Vec<usize>) -> Self {
        Self {
            records: Arc::clone(&self.records),
            indices,
        }
    }

    /// Number of records in this collection
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the collection has no records
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the records in order
    pub fn iter(&self) -> impl Iterator<Item = &BillingRecord> + '_ {
        self.indices.iter().map(|&i| &self.records[i])
    }

    /// Iterate over `(original position, record)` pairs in order
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &BillingRecord)> + '_ {
        self.indices.iter().map(|&i| (i, &self.records[i]))
    }

    /// New collection with only the records matching `predicate`, in the
    /// same relative order
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&BillingRecord) -> bool,
    {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| predicate(&self.records[i]))
            .collect();
        self.with_indices(indices)
    }

    /// Partition the records by a key derived from each record
    ///
    /// `key_of` returns `None` when a record does not carry the attribute the
    /// key is built from. Grouping is only meaningful after filtering to the
    /// records that have it, so that case is an error naming `attribute`.
    ///
    /// Every record ends up in exactly one group. Groups are ordered by the
    /// first record that produced their key.
    ///
    /// # Errors
    ///
    /// Returns [`CostMinerError::MissingAttribute`] for the first record
    /// without a key.
    pub fn group_by<K, F>(&self, attribute: &'static str, key_of: F) -> Result<Groups<K>>
    where
        K: Eq + Hash + Clone,
        F: Fn(&BillingRecord) -> Option<K>,
    {
        let mut positions: HashMap<K, usize> = HashMap::new();
        let mut buckets: Vec<(K, Vec<usize>)> = Vec::new();

        for (index, record) in self.iter_indexed() {
            let key = key_of(record).ok_or(CostMinerError::MissingAttribute { index, attribute })?;
            match positions.get(&key) {
                Some(&slot) => buckets[slot].1.push(index),
                None => {
                    positions.insert(key.clone(), buckets.len());
                    buckets.push((key, vec![index]));
                }
            }
        }

        debug!("Grouped {} records by {} into {} groups", self.len(), attribute, buckets.len());
        Ok(Groups {
            entries: buckets
                .into_iter()
                .map(|(key, indices)| (key, self.with_indices(indices)))
                .collect(),
        })
    }

    /// Sum of the member costs, zero when empty
    pub fn total_cost(&self) -> Decimal {
        self.iter().map(|r| r.cost).sum()
    }

    /// Sum of the member hours, zero when empty
    pub fn total_hours_used(&self) -> Decimal {
        self.iter().map(|r| r.hours_used).sum()
    }
}

impl Default for BillingCollection {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result of [`BillingCollection::group_by`]: sub-collections keyed by the
/// grouping key
#[derive(Debug, Clone)]
pub struct Groups<K> {
    entries: Vec<(K, BillingCollection)>,
}

impl<K> Groups<K>
where
    K: Eq + Send + Sync,
{
    /// Number of groups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sub-collection for `key`, if any record produced it
    pub fn get(&self, key: &K) -> Option<&BillingCollection> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    /// Iterate over `(key, sub-collection)` pairs in the current order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &BillingCollection)> + '_ {
        self.entries.iter().map(|(k, c)| (k, c))
    }

    /// Iterate over the keys in the current order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Sum of every group's total cost
    pub fn total_cost(&self) -> Decimal {
        self.entries.iter().map(|(_, c)| c.total_cost()).sum()
    }

    /// Reorder groups by descending total cost
    ///
    /// Totals are computed in parallel; the order comes from a stable sort
    /// applied afterwards, so groups with equal totals keep their
    /// first-encountered order.
    pub fn sorted_by_total_cost_desc(self) -> Self {
        let totals: Vec<Decimal> = self
            .entries
            .par_iter()
            .map(|(_, collection)| collection.total_cost())
            .collect();

        let mut ranked: Vec<(Decimal, (K, BillingCollection))> =
            totals.into_iter().zip(self.entries).collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        Self {
            entries: ranked.into_iter().map(|(_, entry)| entry).collect(),
        }
    }
}

impl<K> IntoIterator for Groups<K> {
    type Item = (K, BillingCollection);
    type IntoIter = std::vec::IntoIter<(K, BillingCollection)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PricingModel, ResourceType, ServiceCode};
    use rust_decimal_macros::dec;

    fn sample() -> BillingCollection {
        BillingCollection::new(vec![
            BillingRecord::instance("m5.large", PricingModel::OnDemand, dec!(10), dec!(5)),
            BillingRecord::service("AmazonS3", dec!(1.10), dec!(0)),
            BillingRecord::instance("t3.micro", PricingModel::Spot, dec!(2), dec!(8)),
            BillingRecord::instance("m5.large", PricingModel::Spot, dec!(6), dec!(4)),
            BillingRecord::service("AmazonS3", dec!(0.15), dec!(0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_record_with_index() {
        let mut bad = BillingRecord::service("AmazonS3", dec!(1), dec!(0));
        bad.pricing_model = Some(PricingModel::Spot);

        let err = BillingCollection::new(vec![
            BillingRecord::service("AmazonS3", dec!(1), dec!(0)),
            bad,
        ])
        .unwrap_err();
        match err {
            CostMinerError::InvalidRecord { index, .. } => assert_eq!(index, 1),
            other => panic!("Expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_collection_totals_are_zero() {
        let empty = BillingCollection::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.total_cost(), Decimal::ZERO);
        assert_eq!(empty.total_hours_used(), Decimal::ZERO);
        assert!(empty.group_by("service", |r| Some(r.service.clone())).unwrap().is_empty());
    }

    #[test]
    fn test_totals_are_exact() {
        let billing = sample();
        assert_eq!(billing.total_cost(), dec!(19.25));
        assert_eq!(billing.total_hours_used(), dec!(17));
    }

    #[test]
    fn test_filter_preserves_order_and_source() {
        let billing = sample();
        let instances = billing.filter(|r| r.is_instance());

        let types: Vec<&str> = instances
            .iter()
            .filter_map(|r| r.resource_type.as_ref().map(|t| t.as_str()))
            .collect();
        assert_eq!(types, vec!["m5.large", "t3.micro", "m5.large"]);
        assert_eq!(billing.len(), 5);

        let positions: Vec<usize> = instances.iter_indexed().map(|(i, _)| i).collect();
        assert_eq!(positions, vec![0, 2, 3]);
    }

    #[test]
    fn test_filter_identity() {
        let billing = sample();
        let all = billing.filter(|_| true);
        assert_eq!(all.len(), billing.len());
        assert_eq!(all.total_cost(), billing.total_cost());
        assert_eq!(all.total_hours_used(), billing.total_hours_used());
    }

    #[test]
    fn test_group_by_partitions_in_first_encounter_order() {
        let billing = sample();
        let groups = billing.group_by("service", |r| Some(r.service.clone())).unwrap();

        let keys: Vec<&str> = groups.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["AmazonEC2", "AmazonS3"]);
        assert_eq!(groups.get(&ServiceCode::new("AmazonEC2")).unwrap().len(), 3);
        assert_eq!(groups.get(&ServiceCode::new("AmazonS3")).unwrap().len(), 2);
        assert!(groups.get(&ServiceCode::new("AmazonRDS")).is_none());

        let members: usize = groups.iter().map(|(_, c)| c.len()).sum();
        assert_eq!(members, billing.len());
        assert_eq!(groups.total_cost(), billing.total_cost());
    }

    #[test]
    fn test_group_by_missing_attribute() {
        let billing = sample();
        let err = billing
            .group_by("instance type", |r| r.resource_type.clone())
            .unwrap_err();
        match err {
            CostMinerError::MissingAttribute { index, attribute } => {
                assert_eq!(index, 1);
                assert_eq!(attribute, "instance type");
            }
            other => panic!("Expected MissingAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_sorted_by_total_cost_desc_is_stable() {
        let billing = BillingCollection::new(vec![
            BillingRecord::instance("c5.xlarge", PricingModel::OnDemand, dec!(3), dec!(1)),
            BillingRecord::instance("m5.large", PricingModel::OnDemand, dec!(7), dec!(1)),
            BillingRecord::instance("t3.micro", PricingModel::OnDemand, dec!(3), dec!(1)),
            BillingRecord::instance("r5.large", PricingModel::Reserved, dec!(1.5), dec!(1)),
            BillingRecord::instance("r5.large", PricingModel::Spot, dec!(1.5), dec!(1)),
        ])
        .unwrap();

        let sorted = billing
            .group_by("instance type", |r| r.resource_type.clone())
            .unwrap()
            .sorted_by_total_cost_desc();
        let keys: Vec<ResourceType> = sorted.into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                ResourceType::new("m5.large"),
                ResourceType::new("c5.xlarge"),
                ResourceType::new("t3.micro"),
                ResourceType::new("r5.large"),
            ]
        );
    }
}
