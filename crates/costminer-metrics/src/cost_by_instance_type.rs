//! Cost and hours per instance type, split by pricing model
//!
//! For every instance type (most expensive first) the section has one row per
//! pricing model, including models with no usage, followed by a `Total` row.
//! Percentages are shares of the instance type's own totals.

use crate::metric::{Metric, MetricResult, MetricValue};
use costminer_core::{
    BillingCollection, Hours, Money, Percent, PricingModel, ResourceType, Result,
};
use rust_decimal::Decimal;
use tracing::debug;

const INSTANCE_TYPE: &str = "Instance Type";
const PRICING_MODEL: &str = "Pricing Model";
const HOURS: &str = "Hours";
const HOURS_PERCENT: &str = "Hours %";
const COST: &str = "Cost";
const COST_PERCENT: &str = "Cost %";

/// Cost by Instance Type
#[derive(Debug, Default, Clone, Copy)]
pub struct CostByInstanceTypeMetric;

impl CostByInstanceTypeMetric {
    fn pricing_model_row(
        instance_type: &ResourceType,
        pricing_model: PricingModel,
        group: &BillingCollection,
        group_hours: Decimal,
        group_cost: Decimal,
    ) -> Vec<MetricValue> {
        let billing = group.filter(|r| r.pricing_model == Some(pricing_model));
        let hours = billing.total_hours_used();
        let cost = billing.total_cost();

        vec![
            MetricValue::new(INSTANCE_TYPE, instance_type),
            MetricValue::new(PRICING_MODEL, pricing_model),
            MetricValue::new(HOURS, Hours(hours)),
            MetricValue::new(HOURS_PERCENT, Percent::of(hours, group_hours)),
            MetricValue::new(COST, Money::from(cost)),
            MetricValue::new(COST_PERCENT, Percent::of(cost, group_cost)),
        ]
    }

    fn total_row(
        instance_type: &ResourceType,
        group_hours: Decimal,
        group_cost: Decimal,
    ) -> Vec<MetricValue> {
        vec![
            MetricValue::new(INSTANCE_TYPE, instance_type),
            MetricValue::new(PRICING_MODEL, "Total"),
            MetricValue::new(HOURS, Hours(group_hours)),
            MetricValue::new(HOURS_PERCENT, Percent::full()),
            MetricValue::new(COST, Money::from(group_cost)),
            MetricValue::new(COST_PERCENT, Percent::full()),
        ]
    }
}

impl Metric for CostByInstanceTypeMetric {
    fn name(&self) -> &'static str {
        "cost-by-instance-type"
    }

    fn description(&self) -> &str {
        "Cost by Instance Type"
    }

    fn calculate_metric(&self, billing: &BillingCollection) -> Result<MetricResult> {
        let instances = billing.filter(|r| r.is_instance());
        let by_instance_type = instances
            .group_by("instance type", |r| r.resource_type.clone())?
            .sorted_by_total_cost_desc();

        debug!(
            "{} instance records across {} instance types",
            instances.len(),
            by_instance_type.len()
        );

        let mut rows = Vec::with_capacity(by_instance_type.len() * (PricingModel::ALL.len() + 1));
        for (instance_type, group) in by_instance_type {
            let group_hours = group.total_hours_used();
            let group_cost = group.total_cost();

            for pricing_model in PricingModel::ALL {
                rows.push(Self::pricing_model_row(
                    &instance_type,
                    pricing_model,
                    &group,
                    group_hours,
                    group_cost,
                ));
            }
            rows.push(Self::total_row(&instance_type, group_hours, group_cost));
        }

        MetricResult::new(self.description(), rows)
    }
}
