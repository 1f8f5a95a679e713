//! Instance cost and hours per pricing model
//!
//! Percentages are shares of all instance usage. Instance records that carry
//! no pricing model only show up in the `Total` row.

use crate::metric::{Metric, MetricResult, MetricValue};
use costminer_core::{BillingCollection, Hours, Money, Percent, PricingModel, Result};

/// Cost by Pricing Model
#[derive(Debug, Default, Clone, Copy)]
pub struct CostByPricingModelMetric;

impl Metric for CostByPricingModelMetric {
    fn name(&self) -> &'static str {
        "cost-by-pricing-model"
    }

    fn description(&self) -> &str {
        "Cost by Pricing Model"
    }

    fn calculate_metric(&self, billing: &BillingCollection) -> Result<MetricResult> {
        let instances = billing.filter(|r| r.is_instance());
        if instances.is_empty() {
            return MetricResult::new(self.description(), Vec::new());
        }

        let total_hours = instances.total_hours_used();
        let total_cost = instances.total_cost();

        let mut rows = Vec::with_capacity(PricingModel::ALL.len() + 1);
        for pricing_model in PricingModel::ALL {
            let group = instances.filter(|r| r.pricing_model == Some(pricing_model));
            let hours = group.total_hours_used();
            let cost = group.total_cost();
            rows.push(vec![
                MetricValue::new("Pricing Model", pricing_model),
                MetricValue::new("Hours", Hours(hours)),
                MetricValue::new("Hours %", Percent::of(hours, total_hours)),
                MetricValue::new("Cost", Money::from(cost)),
                MetricValue::new("Cost %", Percent::of(cost, total_cost)),
            ]);
        }
        rows.push(vec![
            MetricValue::new("Pricing Model", "Total"),
            MetricValue::new("Hours", Hours(total_hours)),
            MetricValue::new("Hours %", Percent::full()),
            MetricValue::new("Cost", Money::from(total_cost)),
            MetricValue::new("Cost %", Percent::full()),
        ]);

        MetricResult::new(self.description(), rows)
    }
}
