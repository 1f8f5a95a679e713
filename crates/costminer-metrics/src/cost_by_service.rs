//! Cost per service, most expensive first

use crate::metric::{Metric, MetricResult, MetricValue};
use costminer_core::{BillingCollection, Money, Percent, Result};

/// Cost by Service
#[derive(Debug, Default, Clone, Copy)]
pub struct CostByServiceMetric;

impl Metric for CostByServiceMetric {
    fn name(&self) -> &'static str {
        "cost-by-service"
    }

    fn description(&self) -> &str {
        "Cost by Service"
    }

    fn calculate_metric(&self, billing: &BillingCollection) -> Result<MetricResult> {
        let total_cost = billing.total_cost();
        let by_service = billing
            .group_by("service", |r| Some(r.service.clone()))?
            .sorted_by_total_cost_desc();

        let mut rows = Vec::with_capacity(by_service.len() + 1);
        for (service, group) in by_service {
            let cost = group.total_cost();
            rows.push(vec![
                MetricValue::new("Service", service),
                MetricValue::new("Cost", Money::from(cost)),
                MetricValue::new("Cost %", Percent::of(cost, total_cost)),
            ]);
        }

        if !billing.is_empty() {
            rows.push(vec![
                MetricValue::new("Service", "Total"),
                MetricValue::new("Cost", Money::from(total_cost)),
                MetricValue::new("Cost %", Percent::full()),
            ]);
        }

        MetricResult::new(self.description(), rows)
    }
}
