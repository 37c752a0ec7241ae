//! Cost Explorer adapter

use super::service_error;
use crate::cost::{
    CostExplorerApi, CostRequest, CostResult, CostTotal, Dimension, FilterExpression, Granularity,
    MetricValue, ResultByTime, TimePeriod, UNBLENDED_COST, USD,
};
use crate::sources::ServiceError;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_costexplorer::types::{
    DateInterval, Dimension as CeDimension, DimensionValues as CeDimensionValues, Expression,
    Granularity as CeGranularity, ResultByTime as CeResultByTime,
};
use aws_sdk_costexplorer::Client;

pub struct CostExplorerClient {
    client: Client,
}

impl CostExplorerClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_dimension(dimension: Dimension) -> CeDimension {
    match dimension {
        Dimension::RecordType => CeDimension::RecordType,
        Dimension::LinkedAccount => CeDimension::LinkedAccount,
    }
}

fn to_granularity(granularity: Granularity) -> CeGranularity {
    match granularity {
        Granularity::Monthly => CeGranularity::Monthly,
    }
}

fn to_expression(filter: &FilterExpression) -> Expression {
    match filter {
        FilterExpression::Not(inner) => Expression::builder().not(to_expression(inner)).build(),
        FilterExpression::And(clauses) => Expression::builder()
            .set_and(Some(clauses.iter().map(to_expression).collect()))
            .build(),
        FilterExpression::Dimensions(dim) => Expression::builder()
            .dimensions(
                CeDimensionValues::builder()
                    .key(to_dimension(dim.key))
                    .set_values(Some(dim.values.clone()))
                    .build(),
            )
            .build(),
    }
}

/// Convert one SDK bucket; a bucket without the metric reports zero.
fn from_result(result: &CeResultByTime, request: &CostRequest) -> ResultByTime {
    let time_period = result
        .time_period()
        .map(|p| TimePeriod {
            start: p.start().to_string(),
            end: p.end().to_string(),
        })
        .unwrap_or_else(|| request.period.time_period());

    let unblended_cost = result
        .total()
        .and_then(|total| total.get(UNBLENDED_COST))
        .map(|metric| MetricValue {
            amount: metric.amount().unwrap_or("0").to_string(),
            unit: metric.unit().unwrap_or(USD).to_string(),
        })
        .unwrap_or_else(|| MetricValue {
            amount: "0".to_string(),
            unit: USD.to_string(),
        });

    ResultByTime {
        time_period,
        total: CostTotal { unblended_cost },
    }
}

#[async_trait]
impl CostExplorerApi for CostExplorerClient {
    async fn get_cost_and_usage(&self, request: &CostRequest) -> Result<CostResult, ServiceError> {
        let interval = DateInterval::builder()
            .start(request.period.start_str())
            .end(request.period.end_str())
            .build()
            .map_err(|e| service_error("GetCostAndUsage", e))?;
        let filter = to_expression(&request.filter);

        let mut results_by_time = Vec::new();
        let mut next_page_token = None;

        loop {
            let output = self
                .client
                .get_cost_and_usage()
                .time_period(interval.clone())
                .granularity(to_granularity(request.granularity))
                .set_metrics(Some(request.metrics.clone()))
                .filter(filter.clone())
                .set_next_page_token(next_page_token.take())
                .send()
                .await
                .map_err(|e| service_error("GetCostAndUsage", e))?;

            results_by_time.extend(
                output
                    .results_by_time()
                    .iter()
                    .map(|result| from_result(result, request)),
            );

            match output.next_page_token() {
                Some(token) if !token.is_empty() => next_page_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(CostResult { results_by_time })
    }
}
