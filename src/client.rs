// File: ./src/client.rs
use crate::batch::convert_batch;
use crate::model::wire::DatesResponse;
use crate::model::{Conversion, DateTriple, Direction};
use anyhow::Result;
use serde_json::json;
use std::time::Duration;

/// Client for the saralpatro GraphQL conversion service.
///
/// Endpoint and timeout are fixed at construction so the rest of the code
/// never reaches for ambient globals, and tests can point it at a mock server.
#[derive(Clone, Debug)]
pub struct PatroClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PatroClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    /// Convert a single date. Every failure mode collapses into the outcome
    /// type: transport errors, non-success statuses and malformed bodies are
    /// `Failed`, a reachable service with zero matching dates is `NoMatch`.
    /// Nothing here ever raises into the batch loop.
    pub async fn convert_one(&self, date: DateTriple, direction: Direction) -> Conversion {
        let query = query_for(date, direction);
        let response = match self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query }))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                log::debug!("{}: request failed: {}", date, e);
                return Conversion::Failed(format!("request: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::debug!("{}: service answered {}", date, status);
            return Conversion::Failed(format!("status: {}", status));
        }

        match response.json::<DatesResponse>().await {
            Ok(body) => body.into_conversion(direction),
            Err(e) => {
                log::debug!("{}: undecodable response: {}", date, e);
                Conversion::Failed(format!("decode: {}", e))
            }
        }
    }

    /// Caller-facing batch entry point: converts every date in input order
    /// with at most `max_concurrency` requests in flight.
    pub async fn convert_all(
        &self,
        dates: &[DateTriple],
        direction: Direction,
        max_concurrency: usize,
    ) -> Vec<Option<DateTriple>> {
        convert_batch(
            dates.to_vec(),
            |date| self.convert_one(date, direction),
            max_concurrency,
        )
        .await
    }
}

fn query_for(date: DateTriple, direction: Direction) -> String {
    match direction {
        Direction::AdToBs => format!(
            "{{ dates(adYear: {}, adMonth: {}, adDay: {}) {{ bsYear bsMonth bsDay }} }}",
            date.year, date.month, date.day
        ),
        Direction::BsToAd => format!(
            "{{ dates(bsYear: {}, bsMonth: {}, bsDay: {}) {{ adYear adMonth adDay }} }}",
            date.year, date.month, date.day
        ),
    }
}
