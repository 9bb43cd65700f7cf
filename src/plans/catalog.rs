use reqwest::Client;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::plans::model::{normalize_plan, Plan};

/// Client for the external plans API.
pub struct PlansApi {
    base_url: String,
    client: Client,
}

impl PlansApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        PlansApi { base_url: base_url.into(), client: Client::new() }
    }

    /// `GET {base}/api/plans`, normalized. Records the API can't describe
    /// usefully are skipped, not fatal.
    pub async fn fetch_plans(&self) -> Result<Vec<Plan>> {
        let res = self
            .client
            .get(format!("{}/api/plans", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        let body: Value = res.json().await?;
        Ok(parse_plans_payload(&body))
    }

    /// `GET {base}/api/plans/{id}`.
    pub async fn fetch_plan(&self, id: &str) -> Result<Plan> {
        let res = self
            .client
            .get(format!("{}/api/plans/{}", self.base_url, id))
            .send()
            .await?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound("plan".to_string()));
        }
        let body: Value = res.error_for_status()?.json().await?;
        parse_plan_payload(&body)
    }
}

/// The list endpoint answers either `{ "plans": [...] }` or a bare array.
fn parse_plans_payload(body: &Value) -> Vec<Plan> {
    let items = body
        .get("plans")
        .and_then(Value::as_array)
        .or_else(|| body.as_array());
    let Some(items) = items else {
        log::warn!("plans payload had no recognizable list");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let plan = normalize_plan(item);
            if plan.is_none() {
                log::warn!("skipping unparseable plan record: {item}");
            }
            plan
        })
        .collect()
}

/// The detail endpoint answers either `{ "plan": {...} }` or the bare object.
fn parse_plan_payload(body: &Value) -> Result<Plan> {
    let doc = body.get("plan").unwrap_or(body);
    normalize_plan(doc).ok_or_else(|| Error::collaborator("Plan data is empty"))
}
