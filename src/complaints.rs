use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::user::AuthUser;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Technical,
    Billing,
    Connection,
    Speed,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComplaint {
    pub user_id: String,
    pub subject: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}

impl NewComplaint {
    /// Complaint as the help screen files it: defaults to general/medium.
    pub fn from_user(user: &AuthUser, subject: &str, description: &str) -> Self {
        NewComplaint {
            user_id: user.mobile.clone(),
            subject: subject.to_string(),
            description: description.to_string(),
            category: Category::General,
            priority: Priority::Medium,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::validation("User not logged in"));
        }
        if self.subject.trim().is_empty() {
            return Err(Error::validation("Subject is required"));
        }
        if self.description.trim().is_empty() {
            return Err(Error::validation("Description is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintReceipt {
    pub complaint_id: String,
}

pub struct ComplaintsApi {
    base_url: String,
    client: Client,
}

impl ComplaintsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        ComplaintsApi { base_url: base_url.into(), client: Client::new() }
    }

    /// `POST {base}/api/complaints/submit`. The backend answers
    /// `{ success, complaint: { complaint_id } }`, or an error payload whose
    /// `message` is surfaced as-is.
    pub async fn submit(&self, complaint: &NewComplaint) -> Result<ComplaintReceipt> {
        complaint.validate()?;
        let res = self
            .client
            .post(format!("{}/api/complaints/submit", self.base_url))
            .json(complaint)
            .send()
            .await?;
        let status = res.status();
        let body: Value = res.json().await.unwrap_or(Value::Null);
        parse_submit_response(status.is_success(), &body)
    }
}

fn parse_submit_response(http_ok: bool, body: &Value) -> Result<ComplaintReceipt> {
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !http_ok || !success {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Failed to submit complaint");
        return Err(Error::collaborator(message));
    }
    let id = body
        .pointer("/complaint/complaint_id")
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .ok_or_else(|| Error::collaborator("Complaint response had no id"))?;
    Ok(ComplaintReceipt { complaint_id: id })
}
