use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::user::{AuthUser, UserProfile};
use crate::config::OtpPolicy;
use crate::error::{Error, Result};

/// The sentinel code the demo variants accept.
pub const DEMO_OTP: &str = "123456";

/// Opaque handle returned by the collaborator when a code is dispatched.
/// Verification happens against this handle, never against a code the app
/// itself holds.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub id: String,
    pub mobile: String,
    pub expires_at: DateTime<Utc>,
}

/// The external auth/OTP collaborator. The app only ever drives this
/// interface; whether codes travel over a phone network or are the demo
/// sentinel is the implementation's business.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn send_code(&self, mobile: &str) -> Result<Confirmation>;
    /// Ok(false) means the entered code did not match; transport and expiry
    /// problems are errors.
    async fn verify_code(&self, confirmation: &Confirmation, code: &str) -> Result<bool>;
    async fn register(&self, profile: &UserProfile) -> Result<AuthUser>;
    async fn fetch_user(&self, mobile: &str) -> Result<AuthUser>;
}

fn expired(confirmation: &Confirmation) -> bool {
    Utc::now() > confirmation.expires_at
}

/// Demo collaborator: no network, fixed code, users held in memory.
pub struct DemoProvider {
    policy: OtpPolicy,
    users: Mutex<HashMap<String, (UserProfile, DateTime<Utc>)>>,
}

impl DemoProvider {
    pub fn new(policy: OtpPolicy) -> Self {
        DemoProvider { policy, users: Mutex::new(HashMap::new()) }
    }
}

#[async_trait]
impl AuthProvider for DemoProvider {
    async fn send_code(&self, mobile: &str) -> Result<Confirmation> {
        let confirmation = Confirmation {
            id: format!("otp{}", Uuid::new_v4()),
            mobile: mobile.to_string(),
            expires_at: Utc::now() + Duration::seconds(self.policy.code_ttl_secs),
        };
        log::debug!("demo OTP dispatched for {mobile}");
        Ok(confirmation)
    }

    async fn verify_code(&self, confirmation: &Confirmation, code: &str) -> Result<bool> {
        if expired(confirmation) {
            return Err(Error::collaborator(
                "Verification code expired. Request a new one.",
            ));
        }
        Ok(code == DEMO_OTP)
    }

    async fn register(&self, profile: &UserProfile) -> Result<AuthUser> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&profile.mobile) {
            return Err(Error::collaborator("User already exists"));
        }
        let created_at = Utc::now();
        users.insert(profile.mobile.clone(), (profile.clone(), created_at));
        Ok(AuthUser {
            mobile: profile.mobile.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            address: profile.address.clone(),
            mobile_verified: true,
            balance: 0.0,
            created_at,
        })
    }

    async fn fetch_user(&self, mobile: &str) -> Result<AuthUser> {
        let users = self.users.lock().unwrap();
        let (profile, created_at) = users
            .get(mobile)
            .ok_or_else(|| Error::NotFound("user".to_string()))?;
        Ok(AuthUser {
            mobile: profile.mobile.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            address: profile.address.clone(),
            mobile_verified: profile.mobile_verified,
            balance: 0.0,
            created_at: *created_at,
        })
    }
}

/// Production-like collaborator: an external phone-auth service plus a user
/// document store keyed by mobile number.
pub struct PhoneProvider {
    base_url: String,
    country_code: String,
    policy: OtpPolicy,
    client: Client,
}

impl PhoneProvider {
    pub fn new(base_url: impl Into<String>, country_code: impl Into<String>, policy: OtpPolicy) -> Self {
        PhoneProvider {
            base_url: base_url.into(),
            country_code: country_code.into(),
            policy,
            client: Client::new(),
        }
    }

    fn dialable(&self, mobile: &str) -> String {
        format!("{}{}", self.country_code, mobile)
    }
}

fn payload_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

fn user_from_doc(doc: &Value) -> Result<AuthUser> {
    let mobile = doc
        .get("mobile")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::collaborator("User document is missing a mobile number"))?;
    Ok(AuthUser {
        mobile: mobile.to_string(),
        name: doc.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        email: doc.get("email").and_then(Value::as_str).unwrap_or_default().to_string(),
        address: doc.get("address").and_then(Value::as_str).unwrap_or_default().to_string(),
        mobile_verified: doc
            .get("mobileVerified")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        balance: doc.get("balance").and_then(Value::as_f64).unwrap_or(0.0),
        created_at: Utc::now(),
    })
}

#[async_trait]
impl AuthProvider for PhoneProvider {
    async fn send_code(&self, mobile: &str) -> Result<Confirmation> {
        let res = self
            .client
            .post(format!("{}/verifications", self.base_url))
            .json(&json!({ "phone": self.dialable(mobile) }))
            .send()
            .await?;
        let status = res.status();
        let body: Value = res.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(Error::collaborator(payload_message(
                &body,
                "Could not send the verification code",
            )));
        }
        let id = body
            .get("verification_id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::collaborator("Provider returned no verification id"))?;
        Ok(Confirmation {
            id: id.to_string(),
            mobile: mobile.to_string(),
            expires_at: Utc::now() + Duration::seconds(self.policy.code_ttl_secs),
        })
    }

    async fn verify_code(&self, confirmation: &Confirmation, code: &str) -> Result<bool> {
        if expired(confirmation) {
            return Err(Error::collaborator(
                "Verification code expired. Request a new one.",
            ));
        }
        let res = self
            .client
            .post(format!("{}/verifications/confirm", self.base_url))
            .json(&json!({ "verification_id": confirmation.id, "code": code }))
            .send()
            .await?;
        let status = res.status();
        let body: Value = res.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(Error::collaborator(payload_message(
                &body,
                "Verification failed",
            )));
        }
        Ok(body.get("verified").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn register(&self, profile: &UserProfile) -> Result<AuthUser> {
        let res = self
            .client
            .put(format!("{}/users/{}", self.base_url, profile.mobile))
            .json(profile)
            .send()
            .await?;
        let status = res.status();
        let body: Value = res.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(Error::collaborator(payload_message(&body, "Signup failed")));
        }
        user_from_doc(&body)
    }

    async fn fetch_user(&self, mobile: &str) -> Result<AuthUser> {
        let res = self
            .client
            .get(format!("{}/users/{}", self.base_url, mobile))
            .send()
            .await?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound("user".to_string()));
        }
        let status = res.status();
        let body: Value = res.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(Error::collaborator(payload_message(
                &body,
                "Could not load the user profile",
            )));
        }
        user_from_doc(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(mobile: &str) -> UserProfile {
        UserProfile {
            name: "Asha".into(),
            mobile: mobile.into(),
            email: "asha@example.com".into(),
            address: "12 MG Road".into(),
            password: "secret1".into(),
            mobile_verified: true,
            device_info: "test".into(),
        }
    }

    #[tokio::test]
    async fn demo_provider_accepts_only_the_sentinel() {
        let provider = DemoProvider::new(OtpPolicy::default());
        let confirmation = provider.send_code("9876543210").await.unwrap();
        assert!(provider.verify_code(&confirmation, DEMO_OTP).await.unwrap());
        assert!(!provider.verify_code(&confirmation, "654321").await.unwrap());
    }

    #[tokio::test]
    async fn expired_code_is_an_error_not_a_mismatch() {
        let provider = DemoProvider::new(OtpPolicy { code_ttl_secs: -1, ..Default::default() });
        let confirmation = provider.send_code("9876543210").await.unwrap();
        let err = provider.verify_code(&confirmation, DEMO_OTP).await.unwrap_err();
        assert!(err.to_string().contains("expired"));
    }

    #[tokio::test]
    async fn demo_register_rejects_duplicates() {
        let provider = DemoProvider::new(OtpPolicy::default());
        provider.register(&profile("9876543210")).await.unwrap();
        let err = provider.register(&profile("9876543210")).await.unwrap_err();
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn demo_fetch_user_round_trip() {
        let provider = DemoProvider::new(OtpPolicy::default());
        provider.register(&profile("9876543210")).await.unwrap();
        let user = provider.fetch_user("9876543210").await.unwrap();
        assert_eq!(user.name, "Asha");
        assert!(user.mobile_verified);
        assert!(matches!(
            provider.fetch_user("9000000000").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn user_doc_parsing_defaults_missing_fields() {
        let doc = json!({ "mobile": "9876543210", "name": "Asha" });
        let user = user_from_doc(&doc).unwrap();
        assert_eq!(user.email, "");
        assert!(!user.mobile_verified);
        assert!(user_from_doc(&json!({ "name": "no mobile" })).is_err());
    }
}
