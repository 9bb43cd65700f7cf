use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user record. Written by signin/signup/signout only, read by
/// every screen; persisted through the session store between launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub mobile: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub mobile_verified: bool,
    #[serde(default)]
    pub balance: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// What signup submits to the auth collaborator once the flow completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub password: String,
    pub mobile_verified: bool,
    pub device_info: String,
}

/// Coarse description of the device, stored on the user document.
pub fn device_info() -> String {
    match local_ip_address::local_ip() {
        Ok(ip) => format!("{}/{}", std::env::consts::OS, ip),
        Err(_) => std::env::consts::OS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_user_round_trips_with_camel_case_keys() {
        let user = AuthUser {
            mobile: "9876543210".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            address: "12 MG Road".into(),
            mobile_verified: true,
            balance: 320.0,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["mobileVerified"], serde_json::json!(true));
        let back: AuthUser = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn device_info_is_never_empty() {
        assert!(!device_info().is_empty());
    }
}
