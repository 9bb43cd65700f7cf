use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One purchasable internet plan, already normalized. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub provider: String,
    /// As displayed, e.g. "100 Mbps".
    pub speed: String,
    pub price: f64,
    pub validity_days: u32,
    pub data_limit: String,
}

impl Plan {
    /// Leading integer of the speed string; "100 Mbps" -> 100.
    pub fn speed_mbps(&self) -> Option<u32> {
        let digits: String = self
            .speed
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Price rendered the way the catalog shows it ("499", "499.5").
    pub fn price_text(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("{}", self.price as i64)
        } else {
            format!("{}", self.price)
        }
    }
}

fn string_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| value.get(k).and_then(Value::as_str))
}

fn id_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match value.get(k) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn number_field(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match value.get(k) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// The plans API has grown several spellings for the same fields; fold them
/// all into one `Plan`. Returns `None` for records with no usable id or
/// price, which callers skip.
pub fn normalize_plan(value: &Value) -> Option<Plan> {
    let id = id_field(value, &["plan_id", "_id", "id"])?;
    let price = number_field(value, &["price"])?;
    let provider = string_field(value, &["name", "providerName"])
        .unwrap_or("Unknown Provider")
        .to_string();
    let speed = match value.get("speed") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => format!("{n} Mbps"),
        _ => "-".to_string(),
    };
    let validity_days = number_field(value, &["duration_days", "validity"])
        .map(|v| v.max(0.0) as u32)
        .unwrap_or(0);
    let data_limit = string_field(value, &["data_limit", "data"])
        .unwrap_or("Unlimited")
        .to_string();

    Some(Plan { id, provider, speed, price, validity_days, data_limit })
}
