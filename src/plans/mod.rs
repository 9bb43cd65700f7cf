pub mod catalog;
pub mod engine;
pub mod model;

use model::Plan;

/// The catalog the app ships for demo mode, lifted from the marketing
/// screens.
pub fn demo_plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "1".to_string(),
            provider: "Jio Fiber".to_string(),
            speed: "100 Mbps".to_string(),
            price: 1499.0,
            validity_days: 84,
            data_limit: "Unlimited".to_string(),
        },
        Plan {
            id: "2".to_string(),
            provider: "Airtel Xstream".to_string(),
            speed: "200 Mbps".to_string(),
            price: 2099.0,
            validity_days: 90,
            data_limit: "Unlimited".to_string(),
        },
        Plan {
            id: "3".to_string(),
            provider: "BSNL".to_string(),
            speed: "60 Mbps".to_string(),
            price: 599.0,
            validity_days: 30,
            data_limit: "Unlimited".to_string(),
        },
        Plan {
            id: "4".to_string(),
            provider: "ACT Fibernet".to_string(),
            speed: "150 Mbps".to_string(),
            price: 1299.0,
            validity_days: 60,
            data_limit: "Unlimited".to_string(),
        },
    ]
}
