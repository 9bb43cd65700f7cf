use serde::{Deserialize, Serialize};

/// A promotional offer shown on the offers screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub code: String,
    pub valid_till: String,
}

/// The running promotions. These ship with the app rather than coming from
/// the backend.
pub fn current_offers() -> Vec<Offer> {
    let offer = |id, title: &str, description: &str, code: &str, valid_till: &str| Offer {
        id,
        title: title.to_string(),
        description: description.to_string(),
        code: code.to_string(),
        valid_till: valid_till.to_string(),
    };
    vec![
        offer(
            1,
            "20% Off First Recharge",
            "Get 20% instant discount on your first recharge. Valid for new users only.",
            "FIRST20",
            "30th Sept 2025",
        ),
        offer(
            2,
            "Unlimited 100Mbps for ₹499",
            "Enjoy unlimited data at 100Mbps for just ₹499/month. Limited time offer.",
            "SPEED100",
            "15th Oct 2025",
        ),
        offer(
            3,
            "Refer & Earn ₹100",
            "Refer a friend and earn ₹100 wallet credit for each successful referral.",
            "REFER100",
            "31st Dec 2025",
        ),
        offer(
            4,
            "OTT Bundle Offer",
            "Get free Netflix & Hotstar with select annual plans.",
            "OTT2025",
            "10th Nov 2025",
        ),
    ]
}

pub fn find_by_code<'a>(offers: &'a [Offer], code: &str) -> Option<&'a Offer> {
    offers.iter().find(|o| o.code.eq_ignore_ascii_case(code.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_code_ignores_case_and_whitespace() {
        let offers = current_offers();
        assert_eq!(find_by_code(&offers, " first20 ").unwrap().id, 1);
        assert!(find_by_code(&offers, "NOPE").is_none());
    }
}
