use std::cmp::Ordering;

use crate::plans::model::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Provider,
    Speed,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending.
    Price,
    /// Descending.
    Speed,
    /// Descending.
    Validity,
}

/// The plan list's view state: one active filter dimension, a free-text
/// search and a sort order. Recomputed on every render, never persisted.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub dimension: FilterDimension,
    /// "all" disables the dimension filter.
    pub selected: String,
    pub search: String,
    pub sort: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            dimension: FilterDimension::Provider,
            selected: "all".to_string(),
            search: String::new(),
            sort: SortKey::Price,
        }
    }
}

fn matches_dimension(plan: &Plan, filter: &FilterState) -> bool {
    if filter.selected.eq_ignore_ascii_case("all") {
        return true;
    }
    let selected = filter.selected.trim();
    match filter.dimension {
        FilterDimension::Provider => plan.provider.eq_ignore_ascii_case(selected),
        FilterDimension::Speed => match plan.speed_mbps() {
            Some(mbps) => mbps.to_string() == selected,
            None => false,
        },
        FilterDimension::Price => plan.price_text() == selected,
    }
}

fn matches_search(plan: &Plan, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    plan.provider.to_lowercase().contains(&needle)
        || plan.speed.to_lowercase().contains(&needle)
        || plan.price_text().contains(&needle)
}

/// Filter and order a fetched plan list for display. The input is left
/// untouched; an empty result just renders as "no plans found".
pub fn apply(plans: &[Plan], filter: &FilterState) -> Vec<Plan> {
    let mut shown: Vec<Plan> = plans
        .iter()
        .filter(|p| matches_dimension(p, filter) && matches_search(p, &filter.search))
        .cloned()
        .collect();

    // Vec::sort_by is stable, so equal keys keep their fetched order.
    match filter.sort {
        SortKey::Price => {
            shown.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
        }
        SortKey::Speed => {
            shown.sort_by(|a, b| b.speed_mbps().unwrap_or(0).cmp(&a.speed_mbps().unwrap_or(0)))
        }
        SortKey::Validity => shown.sort_by(|a, b| b.validity_days.cmp(&a.validity_days)),
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::demo_plans;

    fn plan(id: &str, provider: &str, speed: &str, price: f64, validity: u32) -> Plan {
        Plan {
            id: id.to_string(),
            provider: provider.to_string(),
            speed: speed.to_string(),
            price,
            validity_days: validity,
            data_limit: "Unlimited".to_string(),
        }
    }

    #[test]
    fn all_keeps_every_plan_and_sorts() {
        let plans = demo_plans();
        let shown = apply(&plans, &FilterState::default());
        assert_eq!(shown.len(), plans.len());
        let prices: Vec<f64> = shown.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![599.0, 1299.0, 1499.0, 2099.0]);
    }

    #[test]
    fn provider_filter_is_case_insensitive() {
        let plans = vec![
            plan("1", "Jio", "100 Mbps", 999.0, 84),
            plan("2", "Airtel", "200 Mbps", 1099.0, 90),
            plan("3", "JIO", "50 Mbps", 499.0, 30),
        ];
        let filter = FilterState {
            dimension: FilterDimension::Provider,
            selected: "Jio".to_string(),
            ..Default::default()
        };
        let shown = apply(&plans, &filter);
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|p| p.provider.eq_ignore_ascii_case("jio")));

        let none = FilterState { selected: "BSNL".to_string(), ..filter };
        assert!(apply(&plans, &none).is_empty());
    }

    #[test]
    fn speed_and_price_filters_use_numeric_strings() {
        let plans = vec![
            plan("1", "Jio", "100 Mbps", 999.0, 84),
            plan("2", "Airtel", "200 Mbps", 999.0, 90),
        ];
        let by_speed = FilterState {
            dimension: FilterDimension::Speed,
            selected: "200".to_string(),
            ..Default::default()
        };
        assert_eq!(apply(&plans, &by_speed)[0].id, "2");

        let by_price = FilterState {
            dimension: FilterDimension::Price,
            selected: "999".to_string(),
            ..Default::default()
        };
        assert_eq!(apply(&plans, &by_price).len(), 2);
    }

    #[test]
    fn price_sort_ascending() {
        let plans = vec![
            plan("1", "A", "100 Mbps", 999.0, 30),
            plan("2", "B", "100 Mbps", 199.0, 30),
            plan("3", "C", "100 Mbps", 499.0, 30),
        ];
        let shown = apply(&plans, &FilterState::default());
        let prices: Vec<f64> = shown.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![199.0, 499.0, 999.0]);
    }

    #[test]
    fn speed_sort_descending() {
        let plans = vec![
            plan("1", "A", "50 Mbps", 100.0, 30),
            plan("2", "B", "200 Mbps", 100.0, 30),
            plan("3", "C", "100 Mbps", 100.0, 30),
        ];
        let filter = FilterState { sort: SortKey::Speed, ..Default::default() };
        let speeds: Vec<u32> = apply(&plans, &filter)
            .iter()
            .map(|p| p.speed_mbps().unwrap())
            .collect();
        assert_eq!(speeds, vec![200, 100, 50]);
    }

    #[test]
    fn validity_sort_descending() {
        let plans = vec![
            plan("1", "A", "50 Mbps", 100.0, 30),
            plan("2", "B", "50 Mbps", 100.0, 90),
            plan("3", "C", "50 Mbps", 100.0, 60),
        ];
        let filter = FilterState { sort: SortKey::Validity, ..Default::default() };
        let days: Vec<u32> = apply(&plans, &filter).iter().map(|p| p.validity_days).collect();
        assert_eq!(days, vec![90, 60, 30]);
    }

    #[test]
    fn sorting_is_stable_on_equal_keys() {
        let plans = vec![
            plan("first", "A", "100 Mbps", 499.0, 30),
            plan("second", "B", "100 Mbps", 499.0, 30),
            plan("third", "C", "100 Mbps", 499.0, 30),
        ];
        for sort in [SortKey::Price, SortKey::Speed, SortKey::Validity] {
            let filter = FilterState { sort, ..Default::default() };
            let sorted = apply(&plans, &filter);
            let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn search_matches_provider_speed_and_price() {
        let plans = vec![
            plan("1", "Jio Fiber", "100 Mbps", 1499.0, 84),
            plan("2", "Airtel", "200 Mbps", 2099.0, 90),
        ];
        let search = |text: &str| FilterState { search: text.to_string(), ..Default::default() };

        let shown = apply(&plans, &search("jio"));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].provider, "Jio Fiber");

        assert_eq!(apply(&plans, &search("200"))[0].id, "2");
        assert_eq!(apply(&plans, &search("1499"))[0].id, "1");
        assert!(apply(&plans, &search("hathway")).is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let plans = vec![
            plan("1", "A", "100 Mbps", 999.0, 30),
            plan("2", "B", "200 Mbps", 199.0, 60),
        ];
        let before = plans.clone();
        let filter = FilterState { sort: SortKey::Speed, ..Default::default() };
        let _ = apply(&plans, &filter);
        assert_eq!(plans, before);
    }
}
