//! # Entity Roster
//!
//! The configured beneficiary entities, in deployment order. Order is
//! load-bearing: downstream consumers index entities by position.

use deployer_types::EntitySpec;

/// The communities funded by the treasury.
#[must_use]
pub fn default_entities() -> Vec<EntitySpec> {
    vec![
        EntitySpec::new("Kathmandu Flood Relief", "kathmandu-flood"),
        EntitySpec::new("Terai Heatwave Protection", "terai-heatwave"),
        EntitySpec::new("Urban Poverty Safety Net", "urban-poverty"),
        EntitySpec::new("Agricultural Drought Relief", "agriculture-drought"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn roster_has_unique_external_ids() {
        let roster = default_entities();
        let ids: HashSet<_> = roster.iter().map(|e| e.external_id.as_str()).collect();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn roster_order_is_stable() {
        let roster = default_entities();
        assert_eq!(roster[0].external_id, "kathmandu-flood");
        assert_eq!(roster[3].external_id, "agriculture-drought");
    }
}
