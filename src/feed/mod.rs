pub mod remote;
pub mod templates;

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{Opportunity, UserAttributes};
use remote::RemoteEvent;

/// A lifestyle predicate bound to the card it unlocks.
pub struct Predicate {
    pub name: &'static str,
    pub applies: fn(&UserAttributes) -> bool,
    pub template: fn() -> Opportunity,
}

/// Evaluated in declaration order; the feed keeps this order.
pub const PREDICATES: &[Predicate] = &[
    Predicate { name: "drives_car", applies: |a| a.drives_car, template: templates::parking },
    Predicate { name: "uses_transit", applies: |a| a.uses_transit, template: templates::transit },
    Predicate { name: "bike_commutes", applies: |a| a.bike_commutes, template: templates::biking },
    Predicate { name: "rents_home", applies: |a| a.rents_home, template: templates::renting },
    Predicate { name: "owns_home", applies: |a| a.owns_home, template: templates::ownership },
    Predicate { name: "has_children", applies: |a| a.has_children, template: templates::children },
    Predicate {
        name: "is_small_business_owner",
        applies: |a| a.is_small_business_owner,
        template: templates::small_business,
    },
    Predicate {
        name: "concerned_about_safety",
        applies: |a| a.concerned_about_safety,
        template: templates::safety,
    },
    Predicate { name: "uses_parks", applies: |a| a.uses_parks, template: templates::parks },
];

/// Where the current feed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    Generated,
    Remote,
}

/// Matching cards followed by the general card. Never empty.
pub fn organic(attrs: &UserAttributes) -> Vec<Opportunity> {
    let mut items: Vec<Opportunity> = PREDICATES
        .iter()
        .filter(|p| (p.applies)(attrs))
        .map(|p| (p.template)())
        .collect();
    items.push(templates::general());
    items
}

/// The single sponsored card, chosen by home ownership alone.
pub fn sponsored(attrs: &UserAttributes) -> Opportunity {
    if attrs.owns_home {
        templates::sponsored_homeowner()
    } else {
        templates::sponsored_renter()
    }
}

/// Build the full feed for a set of answers.
pub fn generate(attrs: &UserAttributes) -> Vec<Opportunity> {
    let mut items = organic(attrs);
    items.push(sponsored(attrs));
    items
}

/// Build a feed from remotely sourced events. Events repeating an earlier id
/// are dropped, and the sponsored card is appended once at the end.
pub fn from_remote(events: Vec<RemoteEvent>, attrs: &UserAttributes) -> Vec<Opportunity> {
    let sponsor = sponsored(attrs);
    let mut seen = HashSet::new();
    seen.insert(sponsor.id.clone());

    let mut items: Vec<Opportunity> = Vec::with_capacity(events.len() + 1);
    for event in events {
        if !seen.insert(event.id.clone()) {
            log::warn!("Dropping remote event with duplicate id '{}'", event.id);
            continue;
        }
        items.push(event.into_opportunity());
    }
    // Stable, so events of equal urgency keep the order the API sent.
    items.sort_by_key(|o| o.urgency);
    items.push(sponsor);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_predicate_has_distinct_template() {
        let ids: HashSet<String> = PREDICATES.iter().map(|p| (p.template)().id).collect();
        assert_eq!(ids.len(), PREDICATES.len());
        assert!(!ids.contains(&templates::general().id));
    }

    #[test]
    fn organic_ends_with_general() {
        let attrs = UserAttributes { uses_parks: true, ..Default::default() };
        let items = organic(&attrs);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "voter-registration-check");
    }

    #[test]
    fn sponsored_follows_ownership_only() {
        let renter = UserAttributes { rents_home: true, ..Default::default() };
        let owner = UserAttributes { owns_home: true, ..Default::default() };
        assert_eq!(sponsored(&renter).id, "sponsored-tenant-rights-clinic");
        assert_eq!(sponsored(&UserAttributes::default()).id, "sponsored-tenant-rights-clinic");
        assert_eq!(sponsored(&owner).id, "sponsored-home-energy-rebate");
    }

    #[test]
    fn templates_carry_recommended_actions() {
        for p in PREDICATES {
            assert!((p.template)().recommended_action.is_some(), "{} has no action", p.name);
        }
    }
}
