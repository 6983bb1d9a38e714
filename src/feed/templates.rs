//! Hand-authored opportunity cards. Each constructor returns a fresh
//! instance; nothing here is interpolated with user data.

use crate::models::{Category, Opportunity, Urgency};

struct Card {
    id: &'static str,
    category: Category,
    urgency: Urgency,
    title: &'static str,
    description: &'static str,
    impact: &'static str,
    location: Option<&'static str>,
    date: Option<&'static str>,
    cost_impact: Option<&'static str>,
    recommended_action: &'static str,
    sponsor: Option<&'static str>,
}

impl Card {
    fn build(self) -> Opportunity {
        Opportunity {
            id: self.id.to_string(),
            category: self.category,
            urgency: self.urgency,
            title: self.title.to_string(),
            description: self.description.to_string(),
            impact: self.impact.to_string(),
            location: self.location.map(String::from),
            date: self.date.map(String::from),
            cost_impact: self.cost_impact.map(String::from),
            recommended_action: Some(self.recommended_action.to_string()),
            sponsor: self.sponsor.map(String::from),
        }
    }
}

pub fn parking() -> Opportunity {
    Card {
        id: "parking-permit-reform",
        category: Category::Meeting,
        urgency: Urgency::Urgent,
        title: "SFMTA Board hearing on residential parking permits",
        description: "The transit board is reviewing permit pricing and new metered zones in residential neighborhoods.",
        impact: "Permit fees and meter hours on your street could change this year.",
        location: Some("City Hall, Room 400"),
        date: Some("Tuesday, 1:00 PM"),
        cost_impact: Some("Up to $60 more per year for a residential permit"),
        recommended_action: "Submit public comment before the hearing",
        sponsor: None,
    }
    .build()
}

pub fn transit() -> Opportunity {
    Card {
        id: "muni-service-changes",
        category: Category::Meeting,
        urgency: Urgency::Soon,
        title: "Muni service change community meeting",
        description: "Proposed route consolidations and frequency changes for the next service period.",
        impact: "Your regular lines may run less often or be merged with others.",
        location: Some("SFMTA, 1 South Van Ness"),
        date: Some("Next Thursday, 6:00 PM"),
        cost_impact: None,
        recommended_action: "Attend the community meeting",
        sponsor: None,
    }
    .build()
}

pub fn biking() -> Opportunity {
    Card {
        id: "protected-bike-lanes",
        category: Category::Action,
        urgency: Urgency::Upcoming,
        title: "Protected bike lane network expansion",
        description: "The city is collecting feedback on adding protected lanes to several arterial corridors.",
        impact: "Safer routes on the streets you commute on.",
        location: None,
        date: None,
        cost_impact: None,
        recommended_action: "Fill out the corridor feedback survey",
        sponsor: None,
    }
    .build()
}

pub fn renting() -> Opportunity {
    Card {
        id: "rent-stabilization-measure",
        category: Category::Vote,
        urgency: Urgency::Urgent,
        title: "Rent stabilization ballot measure",
        description: "A measure to cap annual rent increases on units built before 1995.",
        impact: "Limits how much your rent can rise each year.",
        location: None,
        date: Some("Election day"),
        cost_impact: Some("Caps increases at 60% of inflation"),
        recommended_action: "Confirm your registration and vote",
        sponsor: None,
    }
    .build()
}

pub fn ownership() -> Opportunity {
    Card {
        id: "property-tax-bond",
        category: Category::Vote,
        urgency: Urgency::Soon,
        title: "Infrastructure bond and property tax measure",
        description: "A general obligation bond for street and seismic repairs repaid through property taxes.",
        impact: "Adds a line item to your property tax bill for the life of the bond.",
        location: None,
        date: Some("Election day"),
        cost_impact: Some("About $45 per $100,000 of assessed value"),
        recommended_action: "Read the voter guide summary and vote",
        sponsor: None,
    }
    .build()
}

pub fn children() -> Opportunity {
    Card {
        id: "school-budget-hearing",
        category: Category::Meeting,
        urgency: Urgency::Soon,
        title: "School board budget hearing",
        description: "The district is presenting next year's budget, including class size and enrichment programs.",
        impact: "Decides staffing and programs at your children's schools.",
        location: Some("555 Franklin Street"),
        date: Some("Tuesday, 6:30 PM"),
        cost_impact: None,
        recommended_action: "Attend and speak during public comment",
        sponsor: None,
    }
    .build()
}

pub fn small_business() -> Opportunity {
    Card {
        id: "small-business-permit-relief",
        category: Category::Action,
        urgency: Urgency::Upcoming,
        title: "Small business permit streamlining",
        description: "A proposal to waive first-year permit fees and shorten review times for storefronts.",
        impact: "Lower fees and faster approvals for your business.",
        location: None,
        date: None,
        cost_impact: Some("Saves up to $1,200 in first-year fees"),
        recommended_action: "Email your supervisor in support",
        sponsor: None,
    }
    .build()
}

pub fn safety() -> Opportunity {
    Card {
        id: "community-safety-town-hall",
        category: Category::Meeting,
        urgency: Urgency::Upcoming,
        title: "District community safety town hall",
        description: "Police captains and the district supervisor answer questions about neighborhood safety.",
        impact: "Shapes patrol priorities and street lighting in your district.",
        location: Some("District police station community room"),
        date: Some("Last Wednesday of the month, 7:00 PM"),
        cost_impact: None,
        recommended_action: "RSVP and bring your questions",
        sponsor: None,
    }
    .build()
}

pub fn parks() -> Opportunity {
    Card {
        id: "parks-bond-measure",
        category: Category::Vote,
        urgency: Urgency::Upcoming,
        title: "Neighborhood parks bond",
        description: "Funding for playground renovations, trail repairs and new restrooms in city parks.",
        impact: "Upgrades the parks you use most.",
        location: None,
        date: Some("Election day"),
        cost_impact: None,
        recommended_action: "Vote on the parks bond",
        sponsor: None,
    }
    .build()
}

pub fn general() -> Opportunity {
    Card {
        id: "voter-registration-check",
        category: Category::Action,
        urgency: Urgency::Soon,
        title: "Check your voter registration",
        description: "Make sure your registration and mailing address are current before the next election.",
        impact: "Keeps your ballot arriving at the right address.",
        location: None,
        date: None,
        cost_impact: None,
        recommended_action: "Verify your registration online",
        sponsor: None,
    }
    .build()
}

pub fn sponsored_homeowner() -> Opportunity {
    Card {
        id: "sponsored-home-energy-rebate",
        category: Category::Action,
        urgency: Urgency::Upcoming,
        title: "Home energy upgrade rebates",
        description: "Rebates for heat pumps, insulation and rooftop solar for single-family homes.",
        impact: "Lower utility bills and a smaller carbon footprint.",
        location: None,
        date: None,
        cost_impact: Some("Rebates up to $3,000"),
        recommended_action: "Book a free home energy assessment",
        sponsor: Some("Bay Area Energy Collaborative"),
    }
    .build()
}

pub fn sponsored_renter() -> Opportunity {
    Card {
        id: "sponsored-tenant-rights-clinic",
        category: Category::Action,
        urgency: Urgency::Upcoming,
        title: "Free tenant rights clinic",
        description: "Drop-in legal help on leases, deposits and eviction notices.",
        impact: "Know your rights before your next lease renewal.",
        location: Some("Main Library, Latino/Hispanic Community Room"),
        date: Some("Saturdays, 10:00 AM"),
        cost_impact: None,
        recommended_action: "Reserve a clinic slot",
        sponsor: Some("Tenant Legal Aid Network"),
    }
    .build()
}
