use serde::{Deserialize, Serialize};

/// Lifestyle answers collected by the questionnaire.
///
/// Missing booleans deserialize to `false`, so a partial payload still
/// produces a usable record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttributes {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub drives_car: bool,
    #[serde(default)]
    pub uses_transit: bool,
    #[serde(default)]
    pub bike_commutes: bool,
    #[serde(default)]
    pub rents_home: bool,
    #[serde(default)]
    pub owns_home: bool,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub is_small_business_owner: bool,
    #[serde(default)]
    pub concerned_about_safety: bool,
    #[serde(default)]
    pub uses_parks: bool,
}

/// Partial update to `UserAttributes`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drives_car: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_transit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bike_commutes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rents_home: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owns_home: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_children: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_small_business_owner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concerned_about_safety: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_parks: Option<bool>,
}

impl AttributePatch {
    pub fn is_empty(&self) -> bool {
        *self == AttributePatch::default()
    }
}

fn overwrite(field: &mut bool, value: Option<bool>) -> bool {
    match value {
        Some(v) if *field != v => {
            *field = v;
            true
        }
        _ => false,
    }
}

impl UserAttributes {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            ..Default::default()
        }
    }

    /// Apply a patch in place. Returns true when at least one field changed.
    pub fn apply(&mut self, patch: &AttributePatch) -> bool {
        // Non-short-circuiting `|` so every field is written.
        overwrite(&mut self.drives_car, patch.drives_car)
            | overwrite(&mut self.uses_transit, patch.uses_transit)
            | overwrite(&mut self.bike_commutes, patch.bike_commutes)
            | overwrite(&mut self.rents_home, patch.rents_home)
            | overwrite(&mut self.owns_home, patch.owns_home)
            | overwrite(&mut self.has_children, patch.has_children)
            | overwrite(&mut self.is_small_business_owner, patch.is_small_business_owner)
            | overwrite(&mut self.concerned_about_safety, patch.concerned_about_safety)
            | overwrite(&mut self.uses_parks, patch.uses_parks)
    }

    /// Interest tags implied by the answers, used to query the events API
    /// and to explain the feed on the dashboard.
    pub fn interest_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.has_children {
            tags.extend(["families", "education", "youth"]);
        }
        if self.drives_car {
            tags.extend(["parking", "traffic"]);
        }
        if self.uses_transit {
            tags.extend(["transportation", "transit"]);
        }
        if self.bike_commutes {
            if !tags.contains(&"transportation") {
                tags.push("transportation");
            }
            tags.push("bike_lanes");
        }
        if self.rents_home {
            tags.extend(["housing", "tenant_rights"]);
        }
        if self.owns_home {
            if !tags.contains(&"housing") {
                tags.push("housing");
            }
            tags.push("property_tax");
        }
        if self.is_small_business_owner {
            tags.push("small_business");
        }
        if self.concerned_about_safety {
            tags.push("public_safety");
        }
        if self.uses_parks {
            tags.push("parks");
        }
        tags
    }

    pub fn match_explanation(&self) -> String {
        let tags = self.interest_tags();
        if tags.is_empty() {
            "Showing all upcoming civic events".to_string()
        } else {
            let shown: Vec<&str> = tags.iter().take(5).copied().collect();
            format!("Showing events matching your interests: {}", shown.join(", "))
        }
    }
}
