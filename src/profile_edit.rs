//! Best-effort reading of free-text profile edits ("I sold my car",
//! "we just had a kid") into an attribute patch.

use crate::models::AttributePatch;

const NEGATIONS: &[&str] = &["not", "no", "don't", "dont", "never", "sold", "longer", "stopped"];
const RENTING: &[&str] = &["rent", "renter", "renting", "rents", "tenant", "lease"];

type Setter = fn(&mut AttributePatch, bool);

const RULES: &[(&[&str], Setter)] = &[
    (&["car", "cars", "drive", "drives", "driving"], |p, v| p.drives_car = Some(v)),
    (
        &["muni", "bus", "bart", "transit", "train", "subway"],
        |p, v| p.uses_transit = Some(v),
    ),
    (&["bike", "bikes", "biking", "bicycle", "cycling"], |p, v| p.bike_commutes = Some(v)),
    (
        &["own", "owns", "homeowner", "house", "mortgage", "bought"],
        |p, v| p.owns_home = Some(v),
    ),
    (
        &["kid", "kids", "child", "children", "son", "daughter", "baby"],
        |p, v| p.has_children = Some(v),
    ),
    (
        &["business", "shop", "store", "restaurant", "storefront"],
        |p, v| p.is_small_business_owner = Some(v),
    ),
    (&["safety", "crime", "unsafe", "theft"], |p, v| p.concerned_about_safety = Some(v)),
    (&["park", "parks", "playground", "trail", "trails"], |p, v| p.uses_parks = Some(v)),
];

const CONJUNCTIONS: &[&str] = &["and", "but", "although", "though", "while", "so", "now"];

/// Lowercase word tokens grouped into clauses. Clauses end at sentence
/// punctuation and at conjunctions.
fn clauses(text: &str) -> Vec<Vec<String>> {
    let lowered = text.to_lowercase();
    let mut out = Vec::new();
    for piece in lowered.split(|c: char| matches!(c, ',' | '.' | ';' | ':' | '!' | '?')) {
        let mut clause = Vec::new();
        for word in piece
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty())
        {
            if CONJUNCTIONS.contains(&word) {
                out.push(std::mem::take(&mut clause));
            } else {
                clause.push(word.to_string());
            }
        }
        out.push(clause);
    }
    out.retain(|c| !c.is_empty());
    out
}

/// Infer which attributes a message talks about. A negation turns the
/// values inferred from its own clause to false. Later clauses win.
pub fn classify(text: &str) -> AttributePatch {
    let mut patch = AttributePatch::default();
    for words in clauses(text) {
        let has = |list: &[&str]| words.iter().any(|w| list.contains(&w.as_str()));
        let value = !has(NEGATIONS);

        for (keywords, set) in RULES {
            if has(keywords) {
                set(&mut patch, value);
            }
        }
        if has(RENTING) {
            patch.rents_home = Some(value);
            if value {
                patch.owns_home = Some(false);
            }
        }
    }
    patch
}
