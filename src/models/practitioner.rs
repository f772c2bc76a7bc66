use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::enums::Category;

/// A static directory entry.
///
/// `category` keeps the label exactly as it appears in the data file so a
/// record outside the known set is still listed (it only ever matches `All`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerRecord {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub category: String,
    #[serde(default)]
    pub degrees: String,
    #[serde(default)]
    pub affiliation: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub available: bool,
}

impl PractitionerRecord {
    /// Parsed category, `None` when the label is outside the known set.
    /// A record tagged `All` is treated as outside the set too.
    pub fn category_key(&self) -> Option<Category> {
        Category::from_str(&self.category)
            .ok()
            .filter(|c| !c.is_sentinel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str) -> PractitionerRecord {
        PractitionerRecord {
            id: "1".into(),
            name: "Dr. Ana Cruz".into(),
            specialty: "Cardiologist".into(),
            category: category.into(),
            degrees: "MBBS, FCPS".into(),
            affiliation: "City Heart Institute".into(),
            avatar_url: String::new(),
            available: true,
        }
    }

    #[test]
    fn category_key_parses_known_label() {
        assert_eq!(record("Cardiologist").category_key(), Some(Category::Cardiologist));
    }

    #[test]
    fn category_key_rejects_unknown_and_sentinel() {
        assert_eq!(record("Dentist").category_key(), None);
        assert_eq!(record("All").category_key(), None);
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "id": "7",
            "name": "Dr. B",
            "specialty": "Medicine",
            "category": "Medicine",
            "degrees": "MBBS",
            "affiliation": "General Hospital",
            "avatarUrl": "https://example.org/b.png",
            "available": false
        }"#;
        let parsed: PractitionerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.avatar_url, "https://example.org/b.png");
        assert!(!parsed.available);
    }

    #[test]
    fn optional_display_fields_default() {
        let json = r#"{"id":"x","name":"Dr. C","specialty":"Surgery","category":"Surgeon"}"#;
        let parsed: PractitionerRecord = serde_json::from_str(json).unwrap();
        assert!(parsed.degrees.is_empty());
        assert!(!parsed.available);
    }
}
