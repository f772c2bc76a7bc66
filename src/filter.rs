//! Filter Engine: pure recomputation of the visible practitioner subset.
//!
//! A record is visible when it passes both the category predicate and the
//! search predicate. Order of the input is preserved. There is no index:
//! the directory is small enough to rescan on every change.

use serde::Serialize;

use crate::models::{Category, PractitionerRecord};

/// Category predicate. `All` admits everything, including records whose
/// label is outside the known set.
pub fn matches_category(record: &PractitionerRecord, category: Category) -> bool {
    category.is_sentinel() || record.category_key() == Some(category)
}

/// Search predicate over name, specialty and affiliation.
/// `needle` must already be lowercased; empty admits everything.
fn matches_needle(record: &PractitionerRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&record.name, &record.specialty, &record.affiliation]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Records passing both predicates, in input order.
/// Search is a case-insensitive substring match; degrees are not searched.
pub fn visible<'a>(
    records: &'a [PractitionerRecord],
    category: Category,
    search: &str,
) -> Vec<&'a PractitionerRecord> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| matches_category(r, category) && matches_needle(r, &needle))
        .collect()
}

/// Echo of the active filters when nothing matched, so the renderer can
/// explain the empty grid and offer to clear both filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyResult {
    pub search_text: String,
    pub category: Category,
    pub can_clear: bool,
}

/// Filter output shaped for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct FilterSummary {
    pub category: Category,
    pub search_text: String,
    pub total: usize,
    pub visible_count: usize,
    pub practitioners: Vec<PractitionerRecord>,
    pub empty: Option<EmptyResult>,
}

/// Run the filter and package the result.
pub fn summarize(records: &[PractitionerRecord], category: Category, search: &str) -> FilterSummary {
    let practitioners: Vec<PractitionerRecord> =
        visible(records, category, search).into_iter().cloned().collect();

    let empty = practitioners.is_empty().then(|| EmptyResult {
        search_text: search.to_string(),
        category,
        can_clear: !search.is_empty() || !category.is_sentinel(),
    });

    FilterSummary {
        category,
        search_text: search.to_string(),
        total: records.len(),
        visible_count: practitioners.len(),
        practitioners,
        empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str, category: &str) -> PractitionerRecord {
        PractitionerRecord {
            id: id.into(),
            name: name.into(),
            specialty: String::new(),
            category: category.into(),
            degrees: String::new(),
            affiliation: String::new(),
            avatar_url: String::new(),
            available: true,
        }
    }

    fn sample() -> Vec<PractitionerRecord> {
        vec![
            PractitionerRecord {
                specialty: "Interventional Cardiology".into(),
                affiliation: "Riverside Heart Institute".into(),
                degrees: "FACC Fellowship".into(),
                ..doc("1", "Dr. Ana Cruz", "Cardiologist")
            },
            PractitionerRecord {
                specialty: "General Surgery".into(),
                affiliation: "City General Hospital".into(),
                ..doc("2", "Dr. Carlos Ibarra", "Surgeon")
            },
            PractitionerRecord {
                specialty: "Family Medicine".into(),
                affiliation: "Greenway Clinic".into(),
                ..doc("3", "Dr. Rahim Chowdhury", "Physician")
            },
            PractitionerRecord {
                specialty: "Vascular Surgery".into(),
                affiliation: "St. Luke's Hospital".into(),
                ..doc("4", "Dr. Arjun Mehta", "Surgeon")
            },
            doc("5", "Dr. Unknown", "Dentist"),
        ]
    }

    fn ids(records: &[&PractitionerRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn category_filter_keeps_exact_subset_in_order() {
        let records = sample();
        for category in Category::practitioner_categories() {
            let expected: Vec<String> = records
                .iter()
                .filter(|r| r.category == category.as_str())
                .map(|r| r.id.clone())
                .collect();
            assert_eq!(ids(&visible(&records, category, "")), expected);
        }
    }

    #[test]
    fn all_returns_everything_in_order() {
        let records = sample();
        let all = visible(&records, Category::All, "");
        assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let records = sample();
        for query in ["ana", "ANA", "Cruz"] {
            assert_eq!(ids(&visible(&records, Category::All, query)), vec!["1"], "{query}");
        }
    }

    #[test]
    fn search_covers_specialty_and_affiliation() {
        let records = sample();
        assert_eq!(ids(&visible(&records, Category::All, "surgery")), vec!["2", "4"]);
        assert_eq!(ids(&visible(&records, Category::All, "greenway")), vec!["3"]);
    }

    #[test]
    fn search_ignores_degrees() {
        let records = sample();
        assert!(visible(&records, Category::All, "fellowship").is_empty());
    }

    #[test]
    fn composed_predicate_is_and() {
        let records = sample();
        // Matches search but wrong category.
        assert!(visible(&records, Category::Physician, "cruz").is_empty());
        // Right category but fails search.
        assert!(visible(&records, Category::Cardiologist, "ibarra").is_empty());
        // Both pass.
        assert_eq!(ids(&visible(&records, Category::Surgeon, "vascular")), vec!["4"]);
    }

    #[test]
    fn unknown_category_record_only_under_all() {
        let records = sample();
        assert!(visible(&records, Category::All, "unknown").len() == 1);
        for category in Category::practitioner_categories() {
            assert!(!ids(&visible(&records, category, "")).contains(&"5".to_string()));
        }
    }

    #[test]
    fn two_record_scenario() {
        let directory = vec![doc("a", "Dr. A", "Surgeon"), doc("b", "Dr. B", "Physician")];
        assert_eq!(ids(&visible(&directory, Category::Surgeon, "")), vec!["a"]);
        assert_eq!(ids(&visible(&directory, Category::All, "b")), vec!["b"]);
        assert!(visible(&directory, Category::All, "zzz").is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(visible(&[], Category::All, "").is_empty());
    }

    #[test]
    fn summary_reports_counts() {
        let records = sample();
        let summary = summarize(&records, Category::Surgeon, "");
        assert_eq!(summary.total, 5);
        assert_eq!(summary.visible_count, 2);
        assert!(summary.empty.is_none());
    }

    #[test]
    fn summary_explains_empty_result() {
        let records = sample();
        let summary = summarize(&records, Category::Oncology, "zzz");
        assert_eq!(summary.visible_count, 0);
        let empty = summary.empty.unwrap();
        assert_eq!(empty.search_text, "zzz");
        assert_eq!(empty.category, Category::Oncology);
        assert!(empty.can_clear);
    }

    #[test]
    fn summary_empty_directory_has_nothing_to_clear() {
        let summary = summarize(&[], Category::All, "");
        assert!(!summary.empty.unwrap().can_clear);
    }
}
