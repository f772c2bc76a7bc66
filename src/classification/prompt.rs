use crate::models::Category;

pub const CLASSIFICATION_SYSTEM_PROMPT: &str = "You are a helpful medical receptionist. \
You never diagnose. You only route a patient to a kind of specialist.";

/// Neutralise characters that would let the description break out of its
/// quoted slot in the template.
fn quote_safe(symptoms: &str) -> String {
    symptoms
        .trim()
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect()
}

/// Build the classification prompt for one symptom description.
pub fn build_symptom_prompt(symptoms: &str) -> String {
    let labels: String = Category::practitioner_categories()
        .map(|c| format!("- {}\n", c.as_str()))
        .collect();

    format!(
        r#"A patient is describing their symptoms: "{symptoms}".

Based on this description, recommend the SINGLE most appropriate medical specialist category from the following list:
{labels}
Return ONLY the category name as a string. Do not add any punctuation or extra text.
If the symptoms are vague or general, return "Physician"."#,
        symptoms = quote_safe(symptoms),
    )
}
