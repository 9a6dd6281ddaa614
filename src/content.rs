//! Static policy and payment-method content.
//!
//! Both data sets are embedded JSON, parsed once at startup and only read
//! afterwards. All user-facing strings in them are English source text that
//! goes through the translation catalog at render time.

use serde::Deserialize;

use crate::error::ContentError;

const POLICIES: &str = include_str!("../assets/policies.json");
const PAYMENT_METHODS: &str = include_str!("../assets/payment_methods.json");

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyTab {
    pub id: String,
    pub label: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<PolicySection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicySection {
    pub heading: String,
    #[serde(default)]
    pub content: SectionContent,
}

/// Either one paragraph or a list of paragraphs. Empty entries in the list
/// stand for vertical spacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Paragraph(String),
    Paragraphs(Vec<String>),
}

impl Default for SectionContent {
    fn default() -> Self {
        SectionContent::Paragraphs(Vec::new())
    }
}

impl SectionContent {
    pub fn paragraphs(&self) -> &[String] {
        match self {
            SectionContent::Paragraph(text) => std::slice::from_ref(text),
            SectionContent::Paragraphs(lines) => lines,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub processing_time: String,
    #[serde(default)]
    pub fields: Vec<PaymentField>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// A label/value pair shown in a payment method's detail view. Labels are
/// translated, values are shown verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentField {
    pub label: String,
    pub value: String,
}

/// The complete static data set for one session.
#[derive(Debug, Clone)]
pub struct Content {
    pub policies: Vec<PolicyTab>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl Content {
    pub fn builtin() -> Result<Self, ContentError> {
        let policies: Vec<PolicyTab> =
            serde_json::from_str(POLICIES).map_err(|source| ContentError::Parse {
                asset: "policies",
                source,
            })?;
        let payment_methods: Vec<PaymentMethod> = serde_json::from_str(PAYMENT_METHODS)
            .map_err(|source| ContentError::Parse {
                asset: "payment_methods",
                source,
            })?;
        Self::new(policies, payment_methods)
    }

    /// Builds a content set. The policy review needs at least one tab to show.
    pub fn new(
        policies: Vec<PolicyTab>,
        payment_methods: Vec<PaymentMethod>,
    ) -> Result<Self, ContentError> {
        if policies.is_empty() {
            return Err(ContentError::Empty("policies"));
        }
        Ok(Self {
            policies,
            payment_methods,
        })
    }

    pub fn policy(&self, index: usize) -> Option<&PolicyTab> {
        self.policies.get(index)
    }

    pub fn payment_method(&self, index: usize) -> Option<&PaymentMethod> {
        self.payment_methods.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Language};

    #[test]
    fn builtin_content_parses() {
        let content = Content::builtin().unwrap();
        assert_eq!(content.policies[0].id, "terms");
        assert!(content.policies.iter().all(|tab| !tab.sections.is_empty()));
        assert!(!content.payment_methods.is_empty());
    }

    #[test]
    fn section_content_accepts_both_shapes() {
        let raw = r#"[
            {"heading": "One", "content": "single"},
            {"heading": "Many", "content": ["a", "", "b"]},
            {"heading": "None"}
        ]"#;
        let sections: Vec<PolicySection> = serde_json::from_str(raw).unwrap();
        assert_eq!(sections[0].content.paragraphs(), ["single"]);
        assert_eq!(sections[1].content.paragraphs(), ["a", "", "b"]);
        assert!(sections[2].content.paragraphs().is_empty());
    }

    #[test]
    fn empty_policy_list_is_rejected() {
        assert!(matches!(
            Content::new(Vec::new(), Vec::new()),
            Err(ContentError::Empty("policies"))
        ));
    }

    #[test]
    fn every_builtin_string_is_translated() {
        let content = Content::builtin().unwrap();
        let catalog = Catalog::builtin().unwrap();

        let mut strings: Vec<&str> = Vec::new();
        for tab in &content.policies {
            strings.push(&tab.label);
            strings.push(&tab.title);
            for section in &tab.sections {
                strings.push(&section.heading);
                strings.extend(section.content.paragraphs().iter().map(String::as_str));
            }
        }
        for method in &content.payment_methods {
            strings.push(&method.name);
            strings.push(&method.summary);
            strings.push(&method.processing_time);
            strings.extend(method.fields.iter().map(|field| field.label.as_str()));
            strings.extend(method.instructions.iter().map(String::as_str));
        }

        for language in [Language::Fr, Language::Ar] {
            let dictionary = catalog.dictionary(language).unwrap();
            for text in strings.iter().filter(|text| !text.is_empty()) {
                assert!(
                    dictionary.contains_key(*text),
                    "missing {} translation for {text:?}",
                    language.code()
                );
            }
        }
    }
}
