//! Candidate labels and their explanations.
//!
//! The catalog is built once at startup and shared read-only by every
//! request. Labels are split in two tiers: broad umbrella categories first,
//! then the detailed bias/fallacy subtypes.

use std::collections::HashMap;
use truthlens_common::config::LabelsConfig;
use truthlens_common::{Validate, ValidationError, ValidationResult};

/// Umbrella categories, always listed first.
pub const BROAD_LABELS: [&str; 4] = ["misinformation", "bias", "fallacy", "none"];

/// Specific subtypes, listed after the broad labels.
pub const DETAILED_LABELS: [&str; 7] = [
    "confirmation bias",
    "framing effect",
    "straw man fallacy",
    "appeal to emotion",
    "hasty generalization",
    "ad hominem",
    "false dilemma",
];

/// Explanation returned when the winning label has no table entry.
pub const FALLBACK_EXPLANATION: &str = "No explanation available.";

const BUILTIN_EXPLANATIONS: [(&str, &str); 11] = [
    (
        "misinformation",
        "This text contains false or misleading information.",
    ),
    ("bias", "This text shows a biased perspective."),
    ("fallacy", "This text includes a logical fallacy."),
    ("none", "No misinformation, bias, or fallacy detected."),
    (
        "confirmation bias",
        "This text reflects confirmation bias, favoring info that supports preconceptions.",
    ),
    (
        "framing effect",
        "This text frames information in a way that influences perception unfairly.",
    ),
    (
        "straw man fallacy",
        "This text misrepresents an argument to make it easier to attack.",
    ),
    (
        "appeal to emotion",
        "This text appeals to emotions rather than facts or logic.",
    ),
    (
        "hasty generalization",
        "This text draws conclusions based on insufficient evidence.",
    ),
    (
        "ad hominem",
        "This text attacks a person instead of addressing the argument.",
    ),
    (
        "false dilemma",
        "This text presents a situation as having only two choices, ignoring alternatives.",
    ),
];

/// Ordered candidate labels plus the label → explanation table.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    candidates: Vec<String>,
    detailed_from: usize,
    explanations: HashMap<String, String>,
    fallback: String,
}

impl LabelCatalog {
    /// The built-in eleven-label catalog.
    pub fn builtin() -> Self {
        Self {
            candidates: BROAD_LABELS
                .iter()
                .chain(DETAILED_LABELS.iter())
                .map(|l| l.to_string())
                .collect(),
            detailed_from: BROAD_LABELS.len(),
            explanations: BUILTIN_EXPLANATIONS
                .iter()
                .map(|(label, text)| (label.to_string(), text.to_string()))
                .collect(),
            fallback: FALLBACK_EXPLANATION.to_string(),
        }
    }

    /// Build a catalog from the built-in one with configuration overrides applied.
    pub fn from_config(config: &LabelsConfig) -> ValidationResult<Self> {
        config.validate()?;

        let mut catalog = Self::builtin();

        if let Some(ref candidates) = config.candidates {
            catalog.candidates = candidates.clone();
            catalog.detailed_from = catalog.detailed_from.min(candidates.len());
        }
        if let Some(from) = config.detailed_from {
            if from > catalog.candidates.len() {
                return Err(ValidationError::InvalidValue {
                    field: "labels.detailed_from".into(),
                    reason: format!(
                        "{from} is past the end of {} candidate labels",
                        catalog.candidates.len()
                    ),
                });
            }
            catalog.detailed_from = from;
        }

        for (label, text) in &config.explanations {
            catalog.explanations.insert(label.clone(), text.clone());
        }
        if let Some(ref fallback) = config.fallback_explanation {
            catalog.fallback = fallback.clone();
        }

        Ok(catalog)
    }

    /// All candidate labels, in the order sent to the provider.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn broad_labels(&self) -> &[String] {
        &self.candidates[..self.detailed_from]
    }

    pub fn detailed_labels(&self) -> &[String] {
        &self.candidates[self.detailed_from..]
    }

    /// Whether `label` belongs to the detailed tier.
    pub fn is_detailed(&self, label: &str) -> bool {
        self.detailed_labels().iter().any(|l| l == label)
    }

    /// Explanation for `label`, or the fallback sentence.
    pub fn explain(&self, label: &str) -> &str {
        self.explanations
            .get(label)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_tiers() {
        let catalog = LabelCatalog::builtin();
        assert_eq!(catalog.candidates().len(), 11);
        assert_eq!(catalog.candidates()[0], "misinformation");
        assert_eq!(catalog.candidates()[3], "none");
        assert_eq!(catalog.candidates()[4], "confirmation bias");
        assert_eq!(catalog.candidates()[10], "false dilemma");
        assert_eq!(catalog.broad_labels().len(), 4);
        assert_eq!(catalog.detailed_labels().len(), 7);
    }

    #[test]
    fn test_every_candidate_has_an_explanation() {
        let catalog = LabelCatalog::builtin();
        for label in catalog.candidates() {
            assert_ne!(catalog.explain(label), FALLBACK_EXPLANATION, "{label}");
        }
    }

    #[test]
    fn test_is_detailed() {
        let catalog = LabelCatalog::builtin();
        for label in DETAILED_LABELS {
            assert!(catalog.is_detailed(label), "{label}");
        }
        for label in BROAD_LABELS {
            assert!(!catalog.is_detailed(label), "{label}");
        }
        assert!(!catalog.is_detailed(""));
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let catalog = LabelCatalog::builtin();
        assert_eq!(catalog.explain(""), "No explanation available.");
        assert_eq!(catalog.explain("sarcasm"), "No explanation available.");
    }

    #[test]
    fn test_from_default_config_matches_builtin() {
        let catalog = LabelCatalog::from_config(&LabelsConfig::default()).unwrap();
        assert_eq!(catalog.candidates(), LabelCatalog::builtin().candidates());
        assert_eq!(catalog.detailed_labels().len(), 7);
    }

    #[test]
    fn test_config_overrides() {
        let config = LabelsConfig {
            candidates: Some(vec!["bias".into(), "none".into(), "sarcasm".into()]),
            detailed_from: Some(2),
            explanations: HashMap::from([(
                "sarcasm".to_string(),
                "This text is sarcastic.".to_string(),
            )]),
            fallback_explanation: Some("Unknown.".into()),
        };

        let catalog = LabelCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.candidates().len(), 3);
        assert!(catalog.is_detailed("sarcasm"));
        assert!(!catalog.is_detailed("bias"));
        assert_eq!(catalog.explain("sarcasm"), "This text is sarcastic.");
        assert_eq!(catalog.explain("bias"), "This text shows a biased perspective.");
        assert_eq!(catalog.explain("irony"), "Unknown.");
    }

    #[test]
    fn test_detailed_from_past_builtin_end() {
        let config = LabelsConfig {
            detailed_from: Some(12),
            ..Default::default()
        };
        assert!(LabelCatalog::from_config(&config).is_err());
    }
}
