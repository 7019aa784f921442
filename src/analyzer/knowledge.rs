use std::collections::HashSet;
use std::path::Path;

use super::types::{KnowledgeBaseError, SymptomEntry, Urgency};

/// Ordered, read-only symptom-to-condition mapping table. Declaration order
/// doubles as the tie-break order during ranking, so entries near the top of
/// the table win equal-confidence ties.
pub struct KnowledgeBase {
    entries: Vec<SymptomEntry>,
}

impl KnowledgeBase {
    /// Build a knowledge base from explicit entries, validating the table.
    pub fn new(entries: Vec<SymptomEntry>) -> Result<Self, KnowledgeBaseError> {
        let kb = Self { entries };
        kb.validate()?;
        Ok(kb)
    }

    /// Load a knowledge base from a JSON file (array of entries).
    pub fn load(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| KnowledgeBaseError::Load(path.display().to_string(), e.to_string()))?;
        let entries: Vec<SymptomEntry> =
            serde_json::from_str(&json).map_err(|e| KnowledgeBaseError::Parse(e.to_string()))?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[SymptomEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(&self) -> Result<(), KnowledgeBaseError> {
        if self.entries.is_empty() {
            return Err(KnowledgeBaseError::Empty);
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.condition_name.as_str()) {
                return Err(KnowledgeBaseError::DuplicateCondition(
                    entry.condition_name.clone(),
                ));
            }
            if entry.keywords.is_empty() {
                return Err(KnowledgeBaseError::NoKeywords(entry.condition_name.clone()));
            }
            // A blank keyword can never match but would still count in the
            // match-ratio denominator, silently capping the entry's score.
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(KnowledgeBaseError::BlankKeyword(
                    entry.condition_name.clone(),
                ));
            }
            if !(0.0..=1.0).contains(&entry.base_confidence) {
                return Err(KnowledgeBaseError::ConfidenceOutOfRange {
                    condition: entry.condition_name.clone(),
                    value: entry.base_confidence,
                });
            }
        }
        Ok(())
    }

    /// Built-in table: conservative coverage of common presentations plus
    /// the two red-flag entries that must always outrank the rest.
    pub fn builtin() -> Self {
        let entries = vec![
            SymptomEntry {
                condition_name: "Cardiac or chest emergency (angina / myocardial infarction)"
                    .into(),
                keywords: vec![
                    "chest pain".into(),
                    "pressure in chest".into(),
                    "tightness in chest".into(),
                ],
                base_confidence: 0.95,
                urgency: Urgency::High,
                next_steps: vec![
                    "If chest pain is present, seek emergency care immediately".into(),
                    "Do not drive yourself; call emergency services".into(),
                ],
            },
            SymptomEntry {
                condition_name: "Acute respiratory distress / serious respiratory issue".into(),
                keywords: vec![
                    "shortness of breath".into(),
                    "breathless".into(),
                    "difficulty breathing".into(),
                    "cant breathe".into(),
                ],
                base_confidence: 0.9,
                urgency: Urgency::High,
                next_steps: vec![
                    "Breathing difficulty is a red flag; seek urgent medical evaluation".into(),
                    "Do not drive yourself; call emergency services".into(),
                ],
            },
            SymptomEntry {
                condition_name: "Common cold (viral upper respiratory infection)".into(),
                keywords: vec![
                    "sore throat".into(),
                    "runny nose".into(),
                    "sneezing".into(),
                    "stuffy nose".into(),
                    "nasal congestion".into(),
                ],
                base_confidence: 0.65,
                urgency: Urgency::Low,
                next_steps: vec![
                    "Rest, hydrate, and use OTC analgesics if needed".into(),
                    "Monitor symptoms for 48-72 hours".into(),
                    "Consult a healthcare provider if symptoms worsen or persist beyond 7 days"
                        .into(),
                ],
            },
            SymptomEntry {
                condition_name: "Influenza (flu)".into(),
                keywords: vec![
                    "fever".into(),
                    "body aches".into(),
                    "chills".into(),
                    "fatigue".into(),
                ],
                base_confidence: 0.55,
                urgency: Urgency::Medium,
                next_steps: vec![
                    "Rest, hydrate, and use OTC analgesics if needed".into(),
                    "Monitor temperature; seek care for sustained high fever".into(),
                    "Consult a healthcare provider if symptoms worsen or persist beyond 7 days"
                        .into(),
                ],
            },
            SymptomEntry {
                condition_name: "Gastrointestinal infection / gastroenteritis".into(),
                keywords: vec![
                    "nausea".into(),
                    "vomiting".into(),
                    "diarrhea".into(),
                    "abdominal pain".into(),
                ],
                base_confidence: 0.5,
                urgency: Urgency::Medium,
                next_steps: vec![
                    "Small sips of fluid to avoid dehydration".into(),
                    "Seek care if unable to keep fluids down for more than 24 hours".into(),
                    "Consult a healthcare provider if symptoms worsen or persist beyond 7 days"
                        .into(),
                ],
            },
            SymptomEntry {
                condition_name: "Allergic rhinitis (allergy)".into(),
                keywords: vec![
                    "itchy eyes".into(),
                    "watery eyes".into(),
                    "sneezing".into(),
                    "pollen".into(),
                ],
                base_confidence: 0.45,
                urgency: Urgency::Low,
                next_steps: vec![
                    "Limit exposure to the suspected trigger".into(),
                    "Consider an OTC antihistamine".into(),
                    "Consult a healthcare provider if symptoms worsen or persist beyond 7 days"
                        .into(),
                ],
            },
        ];
        // Built-in table is validated by tests; construction cannot fail here.
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn entry(name: &str, keywords: &[&str], confidence: f64) -> SymptomEntry {
        SymptomEntry {
            condition_name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            base_confidence: confidence,
            urgency: Urgency::Low,
            next_steps: vec!["Monitor symptoms".into()],
        }
    }

    #[test]
    fn builtin_table_is_valid() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.validate().is_ok());
        assert!(kb.len() >= 6);
    }

    #[test]
    fn builtin_red_flags_rank_before_routine_entries() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.entries()[0].condition_name.contains("Cardiac"));
        assert_eq!(kb.entries()[0].urgency, Urgency::High);
        assert_eq!(kb.entries()[1].urgency, Urgency::High);
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(
            KnowledgeBase::new(vec![]),
            Err(KnowledgeBaseError::Empty)
        ));
    }

    #[test]
    fn rejects_duplicate_condition_names() {
        let result = KnowledgeBase::new(vec![
            entry("Cold", &["sneezing"], 0.5),
            entry("Cold", &["cough"], 0.4),
        ]);
        assert!(matches!(
            result,
            Err(KnowledgeBaseError::DuplicateCondition(name)) if name == "Cold"
        ));
    }

    #[test]
    fn rejects_entry_without_keywords() {
        let result = KnowledgeBase::new(vec![entry("Cold", &[], 0.5)]);
        assert!(matches!(result, Err(KnowledgeBaseError::NoKeywords(_))));
    }

    #[test]
    fn rejects_blank_keyword_among_valid_ones() {
        let result = KnowledgeBase::new(vec![entry("Flu", &["", "fever"], 0.5)]);
        assert!(matches!(
            result,
            Err(KnowledgeBaseError::BlankKeyword(name)) if name == "Flu"
        ));
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let result = KnowledgeBase::new(vec![entry("Cold", &["sneezing"], 1.2)]);
        assert!(matches!(
            result,
            Err(KnowledgeBaseError::ConfidenceOutOfRange { value, .. }) if value == 1.2
        ));
    }

    #[test]
    fn loads_from_json_file() {
        let json = r#"[
            {
                "condition_name": "Common Cold",
                "keywords": ["sore throat", "fever", "fatigue"],
                "base_confidence": 0.9,
                "urgency": "low",
                "next_steps": ["Rest and hydrate"]
            }
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.entries()[0].condition_name, "Common Cold");
        assert_eq!(kb.entries()[0].urgency, Urgency::Low);
    }

    #[test]
    fn load_reports_missing_file() {
        let result = KnowledgeBase::load(Path::new("/nonexistent/kb.json"));
        assert!(matches!(result, Err(KnowledgeBaseError::Load(_, _))));
    }
}
