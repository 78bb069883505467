use std::fmt;

use serde::{Deserialize, Serialize};

/// Feature name carrying grammatical person
pub const PERSON_FEATURE: &str = "Person";

/// Morphological features of a token, parsed from the tagger's flat
/// `Name=Value|Name=Value` annotation. Feature order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Morphology {
    features: Vec<(String, String)>,
}

impl Morphology {
    /// Parse a flat feature string. Pieces without `=` carry no value and are skipped.
    pub fn parse(raw: &str) -> Self {
        let features = raw
            .split('|')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect();

        Self { features }
    }

    /// Value of a feature by exact name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the person feature; the name is matched case-insensitively
    pub fn person(&self) -> Option<&str> {
        self.features
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(PERSON_FEATURE))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_person(&self) -> bool {
        self.person().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }
}

impl fmt::Display for Morphology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.features.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

impl From<String> for Morphology {
    fn from(raw: String) -> Self {
        Morphology::parse(&raw)
    }
}

impl From<Morphology> for String {
    fn from(morphology: Morphology) -> Self {
        morphology.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_features() {
        let morph = Morphology::parse("Mood=Ind|Number=Plur|Person=1|Tense=Pres|VerbForm=Fin");

        assert_eq!(morph.len(), 5);
        assert_eq!(morph.get("Mood"), Some("Ind"));
        assert_eq!(morph.person(), Some("1"));
        assert_eq!(morph.get("Gender"), None);
    }

    #[test]
    fn test_empty_and_malformed_pieces() {
        assert!(Morphology::parse("").is_empty());

        let morph = Morphology::parse("Foreign|=Yes|Number=Sing");
        assert_eq!(morph.len(), 1);
        assert_eq!(morph.get("Number"), Some("Sing"));
    }

    #[test]
    fn test_person_lookup_ignores_case() {
        let morph = Morphology::parse("PERSON=3");
        assert!(morph.has_person());
        assert_eq!(morph.person(), Some("3"));

        assert!(!Morphology::parse("Gender=Fem|Number=Sing").has_person());
    }

    #[test]
    fn test_display_keeps_order() {
        let raw = "Gender=Fem|Number=Sing|Person=3|PronType=Prs";
        assert_eq!(Morphology::parse(raw).to_string(), raw);
    }
}
