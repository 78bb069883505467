use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Morphology;

/// Coarse part-of-speech tag assigned by the tagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoarseTag {
    /// Pronoun
    Pron,
    /// Main verb
    Verb,
    /// Auxiliary verb
    Aux,
    /// Determiner (articles and possessive adjectives)
    Det,
    /// Any label without a person-bearing role
    Other,
}

impl CoarseTag {
    /// Whether words with this tag carry grammatical person
    pub fn is_person_bearing(self) -> bool {
        !matches!(self, CoarseTag::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CoarseTag::Pron => "PRON",
            CoarseTag::Verb => "VERB",
            CoarseTag::Aux => "AUX",
            CoarseTag::Det => "DET",
            CoarseTag::Other => "OTHER",
        }
    }
}

impl FromStr for CoarseTag {
    type Err = std::convert::Infallible;

    /// Unknown labels map to `Other`, so parsing never fails
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim().to_ascii_uppercase().as_str() {
            "PRON" => CoarseTag::Pron,
            "VERB" => CoarseTag::Verb,
            "AUX" => CoarseTag::Aux,
            "DET" => CoarseTag::Det,
            _ => CoarseTag::Other,
        };
        Ok(tag)
    }
}

impl fmt::Display for CoarseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical person of a word. Second person is not modeled.
///
/// Serialized as its integer value (0, 1 or 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Person {
    /// No person asserted
    #[default]
    None,
    First,
    Third,
}

impl Person {
    pub fn as_u8(self) -> u8 {
        match self {
            Person::None => 0,
            Person::First => 1,
            Person::Third => 3,
        }
    }

    pub fn is_none(self) -> bool {
        self == Person::None
    }
}

impl From<Person> for u8 {
    fn from(person: Person) -> Self {
        person.as_u8()
    }
}

impl TryFrom<u8> for Person {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Person::None),
            1 => Ok(Person::First),
            3 => Ok(Person::Third),
            other => Err(format!("unsupported person value: {}", other)),
        }
    }
}

/// A token as produced by the morphological tagger - never changed afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,
    /// Coarse part-of-speech tag
    pub tag: CoarseTag,
    /// Parsed morphological features
    pub morphology: Morphology,
}

impl Token {
    /// Build a token from the raw `(text, tag, morphology)` triple emitted by a tagger
    pub fn from_triple(text: &str, tag: &str, morphology: &str) -> Self {
        Self {
            text: text.to_string(),
            tag: tag.parse().unwrap_or(CoarseTag::Other),
            morphology: Morphology::parse(morphology),
        }
    }
}

/// Which precedence rule decided a token's resolved person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Rules and tagger asserted the same person
    Agreement,
    /// Rules and tagger disagreed; the rule-based label won
    RuleOverModel,
    /// Only the rules asserted a person
    RuleOnly,
    /// Only the tagger asserted a person
    ModelOnly,
    /// Determiner reclassified with the pronoun table
    DeterminerFallback,
    /// Nobody asserted a person
    Unresolved,
}

/// A token that passed the inclusion filter, with both raw labels kept for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedToken {
    pub text: String,
    pub tag: CoarseTag,
    /// Rule-based label (after the determiner fallback, if applied)
    pub manual_person: Person,
    /// Label asserted by the tagger's morphology
    pub model_person: Person,
    /// Final decision feeding the aggregation
    pub resolved: Person,
    pub resolution: Resolution,
}

impl ClassifiedToken {
    /// Trace tuple `(text, tag, manual_person, model_person)` persisted with the document
    pub fn trace(&self) -> (&str, &'static str, u8, u8) {
        (
            self.text.as_str(),
            self.tag.as_str(),
            self.manual_person.as_u8(),
            self.model_person.as_u8(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!("PRON".parse::<CoarseTag>().unwrap(), CoarseTag::Pron);
        assert_eq!("aux".parse::<CoarseTag>().unwrap(), CoarseTag::Aux);
        assert_eq!("PUNCT".parse::<CoarseTag>().unwrap(), CoarseTag::Other);
        assert_eq!("".parse::<CoarseTag>().unwrap(), CoarseTag::Other);
    }

    #[test]
    fn test_person_serializes_as_integer() {
        let json = serde_json::to_string(&vec![Person::None, Person::First, Person::Third]).unwrap();
        assert_eq!(json, "[0,1,3]");

        let parsed: Person = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Person::Third);
        assert!(serde_json::from_str::<Person>("2").is_err());
    }

    #[test]
    fn test_token_from_triple() {
        let token = Token::from_triple("hablan", "VERB", "Mood=Ind|Number=Plur|Person=3");

        assert_eq!(token.text, "hablan");
        assert_eq!(token.tag, CoarseTag::Verb);
        assert_eq!(token.morphology.get("Number"), Some("Plur"));
    }
}
