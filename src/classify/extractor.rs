use thiserror::Error;
use tracing::warn;

use crate::models::{Morphology, Person};

/// A person feature that could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MorphologyError {
    #[error("person feature has a non-numeric value: {0:?}")]
    InvalidPerson(String),
}

/// Read the person asserted by the tagger's morphology
///
/// Second person (`Person=2`) is not modeled and reads as `None`.
pub fn parse_person(morphology: &Morphology) -> Result<Person, MorphologyError> {
    let Some(value) = morphology.person() else {
        return Ok(Person::None);
    };

    // Only the first character is read, the value is a single digit
    match value.chars().next().and_then(|ch| ch.to_digit(10)) {
        Some(1) => Ok(Person::First),
        Some(3) => Ok(Person::Third),
        Some(_) => Ok(Person::None),
        None => Err(MorphologyError::InvalidPerson(value.to_string())),
    }
}

/// Person asserted by the tagger, treating a malformed feature as absent
pub fn extract_person(morphology: &Morphology) -> Person {
    match parse_person(morphology) {
        Ok(person) => person,
        Err(e) => {
            warn!("Ignoring malformed morphology {:?}: {}", morphology.to_string(), e);
            Person::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_person_values() {
        let first = Morphology::parse("Mood=Ind|Number=Plur|Person=1|Tense=Past|VerbForm=Fin");
        let third = Morphology::parse("Case=Nom|Gender=Fem|Number=Sing|Person=3|PronType=Prs");
        let second = Morphology::parse("Number=Sing|Person=2|PronType=Prs");

        assert_eq!(extract_person(&first), Person::First);
        assert_eq!(extract_person(&third), Person::Third);
        assert_eq!(extract_person(&second), Person::None);
    }

    #[test]
    fn test_missing_feature() {
        assert_eq!(extract_person(&Morphology::parse("")), Person::None);
        assert_eq!(extract_person(&Morphology::parse("Gender=Masc|Number=Sing")), Person::None);
    }

    #[test]
    fn test_malformed_feature_is_reported_and_ignored() {
        let morph = Morphology::parse("Number=Plur|Person=x");
        assert_eq!(
            parse_person(&morph),
            Err(MorphologyError::InvalidPerson("x".to_string()))
        );
        assert_eq!(extract_person(&morph), Person::None);

        let empty_value = Morphology::parse("Person=");
        assert!(parse_person(&empty_value).is_err());
        assert_eq!(extract_person(&empty_value), Person::None);

        let trailing = Morphology::parse("Person=1x");
        assert_eq!(parse_person(&trailing), Ok(Person::First));
    }
}
