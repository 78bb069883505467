//! Rule-based person classification
//!
//! Follows the normative definition of grammatical person: it shows up as
//! inflection on personal pronouns, possessives and verbs. Each coarse tag
//! with a rule maps to one classifier function.

use crate::models::{CoarseTag, Person};

/// A rule classifier for one coarse tag
pub type RuleFn = fn(&str) -> Person;

const FIRST_PERSON_POSSESSIVES: &[&str] = &[
    "mi", "mis", "mío", "mía", "míos", "mías", "nuestro", "nuestra", "nuestros", "nuestras",
    "mio", "mia", "mios", "mias",
];

const THIRD_PERSON_POSSESSIVES: &[&str] = &[
    "su", "sus", "suyo", "suya", "suyos", "suyas", "cuyo", "cuya", "cuyos", "cuyas",
];

const FIRST_PERSON_PRONOUNS: &[&str] = &[
    "yo", "me", "mí", "mi", "nosotros", "nosotras", "nos", "nuestro", "nuestra", "nuestros",
    "nuestras",
];

const THIRD_PERSON_PRONOUNS: &[&str] = &[
    "él", "ella", "ello", "ellos", "ellas", "ustedes", "le", "lo", "la", "los", "las", "les",
    "se", "su", "sus", "suyo", "suya", "suyos", "suyas", "cuyo", "cuya", "cuyos", "cuyas", "el",
];

/// Rule classifier for a coarse tag, if that tag has one
pub fn rule_for(tag: CoarseTag) -> Option<RuleFn> {
    match tag {
        CoarseTag::Pron => Some(classify_pronoun),
        CoarseTag::Det => Some(classify_possessive),
        CoarseTag::Verb | CoarseTag::Aux => Some(classify_verb),
        CoarseTag::Other => None,
    }
}

/// Classify a verb or auxiliary by its plural ending
///
/// Only plural conjugations are told apart reliably by suffix:
/// `-n` marks third person plural, `-mos`/`-nos` first person plural.
/// Singular forms are left undetermined.
pub fn classify_verb(word: &str) -> Person {
    let lower = word.to_lowercase();

    if lower.ends_with('n') {
        return Person::Third;
    }

    if lower.chars().count() > 3 && (lower.ends_with("mos") || lower.ends_with("nos")) {
        return Person::First;
    }

    Person::None
}

/// Classify a determiner as a possessive; articles and other determiners get `None`
pub fn classify_possessive(word: &str) -> Person {
    lookup(word, FIRST_PERSON_POSSESSIVES, THIRD_PERSON_POSSESSIVES)
}

/// Classify a personal pronoun
pub fn classify_pronoun(word: &str) -> Person {
    lookup(word, FIRST_PERSON_PRONOUNS, THIRD_PERSON_PRONOUNS)
}

fn lookup(word: &str, first: &[&str], third: &[&str]) -> Person {
    let lower = word.to_lowercase();

    if first.contains(&lower.as_str()) {
        Person::First
    } else if third.contains(&lower.as_str()) {
        Person::Third
    } else {
        Person::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_plural_endings() {
        assert_eq!(classify_verb("hablan"), Person::Third);
        assert_eq!(classify_verb("HABLAN"), Person::Third);
        assert_eq!(classify_verb("hablamos"), Person::First);
        assert_eq!(classify_verb("comimos"), Person::First);
        assert_eq!(classify_verb("levantándonos"), Person::First);
    }

    #[test]
    fn test_verb_singular_is_undetermined() {
        assert_eq!(classify_verb("hablo"), Person::None);
        assert_eq!(classify_verb("habla"), Person::None);
        assert_eq!(classify_verb("es"), Person::None);
    }

    #[test]
    fn test_verb_short_words_need_more_than_three_chars() {
        // "mos" alone is not a first person plural ending
        assert_eq!(classify_verb("mos"), Person::None);
        assert_eq!(classify_verb("nos"), Person::None);
        assert_eq!(classify_verb("amos"), Person::First);
    }

    #[test]
    fn test_possessives() {
        assert_eq!(classify_possessive("su"), Person::Third);
        assert_eq!(classify_possessive("Nuestra"), Person::First);
        assert_eq!(classify_possessive("mias"), Person::First);
        assert_eq!(classify_possessive("cuyos"), Person::Third);
        assert_eq!(classify_possessive("la"), Person::None);
        assert_eq!(classify_possessive("un"), Person::None);
    }

    #[test]
    fn test_pronouns() {
        assert_eq!(classify_pronoun("yo"), Person::First);
        assert_eq!(classify_pronoun("Mí"), Person::First);
        assert_eq!(classify_pronoun("ÉL"), Person::Third);
        assert_eq!(classify_pronoun("ustedes"), Person::Third);
        assert_eq!(classify_pronoun("la"), Person::Third);
        assert_eq!(classify_pronoun("tú"), Person::None);
        assert_eq!(classify_pronoun("que"), Person::None);
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(rule_for(CoarseTag::Pron).map(|f| f("yo")), Some(Person::First));
        assert_eq!(rule_for(CoarseTag::Det).map(|f| f("sus")), Some(Person::Third));
        assert_eq!(rule_for(CoarseTag::Verb).map(|f| f("cantan")), Some(Person::Third));
        assert_eq!(rule_for(CoarseTag::Aux).map(|f| f("hemos")), Some(Person::First));
        assert!(rule_for(CoarseTag::Other).is_none());
    }

    #[test]
    fn test_rules_only_return_modeled_persons() {
        let words = ["yo", "tú", "hablan", "casa", "su", "la", "123", "", "nosotros"];
        for word in words {
            for rule in [classify_verb, classify_possessive, classify_pronoun] {
                let person = rule(word);
                assert!(matches!(person.as_u8(), 0 | 1 | 3));
            }
        }
    }
}
