use crate::models::{ClassifiedToken, CoarseTag, Person, Resolution, Token};

use super::extractor::extract_person;
use super::rules::{classify_pronoun, rule_for};
use super::validator::is_valid_word;

/// Whether a token carries usable evidence about grammatical person
///
/// The surface form must be a Spanish word, and either its tag has a rule
/// classifier or the tagger annotated a person feature (even a malformed one).
pub fn is_informative(token: &Token) -> bool {
    is_valid_word(&token.text) && (token.tag.is_person_bearing() || token.morphology.has_person())
}

/// Merge the rule-based and the tagger's labels into one decision
///
/// Precedence:
/// 1. Both labels set and different: the rule-based label wins
/// 2. Both labels set and equal: that label
/// 3. Only one label set: that label
/// 4. Neither set: `None`
///
/// The determiner fallback is applied by [`classify_token`], not here.
pub fn resolve(manual: Person, model: Person) -> (Person, Resolution) {
    match (manual, model) {
        (Person::None, Person::None) => (Person::None, Resolution::Unresolved),
        (manual, Person::None) => (manual, Resolution::RuleOnly),
        (Person::None, model) => (model, Resolution::ModelOnly),
        (manual, model) if manual == model => (manual, Resolution::Agreement),
        (manual, _) => (manual, Resolution::RuleOverModel),
    }
}

/// Classify a single token, or `None` if it fails the inclusion filter
pub fn classify_token(token: &Token) -> Option<ClassifiedToken> {
    if !is_informative(token) {
        return None;
    }

    let manual = rule_for(token.tag).map_or(Person::None, |rule| rule(&token.text));
    let model = extract_person(&token.morphology);

    let mut manual_person = manual;
    let (mut resolved, mut resolution) = resolve(manual, model);

    // Determiners that are not possessives may still be used pronominally
    if resolution == Resolution::Unresolved && token.tag == CoarseTag::Det {
        let fallback = classify_pronoun(&token.text);
        if !fallback.is_none() {
            manual_person = fallback;
            resolved = fallback;
            resolution = Resolution::DeterminerFallback;
        }
    }

    Some(ClassifiedToken {
        text: token.text.clone(),
        tag: token.tag,
        manual_person,
        model_person: model,
        resolved,
        resolution,
    })
}
