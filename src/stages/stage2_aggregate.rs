use crate::models::{ClassifiedToken, Person, PersonCounts, PersonShares, Resolution};

/// Execute Stage 2: aggregate classified tokens into person shares
///
/// Every classified token counts toward the denominator; only tokens
/// resolved to first or third person count toward a numerator. A document
/// without informative tokens gets zero for both shares.
pub fn execute_stage2(classified: &[ClassifiedToken]) -> (PersonCounts, PersonShares) {
    let mut counts = PersonCounts::default();

    for token in classified {
        counts.total += 1;
        match token.resolved {
            Person::First => counts.first += 1,
            Person::Third => counts.third += 1,
            Person::None => {}
        }
        if token.resolution == Resolution::RuleOverModel {
            counts.conflicts += 1;
        }
    }

    let shares = PersonShares {
        first_person_percent: share(counts.first, counts.total),
        third_person_percent: share(counts.third, counts.total),
    };

    (counts, shares)
}

/// `count / total` rounded to 2 decimals, half to even
///
/// Rounding is done on exact integer hundredths, so two shares of disjoint
/// counts never add up to more than 1.0.
pub fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let scaled = count * 100;
    let mut hundredths = scaled / total;
    let remainder = scaled % total;

    if remainder * 2 > total || (remainder * 2 == total && hundredths % 2 == 1) {
        hundredths += 1;
    }

    hundredths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_tokens;
    use crate::models::Token;

    #[test]
    fn test_share_rounding() {
        assert_eq!(share(0, 0), 0.0);
        assert_eq!(share(2, 2), 1.0);
        assert_eq!(share(1, 3), 0.33);
        assert_eq!(share(2, 3), 0.67);
        // Ties go to the even hundredth
        assert_eq!(share(1, 8), 0.12);
        assert_eq!(share(3, 8), 0.38);
    }

    #[test]
    fn test_shares_never_exceed_one() {
        for total in 1..=250 {
            for first in 0..=total {
                let third = total - first;
                let sum = share(first, total) + share(third, total);
                assert!(sum <= 1.0 + 1e-9, "first={} third={} total={}", first, third, total);
            }
        }
    }

    #[test]
    fn test_first_person_document() {
        let tokens = vec![
            Token::from_triple("yo", "PRON", ""),
            Token::from_triple("comimos", "VERB", ""),
            Token::from_triple(".", "PUNCT", ""),
        ];
        let classified = classify_tokens(&tokens);

        let (counts, shares) = execute_stage2(&classified);

        assert_eq!(counts.total, 2);
        assert_eq!(counts.first, 2);
        assert_eq!(shares.first_person_percent, 1.0);
        assert_eq!(shares.third_person_percent, 0.0);
    }

    #[test]
    fn test_document_without_informative_tokens() {
        let tokens = vec![
            Token::from_triple("Hoy", "ADV", ""),
            Token::from_triple("mucho", "ADJ", "Number=Sing"),
            Token::from_triple("frío", "NOUN", "Gender=Masc"),
            Token::from_triple(".", "PUNCT", ""),
        ];
        let classified = classify_tokens(&tokens);

        let (counts, shares) = execute_stage2(&classified);

        assert_eq!(counts.total, 0);
        assert_eq!(shares.first_person_percent, 0.0);
        assert_eq!(shares.third_person_percent, 0.0);
    }

    #[test]
    fn test_unresolved_tokens_count_in_denominator() {
        let tokens = vec![
            Token::from_triple("Ellos", "PRON", "Person=3"),
            Token::from_triple("tienen", "VERB", "Person=3"),
            Token::from_triple("una", "DET", ""),
            Token::from_triple("es", "AUX", ""),
        ];
        let classified = classify_tokens(&tokens);

        let (counts, shares) = execute_stage2(&classified);

        assert_eq!(counts.total, 4);
        assert_eq!(counts.third, 2);
        assert_eq!(shares.first_person_percent, 0.0);
        assert_eq!(shares.third_person_percent, 0.5);
    }
}
