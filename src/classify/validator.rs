/// Accented and special letters of the Spanish alphabet, beyond ASCII
const SPANISH_EXTRA_LETTERS: &[char] = &[
    'á', 'é', 'í', 'ó', 'ú', 'Á', 'É', 'Í', 'Ó', 'Ú', 'ü', 'Ü', 'ñ', 'Ñ',
];

/// Check that a token is made only of Spanish letters
///
/// This is not a spelling check: it filters out punctuation, digits,
/// symbols and whitespace, which carry no grammatical person.
pub fn is_valid_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_spanish_letter)
}

fn is_spanish_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || SPANISH_EXTRA_LETTERS.contains(&ch)
}
