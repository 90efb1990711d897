/// Uppercases `text` and drops every character that is not an ASCII letter.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_alphabetic()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_spaces() {
        assert_eq!(normalize("Don't look back!"), "DONTLOOKBACK");
        assert_eq!(normalize("well-to-do"), "WELLTODO");
        assert_eq!(normalize("... 42 ?"), "");
    }

    #[test]
    fn test_normalize_ignores_non_ascii_letters() {
        assert_eq!(normalize("café"), "CAF");
    }

    #[test]
    fn test_letter_count() {
        assert_eq!(letter_count("SOS."), 3);
        assert_eq!(letter_count("A b-c 'd'"), 4);
    }
}
