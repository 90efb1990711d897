use serde::{Deserialize, Serialize};

/// One printable character of an answer or saying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AnswerGlyph {
    /// Uppercase ASCII letter; takes part in the cover.
    Letter(char),
    /// Space, hyphen, apostrophe or any other filler. Printed as-is.
    Literal(char),
}

impl AnswerGlyph {
    pub fn parse(text: &str) -> Vec<AnswerGlyph> {
        text.chars().map(AnswerGlyph::from).collect()
    }
}

impl From<char> for AnswerGlyph {
    fn from(c: char) -> Self {
        if c.is_ascii_alphabetic() {
            AnswerGlyph::Letter(c.to_ascii_uppercase())
        } else {
            AnswerGlyph::Literal(c)
        }
    }
}

impl std::fmt::Display for AnswerGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerGlyph::Letter(c) | AnswerGlyph::Literal(c) => write!(f, "{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_word_answer() {
        let glyphs = AnswerGlyph::parse("o'er-it x");
        assert_eq!(
            glyphs,
            vec![
                AnswerGlyph::Letter('O'),
                AnswerGlyph::Literal('\''),
                AnswerGlyph::Letter('E'),
                AnswerGlyph::Letter('R'),
                AnswerGlyph::Literal('-'),
                AnswerGlyph::Letter('I'),
                AnswerGlyph::Letter('T'),
                AnswerGlyph::Literal(' '),
                AnswerGlyph::Letter('X'),
            ]
        );
        let n_letters = glyphs
            .iter()
            .filter(|g| matches!(g, AnswerGlyph::Letter(_)))
            .count();
        assert_eq!(n_letters, 6);
    }
}
