//! Converts each token into lowercase

use crate::term::Term;
use crate::token::Token;


/// Lowercases text terms. Terms that aren't valid UTF-8 pass through untouched.
pub struct LowercaseFilter<I> {
    tokens: I,
}


impl<I: Iterator<Item=Token>> LowercaseFilter<I> {
    pub fn new(tokens: I) -> LowercaseFilter<I> {
        LowercaseFilter {
            tokens,
        }
    }
}


fn lowercase_term(term: Term) -> Term {
    match term.as_str() {
        Some(text) if text.chars().any(char::is_uppercase) => Term::from_string(&text.to_lowercase()),
        _ => term,
    }
}


impl<I: Iterator<Item=Token>> Iterator for LowercaseFilter<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.tokens.next().map(|Token { term, position }| Token { term: lowercase_term(term), position })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tokens.size_hint()
    }
}


#[cfg(test)]
mod tests {
    use crate::term::Term;
    use crate::token::Token;

    use super::LowercaseFilter;

    #[test]
    fn test_lowercase_filter() {
        let tokens: Vec<Token> = vec![
            Token { term: Term::from_string("Hulk"), position: 1 },
            Token { term: Term::from_string("SMASH"), position: 2 }
        ];

        let token_filter = LowercaseFilter::new(tokens.into_iter());
        let tokens = token_filter.collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token { term: Term::from_string("hulk"), position: 1 },
            Token { term: Term::from_string("smash"), position: 2 }
        ]);
    }

    #[test]
    fn test_lowercase_filter_cjk() {
        let tokens: Vec<Token> = vec![
            Token { term: Term::from_string("こんにちは"), position: 1 },
            Token { term: Term::from_string("ハチ公"), position: 2 },
            Token { term: Term::from_string("Test"), position: 3 }
        ];

        let token_filter = LowercaseFilter::new(tokens.into_iter());
        let tokens = token_filter.collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token { term: Term::from_string("こんにちは"), position: 1 },
            Token { term: Term::from_string("ハチ公"), position: 2 },
            Token { term: Term::from_string("test"), position: 3 }
        ]);
    }

    #[test]
    fn test_lowercase_filter_leaves_binary_terms() {
        let tokens: Vec<Token> = vec![
            Token { term: Term::from_bytes(&[0xff, b'A']), position: 1 },
        ];

        let token_filter = LowercaseFilter::new(tokens.into_iter());
        let tokens = token_filter.collect::<Vec<Token>>();

        assert_eq!(tokens[0].term, Term::from_bytes(&[0xff, b'A']));
    }
}
