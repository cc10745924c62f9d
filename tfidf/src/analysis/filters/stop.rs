//! Removes stop words from a token stream
//!
//! Positions of the remaining tokens are left untouched so the gaps left by
//! removed words are still visible to phrase matching.

use std::collections::HashSet;

use crate::token::Token;


pub fn english_stop_words() -> HashSet<&'static str> {
    hashset! {
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if",
        "in", "into", "is", "it", "no", "not", "of", "on", "or", "such", "that",
        "the", "their", "then", "there", "these", "they", "this", "to", "was",
        "will", "with",
    }
}


pub struct StopFilter<I> {
    tokens: I,
    stop_words: HashSet<&'static str>,
}


impl<I: Iterator<Item=Token>> StopFilter<I> {
    pub fn new(tokens: I, stop_words: HashSet<&'static str>) -> StopFilter<I> {
        StopFilter {
            tokens,
            stop_words,
        }
    }
}


impl<I: Iterator<Item=Token>> Iterator for StopFilter<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let token = self.tokens.next()?;

            let is_stop_word = match token.term.as_str() {
                Some(word) => self.stop_words.contains(word),
                None => false,
            };

            if !is_stop_word {
                return Some(token);
            }
        }
    }
}
