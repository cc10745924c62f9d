//! Splits strings by word boundaries, according to the Unicode Standard [Annex #29](http://unicode.org/reports/tr29/) rules

use std::iter::Zip;
use std::ops::RangeFrom;

use unicode_segmentation::{UnicodeSegmentation, UnicodeWords};

use crate::term::Term;
use crate::token::Token;


/// Emits one token per word. Positions start at 1 and punctuation never
/// takes up a position.
pub struct StandardTokenizer<'a> {
    words: Zip<RangeFrom<u32>, UnicodeWords<'a>>,
}


impl<'a> StandardTokenizer<'a> {
    pub fn new(input: &'a str) -> StandardTokenizer<'a> {
        StandardTokenizer {
            words: (1..).zip(input.unicode_words()),
        }
    }
}


impl<'a> Iterator for StandardTokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.words.next().map(|(position, word)| Token {
            term: Term::from_string(word),
            position,
        })
    }
}
