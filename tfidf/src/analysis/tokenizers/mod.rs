pub mod standard;

use crate::token::Token;
use crate::analysis::tokenizers::standard::StandardTokenizer;


/// Splits field text into the first stream of an analyzer
///
/// ```
/// use tfidf::Term;
/// use tfidf::analysis::tokenizers::TokenizerSpec;
///
/// let terms = TokenizerSpec::Standard.initialise("Hello, world!").map(|token| token.term).collect::<Vec<_>>();
///
/// assert_eq!(terms, vec![Term::from_string("Hello"), Term::from_string("world")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TokenizerSpec {
    Standard,
}


impl TokenizerSpec {
    pub fn initialise<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item=Token> + 'a> {
        match *self {
            TokenizerSpec::Standard => Box::new(StandardTokenizer::new(input)),
        }
    }
}
