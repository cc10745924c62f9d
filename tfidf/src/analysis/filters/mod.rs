pub mod lowercase;
pub mod stop;

use crate::token::Token;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::stop::{StopFilter, english_stop_words};


/// A token filter that can be chained onto any token stream
///
/// Filters never renumber positions. A stop word that gets dropped leaves a
/// hole in the sequence, which phrase matching relies on.
///
/// # Examples
///
/// ```
/// use tfidf::{Term, Token};
/// use tfidf::analysis::tokenizers::TokenizerSpec;
/// use tfidf::analysis::filters::FilterSpec;
///
/// let mut tokens = TokenizerSpec::Standard.initialise("The Quick Fox");
/// for filter in &[FilterSpec::Lowercase, FilterSpec::EnglishStop] {
///     tokens = filter.initialise(tokens);
/// }
///
/// assert_eq!(tokens.collect::<Vec<Token>>(), vec![
///     Token { term: Term::from_string("quick"), position: 2 },
///     Token { term: Term::from_string("fox"), position: 3 },
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    Lowercase,
    EnglishStop,
}


impl FilterSpec {
    pub fn initialise<'a>(&self, input: Box<dyn Iterator<Item=Token> + 'a>) -> Box<dyn Iterator<Item=Token> + 'a> {
        match *self {
            FilterSpec::Lowercase => {
                Box::new(LowercaseFilter::new(input))
            }
            FilterSpec::EnglishStop => {
                Box::new(StopFilter::new(input, english_stop_words()))
            }
        }
    }
}
