//! Text analysis
//!
//! Turns field text into positioned tokens. Both indexing and query parsing go
//! through the same `AnalyzerSpec`, so a query term only matches when it was
//! normalised the same way as the indexed text.

pub mod tokenizers;
pub mod filters;

use crate::token::Token;
use crate::analysis::tokenizers::TokenizerSpec;
use crate::analysis::filters::FilterSpec;


/// A tokenizer followed by a chain of filters
///
/// # Examples
///
/// ```
/// use tfidf::{Term, Token};
/// use tfidf::analysis::tokenizers::TokenizerSpec;
/// use tfidf::analysis::filters::FilterSpec;
/// use tfidf::analysis::AnalyzerSpec;
///
/// let analyzer = AnalyzerSpec {
///     tokenizer: TokenizerSpec::Standard,
///     filters: vec![FilterSpec::Lowercase],
/// };
///
/// assert_eq!(analyzer.analyze("Hello, WORLD!"), vec![
///     Token { term: Term::from_string("hello"), position: 1 },
///     Token { term: Term::from_string("world"), position: 2 },
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSpec {
    pub tokenizer: TokenizerSpec,
    pub filters: Vec<FilterSpec>,
}


impl AnalyzerSpec {
    /// Standard tokenizer, lowercased, with English stop words removed
    pub fn standard() -> AnalyzerSpec {
        AnalyzerSpec {
            tokenizer: TokenizerSpec::Standard,
            filters: vec![
                FilterSpec::Lowercase,
                FilterSpec::EnglishStop,
            ],
        }
    }

    pub fn initialise<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item=Token> + 'a> {
        self.filters.iter().fold(self.tokenizer.initialise(input), |tokens, filter| filter.initialise(tokens))
    }

    pub fn analyze(&self, input: &str) -> Vec<Token> {
        self.initialise(input).collect()
    }
}
