pub mod phrase;
pub mod weight;

use std::fmt;

use crate::term::Term;
use crate::token::Token;
use crate::similarity::SimilarityModel;
use crate::store::IndexReader;
use crate::query::weight::Weight;


#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    MatchNone,
    MatchTerm {
        field: String,
        term: Term,
        boost: f32,
    },
    MatchPhrase {
        field: String,
        /// Positions are only used relative to each other
        tokens: Vec<Token>,
        slop: u32,
        boost: f32,
    },
    Conjunction {
        queries: Vec<Query>,
    },
    Disjunction {
        queries: Vec<Query>,
    },
}


impl Query {
    pub fn new_term(field: &str, term: Term) -> Query {
        Query::MatchTerm {
            field: field.to_string(),
            term,
            boost: 1.0,
        }
    }

    /// Builds a phrase from analyzed tokens. A single token becomes a term
    /// query and no tokens match nothing.
    pub fn new_phrase(field: &str, mut tokens: Vec<Token>, slop: u32) -> Query {
        match tokens.len() {
            0 => Query::MatchNone,
            1 => {
                let token = tokens.remove(0);
                Query::new_term(field, token.term)
            }
            _ => {
                Query::MatchPhrase {
                    field: field.to_string(),
                    tokens,
                    slop,
                    boost: 1.0,
                }
            }
        }
    }

    pub fn new_conjunction(mut queries: Vec<Query>) -> Query {
        match queries.len() {
            0 => Query::MatchNone,
            1 => queries.remove(0),
            _ => {
                Query::Conjunction {
                    queries,
                }
            }
        }
    }

    pub fn new_disjunction(mut queries: Vec<Query>) -> Query {
        match queries.len() {
            0 => Query::MatchNone,
            1 => queries.remove(0),
            _ => {
                Query::Disjunction {
                    queries,
                }
            }
        }
    }

    pub fn boost(&mut self, add_boost: f32) {
        if add_boost == 1.0 {
            return;
        }

        match *self {
            Query::MatchNone => (),
            Query::MatchTerm{ref mut boost, ..} | Query::MatchPhrase{ref mut boost, ..} => {
                *boost *= add_boost;
            }
            Query::Conjunction{ref mut queries} | Query::Disjunction{ref mut queries} => {
                for query in queries {
                    query.boost(add_boost);
                }
            }
        }
    }

    /// Builds an unnormalised weight for this query against `reader`
    pub fn create_weight<R: IndexReader + ?Sized>(&self, reader: &R, similarity: SimilarityModel) -> Weight {
        Weight::new(self, reader, similarity)
    }
}


impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Query::MatchNone => write!(f, "MatchNone"),
            Query::MatchTerm{ref field, ref term, ..} => write!(f, "{}:{}", field, term),
            Query::MatchPhrase{ref field, ref tokens, slop, ..} => {
                write!(f, "{}:\"", field)?;
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", token.term)?;
                }
                write!(f, "\"")?;

                if slop != 0 {
                    write!(f, "~{}", slop)?;
                }

                Ok(())
            }
            Query::Conjunction{ref queries} | Query::Disjunction{ref queries} => {
                let required = matches!(*self, Query::Conjunction{..});

                write!(f, "(")?;
                for (i, query) in queries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    if required {
                        write!(f, "+")?;
                    }
                    write!(f, "{}", query)?;
                }
                write!(f, ")")
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::term::Term;
    use crate::token::Token;

    use super::Query;

    fn token(term: &str, position: u32) -> Token {
        Token {
            term: Term::from_string(term),
            position,
        }
    }

    #[test]
    fn test_boost_propagates_to_leaves() {
        let mut query = Query::new_disjunction(vec![
            Query::new_term("title", Term::from_string("hello")),
            Query::new_phrase("body", vec![token("hello", 1), token("world", 2)], 0),
        ]);
        query.boost(2.0);
        query.boost(1.5);

        match query {
            Query::Disjunction{ref queries} => {
                for query in queries {
                    match *query {
                        Query::MatchTerm{boost, ..} | Query::MatchPhrase{boost, ..} => assert_eq!(boost, 3.0),
                        _ => panic!("unexpected query {:?}", query),
                    }
                }
            }
            _ => panic!("expected a disjunction"),
        }
    }

    #[test]
    fn test_single_query_is_unpacked() {
        let query = Query::new_conjunction(vec![Query::new_term("body", Term::from_string("a"))]);

        assert_eq!(query, Query::new_term("body", Term::from_string("a")));
        assert_eq!(Query::new_disjunction(vec![]), Query::MatchNone);
    }

    #[test]
    fn test_phrase_shortcuts() {
        assert_eq!(Query::new_phrase("body", vec![], 0), Query::MatchNone);
        assert_eq!(Query::new_phrase("body", vec![token("a", 3)], 2), Query::new_term("body", Term::from_string("a")));
    }

    #[test]
    fn test_display() {
        let query = Query::new_conjunction(vec![
            Query::new_term("title", Term::from_string("hello")),
            Query::new_phrase("body", vec![token("hello", 1), token("world", 2)], 2),
        ]);

        assert_eq!(query.to_string(), "(+title:hello +body:\"hello world\"~2)");
    }
}
