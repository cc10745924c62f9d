use std::sync::OnceLock;

use regex::Regex;
use tfidf::Query;
use tfidf::analysis::AnalyzerSpec;


fn clause_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r#""([^"]*)"|([^"\s]+)"#).unwrap_or_else(|err| panic!("invalid clause pattern: {}", err)))
}


/// A piece of a query string: a bare word or a quoted phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Word(String),
    Phrase(String),
}


pub fn parse_clauses(text: &str) -> Vec<Clause> {
    clause_regex().captures_iter(text).filter_map(|caps| {
        if let Some(phrase) = caps.get(1) {
            Some(Clause::Phrase(phrase.as_str().to_string()))
        } else {
            caps.get(2).map(|word| Clause::Word(word.as_str().to_string()))
        }
    }).collect()
}


/// Splits `title^2.5` into a field name and boost. A missing or invalid
/// boost is 1.0.
pub fn parse_field_and_boost(field: &str) -> (&str, f32) {
    match field.split_once('^') {
        Some((field, boost)) => (field, boost.parse::<f32>().ok().filter(|boost| boost.is_finite() && *boost > 0.0).unwrap_or(1.0)),
        None => (field, 1.0),
    }
}


fn boosted(mut query: Query, boost: f32) -> Query {
    query.boost(boost);
    query
}


/// Builds a query matching any clause of `text` in any of `fields`.
///
/// Words are analyzed into term queries and quoted phrases into exact phrase
/// queries, so `crab "rust language"` searches for `crab` and for the phrase
/// `rust language` in every field. Fields may carry a boost (`title^2`).
pub fn parse_query(text: &str, fields: &[String], analyzer: &AnalyzerSpec) -> Query {
    let fields = fields.iter().map(|field| parse_field_and_boost(field)).collect::<Vec<_>>();
    let mut clauses = Vec::new();

    for clause in parse_clauses(text) {
        match clause {
            Clause::Word(word) => {
                for token in analyzer.analyze(&word) {
                    let per_field = fields.iter()
                        .map(|&(field, boost)| boosted(Query::new_term(field, token.term.clone()), boost))
                        .collect();

                    clauses.push(Query::new_disjunction(per_field));
                }
            }
            Clause::Phrase(phrase) => {
                let tokens = analyzer.analyze(&phrase);
                if tokens.is_empty() {
                    continue;
                }

                let per_field = fields.iter()
                    .map(|&(field, boost)| boosted(Query::new_phrase(field, tokens.clone(), 0), boost))
                    .collect();

                clauses.push(Query::new_disjunction(per_field));
            }
        }
    }

    Query::new_disjunction(clauses)
}


#[cfg(test)]
mod tests {
    use tfidf::{Term, Token, Query};
    use tfidf::analysis::AnalyzerSpec;

    use super::{Clause, parse_clauses, parse_query, parse_field_and_boost};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_parse_clauses() {
        assert_eq!(parse_clauses(r#"crab "rust language"  ferris"#), vec![
            Clause::Word("crab".to_string()),
            Clause::Phrase("rust language".to_string()),
            Clause::Word("ferris".to_string()),
        ]);
    }

    #[test]
    fn test_unterminated_quote_is_words() {
        assert_eq!(parse_clauses(r#""rust language"#), vec![
            Clause::Word("rust".to_string()),
            Clause::Word("language".to_string()),
        ]);
    }

    #[test]
    fn test_single_word_single_field() {
        let query = parse_query("Crab", &fields(&["content"]), &AnalyzerSpec::standard());

        assert_eq!(query, Query::new_term("content", Term::from_string("crab")));
    }

    #[test]
    fn test_words_over_fields() {
        let query = parse_query("the crab walks", &fields(&["title", "content"]), &AnalyzerSpec::standard());

        assert_eq!(query, Query::new_disjunction(vec![
            Query::new_disjunction(vec![
                Query::new_term("title", Term::from_string("crab")),
                Query::new_term("content", Term::from_string("crab")),
            ]),
            Query::new_disjunction(vec![
                Query::new_term("title", Term::from_string("walks")),
                Query::new_term("content", Term::from_string("walks")),
            ]),
        ]));
    }

    #[test]
    fn test_phrase() {
        let query = parse_query(r#""rust language""#, &fields(&["content"]), &AnalyzerSpec::standard());

        assert_eq!(query, Query::new_phrase("content", vec![
            Token { term: Term::from_string("rust"), position: 1 },
            Token { term: Term::from_string("language"), position: 2 },
        ], 0));
    }

    #[test]
    fn test_parse_field_and_boost() {
        assert_eq!(parse_field_and_boost("title"), ("title", 1.0));
        assert_eq!(parse_field_and_boost("title^2.5"), ("title", 2.5));
        assert_eq!(parse_field_and_boost("title^fast"), ("title", 1.0));
    }

    #[test]
    fn test_boosted_field() {
        let query = parse_query("crab", &fields(&["title^3", "content"]), &AnalyzerSpec::standard());

        let mut title = Query::new_term("title", Term::from_string("crab"));
        title.boost(3.0);
        assert_eq!(query, Query::new_disjunction(vec![title, Query::new_term("content", Term::from_string("crab"))]));
    }

    #[test]
    fn test_only_stop_words() {
        assert_eq!(parse_query("the a an", &fields(&["content"]), &AnalyzerSpec::standard()), Query::MatchNone);
    }
}
