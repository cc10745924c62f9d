//! Score explanations
//!
//! An explanation is a tree of labelled values describing how a score was
//! put together. Each node carries the value it explains, so the root of a
//! scoring explanation carries the document's score.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;


#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    value: f32,
    description: String,
    details: Vec<Explanation>,
    is_match: bool,
}


impl Explanation {
    pub fn matched(value: f32, description: String, details: Vec<Explanation>) -> Explanation {
        Explanation {
            value,
            description,
            details,
            is_match: true,
        }
    }

    pub fn leaf(value: f32, description: String) -> Explanation {
        Explanation::matched(value, description, Vec::new())
    }

    pub fn no_match(description: String, details: Vec<Explanation>) -> Explanation {
        Explanation {
            value: 0.0,
            description,
            details,
            is_match: false,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn details(&self) -> &[Explanation] {
        &self.details
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        self.is_match
    }

    pub fn summary(&self) -> String {
        format!("{:?} = {}", self.value, self.description)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "value": self.value,
            "description": self.description,
            "match": self.is_match,
            "details": self.details.iter().map(|detail| detail.to_json()).collect::<Vec<_>>(),
        })
    }

    fn write_tree(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }

        writeln!(f, "{}", self.summary())?;

        for detail in self.details.iter() {
            detail.write_tree(f, depth + 1)?;
        }

        Ok(())
    }
}


impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_tree(f, 0)
    }
}


impl Serialize for Explanation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}


#[cfg(test)]
mod tests {
    use super::Explanation;

    fn make_tree() -> Explanation {
        Explanation::matched(6.0, "product of:".to_string(), vec![
            Explanation::leaf(2.0, "boost".to_string()),
            Explanation::matched(3.0, "sum of:".to_string(), vec![
                Explanation::leaf(1.0, "a".to_string()),
                Explanation::leaf(2.0, "b".to_string()),
            ]),
        ])
    }

    #[test]
    fn test_summary() {
        let explanation = Explanation::leaf(2.5, "boost".to_string());

        assert_eq!(explanation.summary(), "2.5 = boost");
    }

    #[test]
    fn test_display_indents_by_depth() {
        let rendered = make_tree().to_string();

        assert_eq!(rendered, "6.0 = product of:\n  2.0 = boost\n  3.0 = sum of:\n    1.0 = a\n    2.0 = b\n");
    }

    #[test]
    fn test_no_match() {
        let explanation = Explanation::no_match("no matching term".to_string(), vec![]);

        assert_eq!(explanation.value(), 0.0);
        assert!(!explanation.is_match());
    }

    #[test]
    fn test_to_json() {
        let json = make_tree().to_json();

        assert_eq!(json["value"], 6.0);
        assert_eq!(json["description"], "product of:");
        assert_eq!(json["match"], true);
        assert_eq!(json["details"][1]["details"][0]["description"], "a");
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let explanation = make_tree();

        assert_eq!(serde_json::to_value(&explanation).unwrap(), explanation.to_json());
    }
}
