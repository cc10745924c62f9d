use std::sync::OnceLock;

use regex::{Captures, Regex};


fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).unwrap_or_else(|err| panic!("invalid pattern {:?}: {}", pattern, err)))
}


fn title_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?is)<title[^>]*>(.*?)</title\s*>")
}

fn body_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?is)<body[^>]*>(.*?)(?:</body\s*>|\z)")
}

fn head_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?is)<head[^>]*>.*?</head\s*>")
}

/// Elements whose content is never text
fn hidden_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?is)<!--.*?-->|<script[^>]*>.*?</script\s*>|<style[^>]*>.*?</style\s*>")
}

fn tag_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"<[^>]*>")
}

fn entity_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);")
}

fn whitespace_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"\s+")
}


fn decode_entity(entity: &str) -> Option<char> {
    if let Some(number) = entity.strip_prefix('#') {
        let code = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };

        return char::from_u32(code);
    }

    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "copy" => Some('\u{a9}'),
        "reg" => Some('\u{ae}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        "hellip" => Some('\u{2026}'),
        _ => None,
    }
}


/// Turns a fragment of markup into plain text on a single line
fn to_text(markup: &str) -> String {
    let visible = hidden_regex().replace_all(markup, " ");
    let untagged = tag_regex().replace_all(&visible, " ");
    let decoded = entity_regex().replace_all(&untagged, |caps: &Captures| {
        match decode_entity(&caps[1]) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });

    whitespace_regex().replace_all(&decoded, " ").trim().to_string()
}


/// The searchable parts of an HTML page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HtmlDocument {
    pub title: String,
    pub body: String,
}


impl HtmlDocument {
    /// Extracts the title and body text. Pages without a `<body>` use
    /// everything outside of `<head>` as the body.
    pub fn parse(text: &str) -> HtmlDocument {
        let title = title_regex().captures(text)
            .map(|caps| to_text(&caps[1]))
            .unwrap_or_default();

        let body = match body_regex().captures(text) {
            Some(caps) => to_text(&caps[1]),
            None => to_text(&head_regex().replace_all(text, " ")),
        };

        HtmlDocument {
            title,
            body,
        }
    }
}
