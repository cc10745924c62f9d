use std::fmt;
use std::str;


/// A single indexed term.
///
/// Terms are stored as raw bytes so that the index doesn't need to care what
/// produced them. Text terms are UTF-8.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct Term(Vec<u8>);


impl Term {
    pub fn from_string(string: &str) -> Term {
        Term(string.as_bytes().to_vec())
    }

    pub fn from_bytes(bytes: &[u8]) -> Term {
        Term(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }

    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(&self.0).ok()
    }
}


impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_str() {
            Some(string) => write!(f, "{}", string),
            None => write!(f, "{:?}", self.0),
        }
    }
}
