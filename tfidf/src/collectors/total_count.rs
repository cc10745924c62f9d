use crate::collectors::{Collector, DocumentMatch};


/// Counts matching documents without keeping any of them
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TotalCountCollector(u64);


impl TotalCountCollector {
    pub fn new() -> TotalCountCollector {
        TotalCountCollector(0)
    }

    pub fn total_count(&self) -> u64 {
        self.0
    }
}


impl Collector for TotalCountCollector {
    fn needs_score(&self) -> bool {
        false
    }

    fn collect(&mut self, _doc: DocumentMatch) {
        self.0 += 1;
    }
}
