//! Naive keyword retrieval over the knowledge base

use super::KnowledgeBase;

impl KnowledgeBase {
    /// Collect up to `limit` lines matching the query, joined by newline
    ///
    /// A line matches when its lower-cased text contains ANY query word as
    /// a substring. This is a deliberately loose policy: short query words
    /// can match unrelated lines (e.g. "cat" matches "location"). The scan
    /// runs strictly in stored order, so the result is deterministic for a
    /// fixed knowledge base and query. Zero matches yield an empty string.
    #[must_use]
    pub fn retrieve(&self, query: &str, limit: usize) -> String {
        if limit == 0 {
            return String::new();
        }

        let query_lower = query.to_lowercase();
        let words: Vec<&str> = query_lower.split_whitespace().collect();
        if words.is_empty() {
            return String::new();
        }

        let mut matches: Vec<&str> = Vec::new();
        for line in &self.lines {
            let line_lower = line.to_lowercase();
            if words.iter().any(|w| line_lower.contains(w)) {
                matches.push(line);
            }
            if matches.len() >= limit {
                break;
            }
        }

        matches.join("\n")
    }
}
