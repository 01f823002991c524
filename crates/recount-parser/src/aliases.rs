//! Account path aliases.
//!
//! A ledger file may open with a run of alias directives that map short
//! tokens to account path prefixes:
//!
//! ```text
//! alias A=Assets
//! C=Assets:Investment
//! ```
//!
//! Directives are only recognized in a contiguous leading run (blank lines
//! tolerated); the first other non-blank line ends collection permanently,
//! even if a later line happens to look like a directive.

use regex::Regex;
use std::collections::HashMap;

/// Alias definitions scoped to one parser instance.
#[derive(Debug)]
pub struct AliasTable {
    map: HashMap<String, String>,
    directive: Regex,
}

impl AliasTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            directive: Regex::new(r"^alias\s+(\w+)=(.+)$|^(\w+)=(.+)$")
                .expect("alias pattern"),
        }
    }

    /// Define or overwrite an alias.
    pub fn define(&mut self, token: impl Into<String>, target: impl Into<String>) {
        self.map.insert(token.into(), target.into());
    }

    /// Look up an alias token.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.map.get(token).map(String::as_str)
    }

    /// Number of defined aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no aliases are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Parse a single directive line into `(token, target)`.
    fn directive_parts<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.directive.captures(line)?;
        match (caps.get(1), caps.get(3)) {
            (Some(token), _) => Some((token.as_str(), caps.get(2)?.as_str().trim())),
            (None, Some(token)) => Some((token.as_str(), caps.get(4)?.as_str().trim())),
            _ => None,
        }
    }

    /// Collect the leading directive run, returning the remaining lines.
    ///
    /// Collection ends at the first non-blank line that is not a directive;
    /// everything from that line on passes through untouched.
    pub fn strip<'a>(&mut self, lines: &[&'a str]) -> Vec<&'a str> {
        let mut rest = Vec::with_capacity(lines.len());
        let mut collecting = true;
        for &line in lines {
            if collecting {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some((token, target)) = self.directive_parts(line) {
                    self.define(token, target);
                    continue;
                }
                collecting = false;
            }
            rest.push(line);
        }
        rest
    }

    /// Expand alias tokens within an account path.
    ///
    /// Each `:`-separated segment matching a known token is replaced by the
    /// alias target (itself possibly multi-segment); unmatched segments pass
    /// through. Expansion is single-pass - substituted segments are not
    /// re-expanded.
    #[must_use]
    pub fn expand(&self, path: &str) -> String {
        let mut segments: Vec<&str> = Vec::new();
        for segment in path.split(':') {
            match self.map.get(segment) {
                Some(target) => segments.extend(target.split(':')),
                None => segments.push(segment),
            }
        }
        segments.join(":")
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        let mut table = AliasTable::new();
        table.define("A", "Assets");
        table.define("C", "Assets:Investment");

        assert_eq!(table.expand("A:Bank"), "Assets:Bank");
        assert_eq!(table.expand("C:PPF"), "Assets:Investment:PPF");
        assert_eq!(table.expand("Expenses:Food"), "Expenses:Food");
    }

    #[test]
    fn test_expand_single_pass() {
        let mut table = AliasTable::new();
        table.define("A", "B");
        table.define("B", "C");

        // Substituted segments are not re-expanded
        assert_eq!(table.expand("A:x"), "B:x");
    }

    #[test]
    fn test_strip_both_forms() {
        let mut table = AliasTable::new();
        let lines = vec!["alias A=Assets", "E=Expenses", "2024/01/15 Payee"];
        let rest = table.strip(&lines);

        assert_eq!(table.get("A"), Some("Assets"));
        assert_eq!(table.get("E"), Some("Expenses"));
        assert_eq!(rest, vec!["2024/01/15 Payee"]);
    }

    #[test]
    fn test_strip_blank_lines_tolerated() {
        let mut table = AliasTable::new();
        let lines = vec!["", "alias A=Assets", "", "E=Expenses", "body"];
        let rest = table.strip(&lines);

        assert_eq!(table.len(), 2);
        assert_eq!(rest, vec!["body"]);
    }

    #[test]
    fn test_strip_ends_permanently() {
        let mut table = AliasTable::new();
        let lines = vec!["alias A=Assets", "2024/01/15 Payee", "L=Liabilities"];
        let rest = table.strip(&lines);

        // The later directive-looking line is body text, not an alias
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("L"), None);
        assert_eq!(rest, vec!["2024/01/15 Payee", "L=Liabilities"]);
    }

    #[test]
    fn test_comment_ends_collection() {
        // Only blank lines are tolerated inside the directive run; a
        // comment is an ordinary non-matching line and ends it.
        let mut table = AliasTable::new();
        let lines = vec!["alias A=Assets", "; note", "E=Expenses"];
        let rest = table.strip(&lines);

        assert_eq!(table.len(), 1);
        assert_eq!(rest, vec!["; note", "E=Expenses"]);
    }

    #[test]
    fn test_later_definition_overwrites() {
        let mut table = AliasTable::new();
        let lines = vec!["alias A=Assets", "A=Assets:Banking"];
        table.strip(&lines);

        assert_eq!(table.get("A"), Some("Assets:Banking"));
    }
}
