//! Operator search over raw expression text.
//!
//! The parser never tokenizes. To split `a + (b * c)` it asks the scanner
//! where the lowest-precedence operator sits outside every bracket and
//! string literal, then recurses on both sides.

/// Characters that make a neighbouring `-`, `*`, `/` or `%` unary (or part
/// of a longer operator) rather than binary.
const OPERATOR_CHARS: &[u8] = b"-+|&*/%^=<>!~:";

/// Characters a right-hand operand may start with while the operator
/// before it is still binary.
const UNARY_PREFIXES: &[u8] = b"-!~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// Precomputed nesting information for one piece of text.
pub struct Scanner<'t> {
    text: &'t str,
    /// `top_level[i]` is set when byte `i` sits outside brackets and quotes.
    top_level: Vec<bool>,
}

impl<'t> Scanner<'t> {
    pub fn new(text: &'t str) -> Self {
        let mut depth: i32 = 0;
        let mut in_quote = false;
        let top_level = text
            .bytes()
            .map(|b| {
                match b {
                    b'"' => in_quote = !in_quote,
                    b'(' | b'[' if !in_quote => depth += 1,
                    b')' | b']' if !in_quote => depth -= 1,
                    _ => {}
                }
                depth == 0 && !in_quote
            })
            .collect();
        Self { text, top_level }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    fn bytes(&self) -> &'t [u8] {
        self.text.as_bytes()
    }

    pub fn is_top_level(&self, pos: usize) -> bool {
        self.top_level.get(pos).copied().unwrap_or(false)
    }

    fn positions(&self, direction: Direction) -> impl Iterator<Item = usize> {
        let len = self.text.len();
        (0..len).map(move |i| match direction {
            Direction::LeftToRight => i,
            Direction::RightToLeft => len - 1 - i,
        })
    }

    /// Finds `pattern` outside brackets and quotes, scanning in `direction`
    /// and skipping matches `accept` rejects.
    pub fn find(
        &self,
        pattern: &str,
        direction: Direction,
        accept: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let bytes = self.bytes();
        let pattern = pattern.as_bytes();
        self.positions(direction).find(|&pos| {
            self.top_level[pos] && bytes[pos..].starts_with(pattern) && accept(pos)
        })
    }

    /// Like [`find`](Self::find) over several patterns at once. At each
    /// position the first listed pattern that matches and is accepted wins,
    /// so longer patterns should come first.
    pub fn find_first_of<K: Copy>(
        &self,
        patterns: &[(&str, K)],
        direction: Direction,
        accept: impl Fn(usize, &str) -> bool,
    ) -> Option<(usize, usize, K)> {
        let bytes = self.bytes();
        self.positions(direction)
            .filter(|&pos| self.top_level[pos])
            .find_map(|pos| {
                patterns.iter().find_map(|(pattern, kind)| {
                    (bytes[pos..].starts_with(pattern.as_bytes()) && accept(pos, pattern))
                        .then_some((pos, pattern.len(), *kind))
                })
            })
    }

    /// Whether the operator occupying `pos..pos + len` has an operand on
    /// both sides.
    ///
    /// The nearest non-blank character on the left must exist and must not
    /// be an operator character or a comma. The right side must exist and
    /// may only start with an operator character if it is a unary prefix.
    pub fn is_binary_position(&self, pos: usize, len: usize) -> bool {
        let bytes = self.bytes();
        let left = bytes[..pos].iter().rev().find(|b| !b.is_ascii_whitespace());
        let right = bytes[pos + len..].iter().find(|b| !b.is_ascii_whitespace());
        match (left, right) {
            (Some(l), Some(r)) => {
                !OPERATOR_CHARS.contains(l)
                    && *l != b','
                    && (!OPERATOR_CHARS.contains(r) || UNARY_PREFIXES.contains(r))
            }
            _ => false,
        }
    }

    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes().get(pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_hides_operators() {
        let scanner = Scanner::new("a + (b + c) + \"d + e\"");
        let hits: Vec<usize> = (0..scanner.text().len())
            .filter(|&pos| scanner.byte_at(pos) == Some(b'+') && scanner.is_top_level(pos))
            .collect();
        assert_eq!(hits, vec![2, 12]);
    }

    #[test]
    fn test_direction() {
        let scanner = Scanner::new("a - b - c");
        assert_eq!(scanner.find("-", Direction::LeftToRight, |_| true), Some(2));
        assert_eq!(scanner.find("-", Direction::RightToLeft, |_| true), Some(6));
        assert_eq!(scanner.find("*", Direction::RightToLeft, |_| true), None);
    }

    #[test]
    fn test_longest_pattern_wins() {
        let scanner = Scanner::new("a >= b");
        let found = scanner.find_first_of(
            &[(">=", "ge"), (">", "gt")],
            Direction::RightToLeft,
            |_, _| true,
        );
        assert_eq!(found, Some((2, 2, "ge")));
    }

    #[test]
    fn test_binary_position() {
        let scanner = Scanner::new("3 - -2");
        assert!(scanner.is_binary_position(2, 1));
        assert!(!scanner.is_binary_position(4, 1));

        let scanner = Scanner::new("-2");
        assert!(!scanner.is_binary_position(0, 1));

        let scanner = Scanner::new("x, -1");
        assert!(!scanner.is_binary_position(3, 1));
    }

    #[test]
    fn test_mixed_brackets_balance() {
        let scanner = Scanner::new("[1, 10) && x");
        assert!(scanner.is_top_level(8));
        assert!(!scanner.is_top_level(2));
    }
}
