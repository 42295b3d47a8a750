//! Text-scanning recursive descent.
//!
//! Each call looks for the loosest-binding operator still visible at the
//! top level of its text, splits there and recurses on the pieces. Steps
//! are tried in a fixed order and the first one that applies wins, which is
//! what gives trigger expressions their precedence and associativity.

use bumpalo::Bump;

use super::error::{ParseError, ParseErrorKind};
use super::parsed_expr::{Expr, Literal};
use super::scanner::{Direction, Scanner};
use super::syntax::{BinaryOp, BoolOp, ComparisonOp, Span, UnaryOp};
use crate::symbols::{CommandLookup, SymbolTables, normalize_name};
use crate::values::{atof, atoi, looks_like_float, looks_like_int};

const OPERATOR_CHARS: &[u8] = b"+-*/%|&^=<>!~:";

/// Default limit on how deeply the parser may recurse.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Words after which a comma introduces a redirected expression instead of
/// a second vector component.
const REDIRECT_WORDS: &[&str] = &[
    "target",
    "p1",
    "p2",
    "helper",
    "enemy",
    "enemynear",
    "root",
    "playerid",
    "parent",
];

/// Comparisons whose right-hand side is itself a comma list.
const LIST_COMPARISONS: &[&str] = &[
    "animelem",
    "timemod",
    "hitdefattr",
    "projcontact",
    "projguarded",
    "projhit",
];

const OPERATOR_ARGUMENTS: &[(&str, ComparisonOp)] = &[
    (">=", ComparisonOp::Ge),
    ("<=", ComparisonOp::Le),
    ("!=", ComparisonOp::Neq),
    ("=", ComparisonOp::Eq),
    ("<", ComparisonOp::Lt),
    (">", ComparisonOp::Gt),
];

const EQUALITY: &[(&str, ComparisonOp)] = &[("!=", ComparisonOp::Neq), ("=", ComparisonOp::Eq)];

const ORDINAL: &[(&str, ComparisonOp)] = &[
    (">=", ComparisonOp::Ge),
    ("<=", ComparisonOp::Le),
    (">", ComparisonOp::Gt),
    ("<", ComparisonOp::Lt),
];

const MULTIPLICATIVE: &[(&str, BinaryOp)] = &[
    ("*", BinaryOp::Mul),
    ("/", BinaryOp::Div),
    ("%", BinaryOp::Mod),
];

/// Parses `source` with the given symbol tables and default settings.
pub fn parse<'a>(
    arena: &'a Bump,
    source: &str,
    symbols: &SymbolTables,
) -> Result<&'a Expr<'a>, ParseError> {
    Parser::new(arena, symbols).parse(source)
}

pub fn parse_with_max_depth<'a>(
    arena: &'a Bump,
    source: &str,
    symbols: &SymbolTables,
    max_depth: usize,
) -> Result<&'a Expr<'a>, ParseError> {
    Parser::new(arena, symbols)
        .with_max_depth(max_depth)
        .parse(source)
}

/// Parser configuration. Trees are allocated in `arena`.
pub struct Parser<'a, 's> {
    arena: &'a Bump,
    symbols: &'s SymbolTables,
    commands: Option<&'s dyn CommandLookup>,
    max_depth: usize,
}

impl<'a, 's> Parser<'a, 's> {
    pub fn new(arena: &'a Bump, symbols: &'s SymbolTables) -> Self {
        Self {
            arena,
            symbols,
            commands: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Rewrites string literals naming a known command to command indices.
    pub fn with_commands(mut self, commands: &'s dyn CommandLookup) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(&self, source: &str) -> Result<&'a Expr<'a>, ParseError> {
        tracing::debug!(source, "parsing trigger");
        check_structure(source)?;
        let walk = Walk {
            parser: self,
            source,
        };
        let expr = walk.expr(source, 0)?;
        tracing::trace!(%expr, "parsed");
        Ok(expr)
    }
}

/// Rejects text whose brackets or quotes cannot be paired.
///
/// Range literals mix bracket kinds (`[1, 10)`), so only the nesting count
/// matters, not which kind closes which.
fn check_structure(source: &str) -> Result<(), ParseError> {
    let mut open: Vec<(usize, char)> = Vec::new();
    let mut quote_start = None;
    for (pos, c) in source.char_indices() {
        if quote_start.is_some() {
            if c == '"' {
                quote_start = None;
            }
            continue;
        }
        match c {
            '"' => quote_start = Some(pos),
            '(' | '[' => open.push((pos, c)),
            ')' | ']' => {
                if open.pop().is_none() {
                    return Err(ParseError::new(
                        ParseErrorKind::UnbalancedBrackets { bracket: c },
                        source,
                        Span::new(pos, pos + 1),
                    ));
                }
            }
            _ => {}
        }
    }
    if let Some(pos) = quote_start {
        return Err(ParseError::new(
            ParseErrorKind::UnterminatedString,
            source,
            Span::new(pos, source.len()),
        ));
    }
    if let Some((pos, bracket)) = open.pop() {
        return Err(ParseError::new(
            ParseErrorKind::UnbalancedBrackets { bracket },
            source,
            Span::new(pos, pos + 1),
        ));
    }
    Ok(())
}

/// Leading blanks go; trailing blanks and commas go.
fn sanitize(text: &str) -> &str {
    text.trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || c == ',')
}

/// Position of the bracket closing the one opened at `open`.
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quote = false;
    for (pos, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'"' => in_quote = !in_quote,
            b'(' | b'[' if !in_quote => depth += 1,
            b')' | b']' if !in_quote => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
    }
    None
}

/// The word just before the end of `text`, lowercased. Bracketed groups
/// belong to the word (`helper(3)`); an unmatched opening bracket, a comma,
/// a blank or an operator character ends it.
fn previous_word(text: &str) -> String {
    let text = text.trim_end();
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut start = bytes.len();
    while start > 0 {
        let b = bytes[start - 1];
        match b {
            b')' | b']' => depth += 1,
            b'(' | b'[' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => break,
            },
            _ if depth > 0 => {}
            b',' | b'"' => break,
            _ if b.is_ascii_whitespace() || OPERATOR_CHARS.contains(&b) => break,
            _ => {}
        }
        start -= 1;
    }
    text[start..].to_ascii_lowercase()
}

struct Walk<'p, 'a, 's, 'src> {
    parser: &'p Parser<'a, 's>,
    source: &'src str,
}

impl<'a, 'src> Walk<'_, 'a, '_, 'src> {
    fn alloc(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.parser.arena.alloc(expr)
    }

    fn alloc_str(&self, text: &str) -> &'a str {
        self.parser.arena.alloc_str(text)
    }

    /// Span of `text`, which must be a slice of the source.
    fn span_of(&self, text: &str) -> Span {
        let start = (text.as_ptr() as usize).saturating_sub(self.source.as_ptr() as usize);
        Span::new(start, start + text.len())
    }

    fn error(&self, kind: ParseErrorKind, at: &str) -> ParseError {
        ParseError::new(kind, self.source, self.span_of(at))
    }

    fn missing_operand(&self, operator: &str, at: &str) -> ParseError {
        self.error(
            ParseErrorKind::MissingOperand {
                operator: operator.to_string(),
            },
            at,
        )
    }

    fn expr(&self, text: &'src str, depth: usize) -> Result<&'a Expr<'a>, ParseError> {
        if depth > self.parser.max_depth {
            return Err(self.error(
                ParseErrorKind::MaxDepthExceeded {
                    depth,
                    max_depth: self.parser.max_depth,
                },
                text,
            ));
        }

        let text = sanitize(text);
        if text.is_empty() {
            return Ok(self.alloc(Expr::Null));
        }
        let depth = depth + 1;
        let scanner = Scanner::new(text);

        // ====================================================================
        // Operators, loosest first
        // ====================================================================

        if let Some(pos) = scanner.find(",", Direction::LeftToRight, |pos| {
            is_context_free_comma(&scanner, pos)
        }) {
            return self.vector(text, pos, depth);
        }

        if let Some(expr) = self.operator_argument(text, depth)? {
            return Ok(expr);
        }

        for (pattern, op) in [("||", BoolOp::Or), ("^^", BoolOp::Xor), ("&&", BoolOp::And)] {
            if let Some(pos) = scanner.find(pattern, Direction::RightToLeft, |_| true) {
                let (left, right) = self.sides(text, pos, pattern, depth)?;
                return Ok(self.alloc(Expr::Boolean { op, left, right }));
            }
        }

        for (pattern, op) in [("|", BinaryOp::BitOr), ("^", BinaryOp::BitXor), ("&", BinaryOp::BitAnd)] {
            let doubled = |pos: usize| {
                let b = pattern.as_bytes()[0];
                (pos > 0 && scanner.byte_at(pos - 1) == Some(b)) || scanner.byte_at(pos + 1) == Some(b)
            };
            if let Some(pos) = scanner.find(pattern, Direction::RightToLeft, |pos| !doubled(pos)) {
                let (left, right) = self.sides(text, pos, pattern, depth)?;
                return Ok(self.alloc(Expr::Binary { op, left, right }));
            }
        }

        if let Some(pos) = scanner.find(":=", Direction::LeftToRight, |_| true) {
            let (target, value) = self.sides(text, pos, ":=", depth)?;
            return Ok(self.alloc(Expr::SetVariable { target, value }));
        }

        let equality = scanner.find_first_of(EQUALITY, Direction::RightToLeft, |pos, pattern| {
            pos > 0 && (pattern != "=" || !matches!(scanner.byte_at(pos - 1), Some(b'!' | b'<' | b'>' | b':')))
        });
        let comparison = equality.or_else(|| {
            scanner.find_first_of(ORDINAL, Direction::RightToLeft, |pos, _| pos > 0)
        });
        if let Some((pos, len, op)) = comparison {
            let (left, right) = self.sides(text, pos, &text[pos..pos + len], depth)?;
            return Ok(self.alloc(Expr::Comparison { op, left, right }));
        }

        // A leading `+` is unary and adds to nothing.
        if let Some(pos) = scanner.find("+", Direction::RightToLeft, |pos| pos + 1 < text.len()) {
            let right = &text[pos + 1..];
            if sanitize(right).is_empty() {
                return Err(self.missing_operand("+", &text[pos..pos + 1]));
            }
            let left = self.expr(&text[..pos], depth)?;
            let right = self.expr(right, depth)?;
            return Ok(self.alloc(Expr::Binary {
                op: BinaryOp::Add,
                left,
                right,
            }));
        }

        if let Some(pos) = scanner.find("-", Direction::RightToLeft, |pos| {
            scanner.is_binary_position(pos, 1)
        }) {
            let (left, right) = self.sides(text, pos, "-", depth)?;
            return Ok(self.alloc(Expr::Binary {
                op: BinaryOp::Sub,
                left,
                right,
            }));
        }

        // Binary position also rules out either half of `**`.
        if let Some((pos, len, op)) =
            scanner.find_first_of(MULTIPLICATIVE, Direction::RightToLeft, |pos, _| {
                scanner.is_binary_position(pos, 1)
            })
        {
            let (left, right) = self.sides(text, pos, &text[pos..pos + len], depth)?;
            return Ok(self.alloc(Expr::Binary { op, left, right }));
        }

        if let Some(pos) = scanner.find("**", Direction::LeftToRight, |_| true) {
            let (left, right) = self.sides(text, pos, "**", depth)?;
            return Ok(self.alloc(Expr::Binary {
                op: BinaryOp::Pow,
                left,
                right,
            }));
        }

        let unary = match text.as_bytes()[0] {
            b'!' => Some(UnaryOp::Not),
            b'~' => Some(UnaryOp::BitNot),
            b'-' => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = unary {
            let operand = &text[1..];
            if sanitize(operand).is_empty() {
                return Err(self.missing_operand(op.symbol(), &text[..1]));
            }
            let operand = self.expr(operand, depth)?;
            return Ok(self.alloc(Expr::Unary { op, operand }));
        }

        let is_operator = |b: u8| OPERATOR_CHARS.contains(&b);
        if is_operator(text.as_bytes()[text.len() - 1]) {
            let operator = text.trim_end_matches(|c: char| c.is_ascii() && is_operator(c as u8));
            let operator = &text[operator.len()..];
            return Err(self.missing_operand(operator, operator));
        }

        // ====================================================================
        // Brackets and literals
        // ====================================================================

        if let Some(expr) = self.bracketed(text, depth)? {
            return Ok(expr);
        }

        if looks_like_int(text) {
            return Ok(self.alloc(Expr::Literal(Literal::Integer(atoi(text)))));
        }
        if looks_like_float(text) {
            return Ok(self.alloc(Expr::Literal(Literal::Float(atof(text)))));
        }
        if text.bytes().any(|b| b.is_ascii_digit())
            && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        {
            return Err(self.error(
                ParseErrorKind::InvalidNumber {
                    text: text.to_string(),
                },
                text,
            ));
        }

        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            let inner = &text[1..text.len() - 1];
            let index = self.parser.commands.and_then(|c| c.command_index(inner));
            let name = self.alloc_str(inner);
            return Ok(self.alloc(match index {
                Some(index) => Expr::CommandIndex { index, name },
                None => Expr::Literal(Literal::Text(name)),
            }));
        }

        // ====================================================================
        // Names
        // ====================================================================

        if let Some(pos) = scanner.find(",", Direction::LeftToRight, |_| true) {
            return self.vector(text, pos, depth);
        }

        if let Some(accessor) = self.parser.symbols.variable(text) {
            let name = self.alloc_str(&normalize_name(text));
            return Ok(self.alloc(Expr::Variable { name, accessor }));
        }

        if let Some(expr) = self.array(text, depth)? {
            return Ok(expr);
        }

        Ok(self.alloc(Expr::RawVariable(self.alloc_str(&normalize_name(text)))))
    }

    /// Parses both sides of the operator `operator` found at `pos`.
    fn sides(
        &self,
        text: &'src str,
        pos: usize,
        operator: &str,
        depth: usize,
    ) -> Result<(&'a Expr<'a>, &'a Expr<'a>), ParseError> {
        let end = pos + operator.len();
        let (left, right) = (&text[..pos], &text[end..]);
        if sanitize(left).is_empty() || sanitize(right).is_empty() {
            return Err(self.missing_operand(operator, &text[pos..end]));
        }
        Ok((self.expr(left, depth)?, self.expr(right, depth)?))
    }

    fn vector(&self, text: &'src str, pos: usize, depth: usize) -> Result<&'a Expr<'a>, ParseError> {
        let x = self.expr(&text[..pos], depth)?;
        let y = self.expr(&text[pos + 1..], depth)?;
        Ok(self.alloc(Expr::Vector { x, y }))
    }

    /// `>= 3` and friends, as found on the right of `animelem = 2,`.
    fn operator_argument(
        &self,
        text: &'src str,
        depth: usize,
    ) -> Result<Option<&'a Expr<'a>>, ParseError> {
        let Some((symbol, op)) = OPERATOR_ARGUMENTS
            .iter()
            .find(|(symbol, _)| text.starts_with(symbol))
        else {
            return Ok(None);
        };
        let operand = &text[symbol.len()..];
        if sanitize(operand).is_empty() {
            return Err(self.missing_operand(symbol, text));
        }
        let operand = self.expr(operand, depth)?;
        Ok(Some(self.alloc(Expr::OperatorArgument { op: *op, operand })))
    }

    /// `( … )` groups and range literals.
    fn bracketed(&self, text: &'src str, depth: usize) -> Result<Option<&'a Expr<'a>>, ParseError> {
        let first = text.as_bytes()[0];
        let last = text.as_bytes()[text.len() - 1];
        if !matches!(first, b'(' | b'[')
            || !matches!(last, b')' | b']')
            || matching_close(text, 0) != Some(text.len() - 1)
        {
            return Ok(None);
        }
        let inner = &text[1..text.len() - 1];

        if first == b'(' && last == b')' {
            let inner_text = sanitize(inner);
            let inner_scanner = Scanner::new(inner_text);
            let is_pair = inner_scanner
                .find(",", Direction::LeftToRight, |pos| {
                    is_context_free_comma(&inner_scanner, pos)
                })
                .is_some();
            if !is_pair {
                return self.expr(inner, depth).map(Some);
            }
        }

        let inner = self.expr(inner, depth)?;
        Ok(Some(self.alloc(Expr::Range {
            inner,
            exclude_low: first == b'(',
            exclude_high: last == b')',
        })))
    }

    /// `name(argument)`, bound to the array function when the name is known.
    fn array(&self, text: &'src str, depth: usize) -> Result<Option<&'a Expr<'a>>, ParseError> {
        let Some(open) = text.find('(') else {
            return Ok(None);
        };
        if open == 0 || matching_close(text, open) != Some(text.len() - 1) {
            return Ok(None);
        }
        let name = normalize_name(&text[..open]);
        let function = self.parser.symbols.array(&name);
        if function.is_none() {
            tracing::warn!(name = %name, "unknown array; it will evaluate to false");
        }
        let argument = self.expr(&text[open + 1..text.len() - 1], depth)?;
        Ok(Some(self.alloc(Expr::Array {
            name: self.alloc_str(&name),
            function,
            argument,
        })))
    }
}

/// Whether the comma at `pos` separates two independent values.
///
/// It does not when it follows a redirect word (`p2, life`), or when it
/// continues the right-hand side of a list comparison (`animelem = 2, 1`).
fn is_context_free_comma(scanner: &Scanner<'_>, pos: usize) -> bool {
    let before = &scanner.text()[..pos];

    let mut word = previous_word(before);
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
        // `enemynear 1, life`
        let without_id = before.trim_end().trim_end_matches(|c: char| c.is_ascii_digit());
        word = previous_word(without_id);
    }
    if is_redirect_word(&word, before) {
        return false;
    }

    let last_equals = (0..pos)
        .rev()
        .find(|&p| scanner.byte_at(p) == Some(b'=') && scanner.is_top_level(p));
    if let Some(eq) = last_equals {
        let left = before[..eq].trim_end_matches(['!', ' ', '\t']);
        let name = previous_word(left);
        if is_list_comparison(&name) {
            return false;
        }
    }
    true
}

/// `p2`, `helper(3)`, `enemynear(1)`; not `p2life` or `rootdist`.
fn is_redirect_word(word: &str, before: &str) -> bool {
    let base = match word.find('(') {
        Some(0) => {
            // `helper (3)`
            let before = before.trim_end();
            let without_group = before.get(..before.len() - word.len()).unwrap_or_default();
            return REDIRECT_WORDS.contains(&previous_word(without_group).as_str());
        }
        Some(open) if word.ends_with(')') => &word[..open],
        Some(_) => return false,
        None => word,
    };
    REDIRECT_WORDS.contains(&base)
}

/// `animelem`, `timemod`, `hitdefattr`, and `projhit`/`projcontact`/
/// `projguarded` with an optional numeric id. Arrays such as
/// `animelemno(0)` or `projhittime(1)` are not list comparisons.
fn is_list_comparison(name: &str) -> bool {
    LIST_COMPARISONS.iter().any(|&c| match name.strip_prefix(c) {
        Some("") => true,
        Some(id) => c.starts_with("proj") && id.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    })
}
