use core::fmt;

use super::syntax::{BinaryOp, BoolOp, ComparisonOp, UnaryOp};
use crate::symbols::{ArrayFn, VariableFn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Integer(i32),
    Float(f64),
    Text(&'a str),
}

/// A parsed trigger expression. Children live in the same arena.
#[derive(Clone, Copy)]
pub enum Expr<'a> {
    /// Empty text; evaluates to boolean false.
    Null,
    Literal(Literal<'a>),
    /// A string literal that names a command known at parse time.
    CommandIndex { index: u32, name: &'a str },
    /// A variable bound to its accessor.
    Variable { name: &'a str, accessor: VariableFn },
    /// A name with no registered meaning, lowercased.
    RawVariable(&'a str),
    Unary {
        op: UnaryOp,
        operand: &'a Expr<'a>,
    },
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Boolean {
        op: BoolOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Comparison {
        op: ComparisonOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    /// `target := value`.
    SetVariable {
        target: &'a Expr<'a>,
        value: &'a Expr<'a>,
    },
    /// `x , y`.
    Vector { x: &'a Expr<'a>, y: &'a Expr<'a> },
    /// A comparison operator with its right operand, as in
    /// `animelem = 3, >= 2`.
    OperatorArgument {
        op: ComparisonOp,
        operand: &'a Expr<'a>,
    },
    Range {
        inner: &'a Expr<'a>,
        exclude_low: bool,
        exclude_high: bool,
    },
    /// `name(argument)`. `function` is `None` when the name was unknown at
    /// parse time.
    Array {
        name: &'a str,
        function: Option<ArrayFn>,
        argument: &'a Expr<'a>,
    },
}

impl<'a> Expr<'a> {
    /// The name of a variable node (bound or raw), looking through a single
    /// negation. The flag is set when the negation was there.
    pub fn variable_name(&self) -> Option<(&'a str, bool)> {
        match *self {
            Expr::Variable { name, .. } | Expr::RawVariable(name) => Some((name, false)),
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => match *operand {
                Expr::Variable { name, .. } | Expr::RawVariable(name) => Some((name, true)),
                _ => None,
            },
            _ => None,
        }
    }

    /// The bare name this node spells, as `gethitvar(xvel)` expects.
    pub fn as_name(&self) -> Option<&'a str> {
        match *self {
            Expr::Variable { name, .. } | Expr::RawVariable(name) => Some(name),
            Expr::Literal(Literal::Text(text)) => Some(text),
            _ => None,
        }
    }
}

// S-expression rendering, used by `--debug-parse` and the parser tests.
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Null => f.write_str("null"),
            Expr::Literal(Literal::Integer(i)) => write!(f, "{}", i),
            Expr::Literal(Literal::Float(v)) => write!(f, "{:?}", v),
            Expr::Literal(Literal::Text(s)) => write!(f, "{:?}", s),
            Expr::CommandIndex { index, name } => write!(f, "command#{}({:?})", index, name),
            Expr::Variable { name, .. } => f.write_str(name),
            Expr::RawVariable(name) => write!(f, "'{}", name),
            Expr::Unary { op, operand } => write!(f, "({} {})", op, operand),
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", op, left, right),
            Expr::Boolean { op, left, right } => write!(f, "({} {} {})", op, left, right),
            Expr::Comparison { op, left, right } => write!(f, "({} {} {})", op, left, right),
            Expr::SetVariable { target, value } => write!(f, "(:= {} {})", target, value),
            Expr::Vector { x, y } => write!(f, "(, {} {})", x, y),
            Expr::OperatorArgument { op, operand } => write!(f, "(arg {} {})", op, operand),
            Expr::Range {
                inner,
                exclude_low,
                exclude_high,
            } => {
                let open = if *exclude_low { '(' } else { '[' };
                let close = if *exclude_high { ')' } else { ']' };
                write!(f, "(range {} {} {})", open, inner, close)
            }
            Expr::Array {
                name,
                function,
                argument,
            } => {
                let unknown = if function.is_some() { "" } else { "?" };
                write!(f, "({}{} {})", name, unknown, argument)
            }
        }
    }
}

impl fmt::Debug for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
