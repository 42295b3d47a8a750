use std::borrow::Cow;
use std::fmt;

use super::coerce::{atof, atoi, looks_like_float, looks_like_int};

/// Result of evaluating a trigger expression or any of its sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value: division by zero, missing redirect targets, bad arguments.
    Bottom,
    Boolean(bool),
    Integer(i32),
    Float(f64),
    Text(String),
    /// An unresolved name, already lowercased.
    ///
    /// Symbols format as their name, so `statetype = S` or a redirect word
    /// such as `p2` compare by text, but as a truth value they are false.
    Symbol(String),
    Vector(Box<Value>, Box<Value>),
    /// Inclusive integer bounds; exclusive literals are normalized on
    /// construction.
    Range { low: i32, high: i32 },
}

impl Value {
    pub fn bool(value: bool) -> Self {
        Value::Boolean(value)
    }

    pub fn int(value: i32) -> Self {
        Value::Integer(value)
    }

    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn vector(x: Value, y: Value) -> Self {
        Value::Vector(Box::new(x), Box::new(y))
    }

    pub fn range(low: i32, high: i32) -> Self {
        Value::Range { low, high }
    }

    /// Classifies a bare piece of text the way a literal would parse.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if looks_like_int(text) {
            Value::Integer(atoi(text))
        } else if looks_like_float(text) {
            Value::Float(atof(text))
        } else if text.is_empty() {
            Value::Bottom
        } else {
            Value::Text(text.to_string())
        }
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Value::Bottom)
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    /// Whether arithmetic on this operand should happen in floating point.
    ///
    /// Floats always qualify; text qualifies when it is shaped like a float
    /// literal (`"2.5"`, `"-.5"`).
    pub fn is_float(&self) -> bool {
        match self {
            Value::Float(_) => true,
            Value::Text(s) => looks_like_float(s),
            _ => false,
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            Value::Bottom | Value::Symbol(_) => false,
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f as i32 != 0,
            Value::Text(s) => !(s.is_empty() || s == "0"),
            Value::Vector(..) | Value::Range { .. } => true,
        }
    }

    pub fn to_int(&self) -> i32 {
        match self {
            Value::Bottom | Value::Range { .. } => 0,
            Value::Boolean(b) => i32::from(*b),
            Value::Integer(i) => *i,
            Value::Float(f) => *f as i32,
            Value::Text(s) | Value::Symbol(s) => atoi(s),
            Value::Vector(x, _) => x.to_int(),
        }
    }

    pub fn to_float(&self) -> f64 {
        match self {
            Value::Bottom | Value::Range { .. } => 0.0,
            Value::Boolean(b) => f64::from(u8::from(*b)),
            Value::Integer(i) => f64::from(*i),
            Value::Float(f) => *f,
            Value::Text(s) | Value::Symbol(s) => atof(s),
            Value::Vector(x, _) => x.to_float(),
        }
    }

    /// The text form, borrowed when the value already holds text.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(s) | Value::Symbol(s) => Cow::Borrowed(s),
            Value::Bottom => Cow::Borrowed(""),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// First component of a vector. Scalars are their own first component.
    pub fn x(&self) -> Value {
        match self {
            Value::Vector(x, _) => (**x).clone(),
            Value::Text(s) => match s.split_once(',') {
                Some((x, _)) => Value::from_text(x),
                None => self.clone(),
            },
            other => other.clone(),
        }
    }

    /// Second component of a vector, or [`Value::Bottom`] for scalars.
    pub fn y(&self) -> Value {
        match self {
            Value::Vector(_, y) => (**y).clone(),
            Value::Text(s) => match s.split_once(',') {
                Some((_, y)) => Value::from_text(y),
                None => Value::Bottom,
            },
            _ => Value::Bottom,
        }
    }

    /// Flattens right-nested vectors (`a , b , c`) into their components.
    pub fn components(&self) -> Vec<Value> {
        let mut out = Vec::new();
        let mut current = self;
        while let Value::Vector(x, y) = current {
            out.push((**x).clone());
            current = y;
        }
        out.push(current.clone());
        out
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bottom => Ok(()),
            Value::Boolean(b) => write!(f, "{}", u8::from(*b)),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{:.6}", v),
            Value::Text(s) | Value::Symbol(s) => f.write_str(s),
            Value::Vector(x, y) => write!(f, "{} , {}", x, y),
            Value::Range { low, high } => write!(f, "[ {} , {} ]", low, high),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
