//! Runtime values

use std::fmt;
use std::rc::Rc;

use crate::repl::{HostData, HostRef};

/// Value produced by evaluating an expression
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Host(HostRef),
}

impl Value {
    /// Name reported by `type(x)`
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Host(h) => h.type_name(),
        }
    }

    /// `nil` and `false` are false; everything else is true
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Echo form: strings are quoted
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }

    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Convert to plain data for a host call. Host objects cannot be passed back.
    pub fn to_host_data(&self) -> Option<HostData> {
        Some(match self {
            Value::Nil => HostData::Nil,
            Value::Bool(b) => HostData::Bool(*b),
            Value::Int(i) => HostData::Int(*i),
            Value::Float(x) => HostData::Float(*x),
            Value::Str(s) => HostData::Str(s.to_string()),
            Value::Host(_) => return None,
        })
    }
}

impl From<HostData> for Value {
    fn from(data: HostData) -> Self {
        match data {
            HostData::Nil => Value::Nil,
            HostData::Bool(b) => Value::Bool(b),
            HostData::Int(i) => Value::Int(i),
            HostData::Float(x) => Value::Float(x),
            HostData::Str(s) => Value::str(s),
        }
    }
}

impl PartialEq for Value {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Host(a), Value::Host(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Host(h) => write!(f, "{}", h.describe()),
        }
    }
}
