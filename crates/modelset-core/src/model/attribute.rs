use crate::value::Value;
use thiserror::Error as ThisError;

///
/// AttributeModel
/// Runtime attribute descriptor used by filter translation and ordering.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AttributeModel {
    /// Attribute name as used in filters, ordering and key naming.
    pub name: &'static str,
    /// Storage shape; decides typecasting and index flavour.
    pub kind: AttributeKind,
}

impl AttributeModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self { name, kind }
    }

    /// Whether the attribute is backed by a sorted-numeric index.
    ///
    /// Sorted-numeric attributes support range filters and sort
    /// numerically; everything else sorts lexicographically.
    #[must_use]
    pub const fn is_sorted_numeric(&self) -> bool {
        self.kind.is_sorted_numeric()
    }

    /// Canonical string form of `value` as written into per-value index keys.
    pub fn typecast_for_storage(&self, value: &Value) -> Result<String, TypecastError> {
        let stored = match (self.kind, value) {
            (AttributeKind::Text, v) => Some(v.to_string()),

            (AttributeKind::Bool, Value::Bool(b)) => Some(if *b { "1" } else { "0" }.to_string()),
            (AttributeKind::Bool, Value::Int(i @ (0 | 1))) => Some(i.to_string()),

            (AttributeKind::Int | AttributeKind::Counter, Value::Int(i)) => Some(i.to_string()),
            (AttributeKind::Int | AttributeKind::Counter, Value::Text(s)) => {
                s.trim().parse::<i64>().ok().map(|i| i.to_string())
            }

            (AttributeKind::Float, Value::Int(i)) => Some(i.to_string()),
            (AttributeKind::Float, Value::Float(f)) if f.is_finite() => Some(f.to_string()),
            (AttributeKind::Float, Value::Text(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.to_string()),

            (AttributeKind::Date, Value::Date(d)) => Some(d.to_string()),
            (AttributeKind::Date | AttributeKind::DateTime, Value::Int(i))
            | (AttributeKind::DateTime, Value::Timestamp(i)) => Some(i.to_string()),

            _ => None,
        };

        stored.ok_or_else(|| TypecastError {
            attribute: self.name.to_string(),
            kind: self.kind,
            value: value.clone(),
        })
    }

    /// Double-precision score of `value` as held in the sorted index.
    pub fn typecast_for_score(&self, value: &Value) -> Result<f64, TypecastError> {
        let stored = self.typecast_for_storage(value)?;

        stored.parse::<f64>().map_err(|_| TypecastError {
            attribute: self.name.to_string(),
            kind: self.kind,
            value: value.clone(),
        })
    }
}

///
/// AttributeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeKind {
    Bool,
    Counter,
    /// Days since the Unix epoch.
    Date,
    /// Seconds since the Unix epoch.
    DateTime,
    Float,
    Int,
    Text,
}

impl AttributeKind {
    #[must_use]
    pub const fn is_sorted_numeric(self) -> bool {
        matches!(
            self,
            Self::Counter | Self::Date | Self::DateTime | Self::Float | Self::Int
        )
    }
}

///
/// TypecastError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("cannot typecast {} value '{value}' for attribute '{attribute}' ({kind:?})", .value.label())]
pub struct TypecastError {
    pub attribute: String,
    pub kind: AttributeKind,
    pub value: Value,
}
