//! Range filter translation.
//!
//! Only one range filter per query is honored: the first one added. A range
//! read goes straight to the attribute's sorted index, so it already yields
//! identifiers in ascending score order and needs no materialization.

use crate::{
    RANGE_EXPR_SEPARATOR,
    key::{KeySpace, StoreKey},
    model::EntityModel,
    query::QueryError,
    store::{ScoreBound, ScoreRange, Window},
    value::Value,
};
use std::{fmt, str::FromStr};

///
/// RangeOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RangeOp {
    Lt,
    Gt,
    Gte,
    Lte,
    /// Closed interval between a (min, max) pair.
    In,
}

impl RangeOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::In => "in",
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lt" => Ok(Self::Lt),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lte" => Ok(Self::Lte),
            "in" => Ok(Self::In),
            other => Err(QueryError::MalformedRange(format!(
                "unsupported operator '{other}'"
            ))),
        }
    }
}

///
/// RangeValue
/// Operand of a range filter: one bound, or a (min, max) pair for `in`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum RangeValue {
    Scalar(Value),
    Pair(Value, Value),
}

impl RangeValue {
    #[must_use]
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    #[must_use]
    pub fn pair(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self::Pair(min.into(), max.into())
    }
}

///
/// RangeFilter
/// Unparsed range constraint as recorded by the builder (`age__gte`).
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RangeFilter {
    pub(crate) expr: String,
    pub(crate) value: RangeValue,
}

impl RangeFilter {
    pub(crate) fn new(attr: &str, op: RangeOp, value: RangeValue) -> Self {
        Self {
            expr: format!("{attr}{RANGE_EXPR_SEPARATOR}{op}"),
            value,
        }
    }

    // Split `attr__op` into its two parts; anything else is malformed.
    fn split(&self) -> Result<(&str, RangeOp), QueryError> {
        let mut parts = self.expr.split(RANGE_EXPR_SEPARATOR);

        match (parts.next(), parts.next(), parts.next()) {
            (Some(attr), Some(op), None) if !attr.is_empty() => Ok((attr, op.parse()?)),
            _ => Err(QueryError::MalformedRange(format!(
                "'{}' should have the form attribute{RANGE_EXPR_SEPARATOR}operator",
                self.expr
            ))),
        }
    }
}

///
/// RangeScan
/// One sorted-set range read.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RangeScan {
    pub(crate) key: StoreKey,
    pub(crate) range: ScoreRange,
    pub(crate) window: Option<Window>,
}

/// Translate one range filter into a sorted-index scan.
pub(crate) fn translate(
    model: &EntityModel,
    keys: &KeySpace,
    filter: &RangeFilter,
    window: Option<Window>,
) -> Result<RangeScan, QueryError> {
    let (attr, op) = filter.split()?;

    let desc = model
        .attribute(attr)
        .filter(|desc| desc.is_sorted_numeric() && model.is_indexed(attr))
        .ok_or_else(|| QueryError::not_indexed(attr, model.name))?;

    let range = match (op, &filter.value) {
        (RangeOp::Lt, RangeValue::Scalar(v)) => ScoreRange::new(
            ScoreBound::NegInf,
            ScoreBound::Exclusive(desc.typecast_for_score(v)?),
        ),
        (RangeOp::Gt, RangeValue::Scalar(v)) => ScoreRange::new(
            ScoreBound::Exclusive(desc.typecast_for_score(v)?),
            ScoreBound::PosInf,
        ),
        (RangeOp::Gte, RangeValue::Scalar(v)) => ScoreRange::new(
            ScoreBound::Inclusive(desc.typecast_for_score(v)?),
            ScoreBound::PosInf,
        ),
        (RangeOp::Lte, RangeValue::Scalar(v)) => ScoreRange::new(
            ScoreBound::NegInf,
            ScoreBound::Inclusive(desc.typecast_for_score(v)?),
        ),
        // min > max is passed through as-is and matches nothing
        (RangeOp::In, RangeValue::Pair(min, max)) => ScoreRange::new(
            ScoreBound::Inclusive(desc.typecast_for_score(min)?),
            ScoreBound::Inclusive(desc.typecast_for_score(max)?),
        ),
        (RangeOp::In, RangeValue::Scalar(_)) => {
            return Err(QueryError::MalformedRange(format!(
                "'{}' expects a (min, max) pair",
                filter.expr
            )));
        }
        (_, RangeValue::Pair(..)) => {
            return Err(QueryError::MalformedRange(format!(
                "'{}' expects a single bound",
                filter.expr
            )));
        }
    };

    Ok(RangeScan {
        key: keys.sorted(attr),
        range,
        window,
    })
}
