use crate::{
    key::StoreKey,
    obs::sink::{self, MaterializeKind, MetricsEvent},
    query::{
        QueryError,
        filter::Intersection,
        range::RangeScan,
        resolved::ResolvedIds,
    },
    store::{Direction, ScoreRange, SortRequest, Store, Window},
};
use serde::Serialize;
use std::fmt;

///
/// QueryMode
/// Translation shape, decided once per resolution.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum QueryMode {
    /// No filters: order the "all identifiers" set.
    All,
    /// Equality filters only: intersect, then order.
    Equality,
    /// A range filter is active: one sorted-index scan.
    Range,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::Equality => "equality",
            Self::Range => "range",
        };
        write!(f, "{label}")
    }
}

///
/// StoreCommand
/// One store round-trip issued by a resolution.
///

#[derive(Clone, Debug, PartialEq)]
pub enum StoreCommand {
    Intersect {
        dest: StoreKey,
        sources: Vec<StoreKey>,
    },
    RangeScan {
        key: StoreKey,
        range: ScoreRange,
        direction: Direction,
        window: Option<Window>,
    },
    SortStore(SortRequest),
}

impl From<Intersection> for StoreCommand {
    fn from(step: Intersection) -> Self {
        Self::Intersect {
            dest: step.dest,
            sources: step.sources,
        }
    }
}

impl From<RangeScan> for StoreCommand {
    fn from(scan: RangeScan) -> Self {
        Self::RangeScan {
            key: scan.key,
            range: scan.range,
            direction: Direction::Asc,
            window: scan.window,
        }
    }
}

///
/// PlanOutput
/// Where the final identifier sequence lives once the commands have run.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlanOutput {
    /// Identifiers returned directly by the range scan.
    Scan,
    /// Identifiers materialized into a list key.
    List(StoreKey),
}

///
/// QueryPlan
///
/// Translated form of one builder state: the commands to issue, in order,
/// and where their result ends up. Plans are rebuilt on every resolution.
///

#[derive(Clone, Debug, PartialEq)]
pub struct QueryPlan {
    pub entity: &'static str,
    pub mode: QueryMode,
    pub commands: Vec<StoreCommand>,
    pub output: PlanOutput,
}

impl QueryPlan {
    /// Issue every command against `store` and locate the result.
    pub(crate) fn execute<S: Store + ?Sized>(&self, store: &S) -> Result<ResolvedIds, QueryError> {
        sink::record(MetricsEvent::Resolve {
            entity: self.entity,
            mode: self.mode,
        });

        let mut scanned = Vec::new();
        for command in &self.commands {
            match command {
                StoreCommand::Intersect { dest, sources } => {
                    let rows = store.sinterstore(dest, sources)?;
                    sink::record(MetricsEvent::Materialize {
                        entity: self.entity,
                        kind: MaterializeKind::Intersection,
                        rows: rows as u64,
                    });
                }
                StoreCommand::RangeScan {
                    key,
                    range,
                    direction,
                    window,
                } => {
                    scanned = store.zrange_by_score(key, *range, *direction, *window)?;
                    sink::record(MetricsEvent::RangeScan {
                        entity: self.entity,
                        rows: scanned.len() as u64,
                    });
                }
                StoreCommand::SortStore(request) => {
                    let rows = store.sort_store(request)?;
                    sink::record(MetricsEvent::Materialize {
                        entity: self.entity,
                        kind: MaterializeKind::SortStore,
                        rows: rows as u64,
                    });
                }
            }
        }

        Ok(match &self.output {
            PlanOutput::Scan => ResolvedIds::Scan(scanned),
            PlanOutput::List(key) => ResolvedIds::List(key.clone()),
        })
    }
}
