//! Query session builder
//!
//! Composes pagination, owner scoping, field filters, the join decision and
//! sorting into a [`QueryPlan`]. Malformed filter or sort input degrades to
//! fewer predicates or the default sort; only collaborator failures (session
//! acquisition, configuration lookup) are returned as errors.

use std::sync::Arc;

use crate::data::engine::{ConfigSource, StoreEngine};
use crate::data::error::DataError;

use super::filter::{FilterCompiler, FilterCriterion};
use super::guard::FieldGuard;
use super::join::JoinStrategy;
use super::observer::{FieldObserver, TracingObserver};
use super::pagination::Pagination;
use super::plan::QueryPlan;
use super::sort::{DEFAULT_SORT_FIELD, SortSpec};

/// Filter input of a single build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filters<'r> {
    #[default]
    None,
    /// One field/value pair, substring match
    Field { field: &'r str, value: &'r str },
    /// Criteria list; `json_paths` enables dotted-path JSON extraction
    Criteria {
        criteria: &'r [FilterCriterion],
        json_paths: bool,
    },
}

/// Everything a caller supplies for one build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRequest<'r> {
    pub owner: &'r str,
    pub pagination: Pagination,
    pub filters: Filters<'r>,
    pub sort: &'r SortSpec,
}

pub struct SessionBuilder<'a> {
    engine: &'a dyn StoreEngine,
    config: &'a dyn ConfigSource,
    guard: FieldGuard,
    observer: Arc<dyn FieldObserver>,
}

impl<'a> SessionBuilder<'a> {
    pub fn new(
        engine: &'a dyn StoreEngine,
        config: &'a dyn ConfigSource,
        guard: FieldGuard,
    ) -> Self {
        Self {
            engine,
            config,
            guard,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default `tracing` observer
    pub fn with_observer(mut self, observer: Arc<dyn FieldObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Primary table only, single field/value filter
    pub fn build(
        &self,
        owner: &str,
        pagination: Pagination,
        field: &str,
        value: &str,
        sort: &SortSpec,
    ) -> Result<QueryPlan, DataError> {
        let request = SessionRequest {
            owner,
            pagination,
            filters: Filters::Field { field, value },
            sort,
        };
        self.build_with_strategy(&request, JoinStrategy::Direct)
    }

    /// Primary table only, criteria list (no JSON paths)
    pub fn build_with_criteria(
        &self,
        owner: &str,
        pagination: Pagination,
        criteria: &[FilterCriterion],
        sort: &SortSpec,
    ) -> Result<QueryPlan, DataError> {
        let request = SessionRequest {
            owner,
            pagination,
            filters: Filters::Criteria {
                criteria,
                json_paths: false,
            },
            sort,
        };
        self.build_with_strategy(&request, JoinStrategy::Direct)
    }

    /// Join-aware variant: joins the user table when a window is active
    pub fn build_for_user(
        &self,
        owner: &str,
        pagination: Pagination,
        field: &str,
        value: &str,
        sort: &SortSpec,
    ) -> Result<QueryPlan, DataError> {
        let request = SessionRequest {
            owner,
            pagination,
            filters: Filters::Field { field, value },
            sort,
        };
        self.build_with_strategy(&request, JoinStrategy::for_pagination(&pagination))
    }

    /// Join-aware variant with criteria, including `base.sub` JSON paths
    pub fn build_for_user_with_criteria(
        &self,
        owner: &str,
        pagination: Pagination,
        criteria: &[FilterCriterion],
        sort: &SortSpec,
    ) -> Result<QueryPlan, DataError> {
        let request = SessionRequest {
            owner,
            pagination,
            filters: Filters::Criteria {
                criteria,
                json_paths: true,
            },
            sort,
        };
        self.build_with_strategy(&request, JoinStrategy::for_pagination(&pagination))
    }

    /// Build with an explicitly chosen join strategy
    pub fn build_with_strategy(
        &self,
        request: &SessionRequest<'_>,
        strategy: JoinStrategy,
    ) -> Result<QueryPlan, DataError> {
        let mut plan = self.engine.prepare()?;

        if let Some(window) = request.pagination.as_window() {
            plan.limit(window);
        }

        let compiler = FilterCompiler::new(&self.guard, self.observer.as_ref(), strategy);
        if let Some(predicate) = compiler.owner(request.owner) {
            plan.and(predicate);
        }

        match request.filters {
            Filters::None => {}
            Filters::Field { field, value } => {
                if let Some(predicate) = compiler.field_value(field, value) {
                    plan.and(predicate);
                }
            }
            Filters::Criteria {
                criteria,
                json_paths,
            } => {
                for criterion in criteria {
                    if let Some(predicate) = compiler.criterion(criterion, json_paths) {
                        plan.and(predicate);
                    }
                }
            }
        }

        strategy.attach(&mut plan, self.config)?;

        let sort_field = request.sort.field();
        if sort_field != DEFAULT_SORT_FIELD && !self.guard.is_safe(sort_field) {
            self.observer.unguarded_sort(sort_field);
        }
        plan.order_by(
            strategy.qualify(&self.guard.normalize(sort_field)),
            request.sort.order(),
        );

        strategy.project(&mut plan);

        tracing::debug!(
            backend = %self.engine.backend(),
            strategy = ?strategy,
            predicates = plan.predicates().len(),
            windowed = plan.window().is_some(),
            "Built query session"
        );

        Ok(plan)
    }
}
