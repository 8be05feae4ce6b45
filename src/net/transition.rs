//! 迁移：带优先级的纯函数执行体，以及执行结果（消耗/产生计数）。
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::net::structure::Places;

pub type Priority = i64;

/// Transitions of one net, keyed by transition identifier. Insertion order
/// breaks priority ties.
pub type Transitions<V, C> = IndexMap<String, Transition<V, C>>;

/// What an executor hands back: the full replacement place mapping, the next
/// computed value and how many markers it removed and added.
#[derive(Debug, Clone)]
pub struct Outcome<V, C> {
    pub places: Places<V>,
    pub computed: C,
    pub consumed: usize,
    pub created: usize,
}

impl<V, C> Outcome<V, C> {
    pub fn new(places: Places<V>, computed: C, consumed: usize, created: usize) -> Self {
        Self {
            places,
            computed,
            consumed,
            created,
        }
    }

    /// The no-op signal of a transition whose guard is unmet.
    pub fn unchanged(places: Places<V>, computed: C) -> Self {
        Self::new(places, computed, 0, 0)
    }

    pub fn changed(&self) -> bool {
        self.consumed > 0 || self.created > 0
    }
}

/// Behaviour of a transition. Implementations must be pure and terminate;
/// when the guard does not hold they return [`Outcome::unchanged`].
pub trait Executor<V, C>: Send + Sync {
    fn execute(&self, places: Places<V>, computed: C) -> Outcome<V, C>;
}

impl<V, C, F> Executor<V, C> for F
where
    F: Fn(Places<V>, C) -> Outcome<V, C> + Send + Sync,
{
    fn execute(&self, places: Places<V>, computed: C) -> Outcome<V, C> {
        self(places, computed)
    }
}

pub struct Transition<V, C> {
    identifier: String,
    priority: Priority,
    executor: Arc<dyn Executor<V, C>>,
}

impl<V, C> Transition<V, C> {
    pub fn new(
        identifier: impl Into<String>,
        priority: Priority,
        executor: impl Executor<V, C> + 'static,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            priority,
            executor: Arc::new(executor),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn with_priority(&self, priority: Priority) -> Self {
        Self {
            priority,
            ..self.clone()
        }
    }

    pub fn with_executor(&self, executor: impl Executor<V, C> + 'static) -> Self {
        Self {
            identifier: self.identifier.clone(),
            priority: self.priority,
            executor: Arc::new(executor),
        }
    }

    pub fn execute_on_places(&self, places: Places<V>, computed: C) -> Outcome<V, C> {
        self.executor.execute(places, computed)
    }
}

impl<V, C> Clone for Transition<V, C> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            priority: self.priority,
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<V, C> fmt::Debug for Transition<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("identifier", &self.identifier)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

pub fn index_transitions<V, C>(
    transitions: impl IntoIterator<Item = Transition<V, C>>,
) -> Transitions<V, C> {
    transitions
        .into_iter()
        .map(|transition| (transition.identifier.clone(), transition))
        .collect()
}
