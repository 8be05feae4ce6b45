//! 运行时：网的批量标识更新、按优先级的发射轮次与历史版本.
use std::cmp::Reverse;
use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use thiserror::Error;

use crate::net::history::{self, History, HistoryEntry, RESET_LABEL, Version};
use crate::net::structure::{Markings, Place, Places};
use crate::net::transition::{Transition, Transitions};

/// Marker mappings addressed by place identifier, as consumed by the bulk
/// update operations.
pub type MarkingsByPlace<V> = IndexMap<String, Markings<V>>;

#[derive(Debug, Error)]
pub enum FireError<V, C> {
    /// Carries the net reached after the last permitted round.
    #[error(
        "net did not settle within {rounds} rounds (reached version {})",
        .net.last_version()
    )]
    RoundLimit { rounds: usize, net: Box<Net<V, C>> },
}

/// Result of [`Net::fire_until_stable`].
#[derive(Debug)]
pub struct Settled<V, C> {
    pub net: Net<V, C>,
    /// Rounds executed, including the final round that changed nothing.
    pub rounds: usize,
}

/// An immutable Petri net value. Every operation returns a new net and
/// leaves the receiver, and everything reachable from it, untouched.
pub struct Net<V, C> {
    identifier: String,
    places: Places<V>,
    transitions: Transitions<V, C>,
    computed: C,
    initial_computed: C,
    history: History,
}

impl<V, C: Clone> Net<V, C> {
    pub fn new(identifier: impl Into<String>, initial_computed: C) -> Self {
        Self::from_parts(
            identifier,
            initial_computed.clone(),
            initial_computed,
            Places::new(),
            Transitions::new(),
            History::new(),
        )
    }
}

impl<V, C> Net<V, C> {
    pub fn from_parts(
        identifier: impl Into<String>,
        computed: C,
        initial_computed: C,
        places: Places<V>,
        transitions: Transitions<V, C>,
        history: History,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            places,
            transitions,
            computed,
            initial_computed,
            history,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn places(&self) -> &Places<V> {
        &self.places
    }

    pub fn place(&self, identifier: &str) -> Option<&Place<V>> {
        self.places.get(identifier)
    }

    pub fn transitions(&self) -> &Transitions<V, C> {
        &self.transitions
    }

    pub fn transition(&self, identifier: &str) -> Option<&Transition<V, C>> {
        self.transitions.get(identifier)
    }

    pub fn computed_value(&self) -> &C {
        &self.computed
    }

    pub fn initial_computed_value(&self) -> &C {
        &self.initial_computed
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn last_version(&self) -> Version {
        history::last_version(&self.history)
    }

    /// Transitions in firing order: descending priority, ties kept in
    /// insertion order of the transitions mapping.
    pub fn transitions_by_priority(&self) -> Vec<&Transition<V, C>> {
        self.transitions
            .values()
            .sorted_by_key(|transition| Reverse(transition.priority()))
            .collect()
    }
}

impl<V, C: Clone> Net<V, C> {
    fn rebuild(&self, places: Places<V>, computed: C, history: History) -> Self {
        Self {
            identifier: self.identifier.clone(),
            places,
            transitions: self.transitions.clone(),
            computed,
            initial_computed: self.initial_computed.clone(),
            history,
        }
    }

    pub fn with_places(&self, places: Places<V>) -> Self {
        self.rebuild(places, self.computed.clone(), self.history.clone())
    }

    pub fn with_transitions(&self, transitions: Transitions<V, C>) -> Self {
        Self {
            identifier: self.identifier.clone(),
            places: self.places.clone(),
            transitions,
            computed: self.computed.clone(),
            initial_computed: self.initial_computed.clone(),
            history: self.history.clone(),
        }
    }

    /// Seeds the history, e.g. when restoring a net that already fired.
    pub fn with_history(&self, history: History) -> Self {
        self.rebuild(self.places.clone(), self.computed.clone(), history)
    }

    /// Replaces the marker mapping of every listed place. Unknown place
    /// identifiers are skipped.
    pub fn with_markings_by_place_id(&self, update: MarkingsByPlace<V>) -> Self {
        self.update_places(update, Place::with_markings)
    }

    /// Merges markers into every listed place. Unknown place identifiers are
    /// skipped.
    pub fn with_added_markings_by_place_id(&self, update: MarkingsByPlace<V>) -> Self {
        self.update_places(update, Place::with_added_markings)
    }

    fn update_places(
        &self,
        update: MarkingsByPlace<V>,
        apply: impl Fn(&Place<V>, Markings<V>) -> Place<V>,
    ) -> Self {
        let mut places = self.places.clone();
        for (place_id, markings) in update {
            match places.get_mut(&place_id) {
                Some(place) => {
                    let updated = apply(&*place, markings);
                    *place = updated;
                }
                None => log::debug!(
                    "net {}: ignoring markings for unknown place {}",
                    self.identifier,
                    place_id
                ),
            }
        }
        self.rebuild(places, self.computed.clone(), self.history.clone())
    }

    /// Empties every place and restores the initial computed value. With
    /// `reset_history` the history is cleared, otherwise a [`RESET_LABEL`]
    /// entry is appended with the next version.
    pub fn with_reset_markings(&self, reset_history: bool) -> Self {
        self.reset_with_clock(reset_history, history::now_millis)
    }

    pub fn reset_with_clock(&self, reset_history: bool, clock: impl FnOnce() -> u64) -> Self {
        let places = self
            .places
            .iter()
            .map(|(id, place)| (id.clone(), place.with_markings(Markings::new())))
            .collect();
        let history = if reset_history {
            History::new()
        } else {
            self.history.push(HistoryEntry::new(
                clock(),
                RESET_LABEL,
                self.last_version() + 1,
            ))
        };
        log::debug!(
            "net {}: reset markings (history {})",
            self.identifier,
            if reset_history { "cleared" } else { "kept" }
        );
        self.rebuild(places, self.initial_computed.clone(), history)
    }

    /// Runs one firing round: every transition, highest priority first, sees
    /// the places and computed value left by the one before it. Each
    /// transition that reports a change bumps the version and is recorded in
    /// the returned net's history.
    pub fn execute_transitions_by_priority(&self) -> Self {
        self.execute_transitions_with_clock(history::now_millis)
    }

    pub fn execute_transitions_with_clock(&self, mut clock: impl FnMut() -> u64) -> Self {
        let mut places = self.places.clone();
        let mut computed = self.computed.clone();
        let mut version = self.last_version();
        let mut history = self.history.clone();

        for transition in self.transitions_by_priority() {
            let outcome = transition.execute_on_places(places, computed);
            let changed = outcome.changed();
            places = outcome.places;
            computed = outcome.computed;
            if !changed {
                log::trace!("net {}: {} not fired", self.identifier, transition.identifier());
                continue;
            }
            version += 1;
            log::debug!(
                "net {}: {} fired (consumed {}, created {}) -> version {}",
                self.identifier,
                transition.identifier(),
                outcome.consumed,
                outcome.created,
                version
            );
            history = history.push(HistoryEntry::new(clock(), transition.identifier(), version));
        }

        self.rebuild(places, computed, history)
    }

    /// Fires rounds until one of them changes nothing.
    pub fn fire_until_stable(&self, max_rounds: usize) -> Result<Settled<V, C>, FireError<V, C>> {
        let mut net = self.clone();
        for round in 1..=max_rounds {
            let before = net.last_version();
            net = net.execute_transitions_by_priority();
            if net.last_version() == before {
                log::debug!("net {}: settled after {} rounds", self.identifier, round);
                return Ok(Settled { net, rounds: round });
            }
        }
        log::debug!("net {}: still firing after {} rounds", self.identifier, max_rounds);
        Err(FireError::RoundLimit {
            rounds: max_rounds,
            net: Box::new(net),
        })
    }
}

impl<V, C: Clone> Clone for Net<V, C> {
    fn clone(&self) -> Self {
        self.rebuild(
            self.places.clone(),
            self.computed.clone(),
            self.history.clone(),
        )
    }
}

impl<V: fmt::Debug, C: fmt::Debug> fmt::Debug for Net<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Net")
            .field("identifier", &self.identifier)
            .field("places", &self.places)
            .field("transitions", &self.transitions)
            .field("computed", &self.computed)
            .field("history", &self.history)
            .finish()
    }
}

impl<V, C> fmt::Display for Net<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "net {} (version {})", self.identifier, self.last_version())?;
        for (id, place) in &self.places {
            writeln!(
                f,
                "  {}: [{}]",
                id,
                place.markings().keys().join(", ")
            )?;
        }
        Ok(())
    }
}
