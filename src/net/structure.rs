//! 网的静态元素：标记（Marker）与库所（Place）。
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Markers of one place, keyed by marker identifier.
pub type Markings<V> = IndexMap<String, Marker<V>>;

/// Places of one net, keyed by place identifier.
pub type Places<V> = IndexMap<String, Place<V>>;

/// An identified token wrapping one opaque domain value.
pub struct Marker<V> {
    identifier: String,
    value: Arc<V>,
}

impl<V> Marker<V> {
    pub fn new(identifier: impl Into<String>, value: V) -> Self {
        Self {
            identifier: identifier.into(),
            value: Arc::new(value),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V> Clone for Marker<V> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            value: Arc::clone(&self.value),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Marker<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Marker")
            .field(&self.identifier)
            .field(&self.value)
            .finish()
    }
}

/// A named holder of markers.
///
/// The marker mapping sits behind an `Arc`; both `with_*` operations build a
/// fresh mapping so places handed out earlier never change.
pub struct Place<V> {
    identifier: String,
    markings: Arc<Markings<V>>,
}

impl<V> Place<V> {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::with_initial_markings(identifier, Markings::new())
    }

    pub fn with_initial_markings(identifier: impl Into<String>, markings: Markings<V>) -> Self {
        Self {
            identifier: identifier.into(),
            markings: Arc::new(markings),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn markings(&self) -> &Markings<V> {
        &self.markings
    }

    pub fn marker(&self, identifier: &str) -> Option<&Marker<V>> {
        self.markings.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.markings.contains_key(identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.markings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.markings.len()
    }

    /// Replaces the whole marker mapping.
    pub fn with_markings(&self, markings: Markings<V>) -> Self {
        Self {
            identifier: self.identifier.clone(),
            markings: Arc::new(markings),
        }
    }

    /// Merges `added` over the current markers; on a shared identifier the
    /// added marker wins.
    pub fn with_added_markings(&self, added: Markings<V>) -> Self {
        if added.is_empty() {
            return self.clone();
        }
        let mut merged = Markings::clone(&self.markings);
        merged.extend(added);
        Self {
            identifier: self.identifier.clone(),
            markings: Arc::new(merged),
        }
    }

    /// Drops the named markers, ignoring identifiers that are not present.
    pub fn without_markers<'a>(&self, identifiers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut remaining = Markings::clone(&self.markings);
        for identifier in identifiers {
            remaining.shift_remove(identifier);
        }
        self.with_markings(remaining)
    }
}

impl<V> Clone for Place<V> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            markings: Arc::clone(&self.markings),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Place<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Place")
            .field("identifier", &self.identifier)
            .field("markings", &self.markings.values().collect::<Vec<_>>())
            .finish()
    }
}

/// Keys markers by their own identifiers; a later marker replaces an earlier
/// one with the same identifier.
pub fn index_markers<V>(markers: impl IntoIterator<Item = Marker<V>>) -> Markings<V> {
    markers
        .into_iter()
        .map(|marker| (marker.identifier.clone(), marker))
        .collect()
}

/// Keys places by their own identifiers; a later place replaces an earlier
/// one with the same identifier.
pub fn index_places<V>(places: impl IntoIterator<Item = Place<V>>) -> Places<V> {
    places
        .into_iter()
        .map(|place| (place.identifier.clone(), place))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<V>(place: &Place<V>) -> Vec<&str> {
        place.markings().keys().map(String::as_str).collect()
    }

    #[test]
    fn with_markings_replaces_wholesale() {
        let place = Place::with_initial_markings(
            "p",
            index_markers([Marker::new("a", 1), Marker::new("b", 2)]),
        );
        let replaced = place.with_markings(index_markers([Marker::new("c", 3)]));

        assert_eq!(replaced.identifier(), "p");
        assert_eq!(ids(&replaced), vec!["c"]);
        assert_eq!(ids(&place), vec!["a", "b"]);
    }

    #[test]
    fn with_added_markings_last_write_wins() {
        let place = Place::with_initial_markings(
            "p",
            index_markers([Marker::new("a", 1), Marker::new("b", 2)]),
        );
        let merged =
            place.with_added_markings(index_markers([Marker::new("b", 20), Marker::new("c", 3)]));

        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
        assert_eq!(merged.marker("b").map(Marker::value), Some(&20));
        assert_eq!(place.marker("b").map(Marker::value), Some(&2));
        assert!(!place.contains("c"));
    }

    #[test]
    fn without_markers_ignores_unknown_ids() {
        let place = Place::with_initial_markings("p", index_markers([Marker::new("a", ())]));
        let trimmed = place.without_markers(["a", "zzz"]);

        assert!(trimmed.is_empty());
        assert_eq!(place.len(), 1);
    }

    #[test]
    fn index_places_keys_by_identifier() {
        let places = index_places([Place::<()>::new("A"), Place::new("B")]);
        assert_eq!(places.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(places["B"].identifier(), "B");
    }
}
