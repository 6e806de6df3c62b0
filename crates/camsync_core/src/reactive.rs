//! Reactive value cells with explicit change detection
//!
//! A [`Tracked`] cell separates three kinds of writes:
//!
//! - [`Tracked::hydrate`] - the value was just read from the remote store, so it
//!   becomes the observed baseline and is never reported as a change
//! - [`Tracked::assign`] - a local edit, reported by the next [`Tracked::observe`]
//!   if it differs from the baseline
//! - [`Tracked::assign_synced`] - a local edit whose remote write was already
//!   dispatched by the caller; it also settles the cell, so a read still in
//!   flight can no longer replace it
//!
//! Values are compared with [`SameValue`] so that NaN equals itself.
//!
//! [`Watchers`] holds the callbacks that run for reported changes.

use slotmap::{new_key_type, SlotMap};

/// Equality used by change detection
pub trait SameValue: Copy {
    fn same_value(&self, other: &Self) -> bool;
}

impl SameValue for f64 {
    fn same_value(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl SameValue for f32 {
    fn same_value(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl<T: SameValue> SameValue for Option<T> {
    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// A value transition reported by change detection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Change<T> {
    /// Previously observed value, `None` if the field was never set
    pub old: Option<T>,
    /// Newly observed value
    pub new: T,
}

/// A value cell that tracks what change detection last saw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tracked<T> {
    current: Option<T>,
    observed: Option<T>,
    hydrated: bool,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tracked<T> {
    /// Create an unset, unhydrated cell
    pub const fn new() -> Self {
        Self {
            current: None,
            observed: None,
            hydrated: false,
        }
    }

    /// Whether the initial remote read has been applied
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }
}

impl<T: SameValue> Tracked<T> {
    /// Current value, `None` while unset
    pub fn get(&self) -> Option<T> {
        self.current
    }

    /// Local edit. Returns `true` if the current value changed.
    pub fn assign(&mut self, value: Option<T>) -> bool {
        let changed = !self.current.same_value(&value);
        self.current = value;
        changed
    }

    /// Apply the value read from the remote store.
    ///
    /// The value becomes the observed baseline, so it is never reported as a
    /// change. Any local edit made before the read resolved is replaced.
    /// Ignored once the cell is hydrated. Returns `true` if applied.
    pub fn hydrate(&mut self, value: Option<T>) -> bool {
        if self.hydrated {
            return false;
        }
        self.current = value;
        self.observed = value;
        self.hydrated = true;
        true
    }

    /// Local edit whose remote write has already been dispatched.
    ///
    /// Marks the cell hydrated, since the remote now holds this value.
    pub fn assign_synced(&mut self, value: T) {
        self.current = Some(value);
        self.observed = Some(value);
        self.hydrated = true;
    }

    /// Run change detection on this cell.
    ///
    /// Reports a change when the cell is hydrated, holds a value and that
    /// value differs from the last observed one. Unset values are filtered
    /// and leave the baseline untouched.
    pub fn observe(&mut self) -> Option<Change<T>> {
        if !self.hydrated {
            return None;
        }

        let new = self.current?;
        if self.observed.same_value(&Some(new)) {
            return None;
        }

        let old = self.observed.replace(new);
        Some(Change { old, new })
    }
}

new_key_type! {
    /// Handle to a registered watcher, used to remove it again
    pub struct WatcherKey;
}

type Callback<K, T> = Box<dyn FnMut(K, Change<T>)>;

struct Watcher<K, T> {
    target: K,
    callback: Callback<K, T>,
}

/// Change callbacks registered per key
pub struct Watchers<K, T> {
    entries: SlotMap<WatcherKey, Watcher<K, T>>,
}

impl<K, T> Default for Watchers<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Watchers<K, T> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    /// Number of registered watchers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove a watcher. Returns `false` if it was already removed.
    pub fn unwatch(&mut self, key: WatcherKey) -> bool {
        self.entries.remove(key).is_some()
    }
}

impl<K: Copy + PartialEq, T: Copy> Watchers<K, T> {
    /// Register a callback that runs for every change of `target`
    pub fn watch<F>(&mut self, target: K, callback: F) -> WatcherKey
    where
        F: FnMut(K, Change<T>) + 'static,
    {
        self.entries.insert(Watcher {
            target,
            callback: Box::new(callback),
        })
    }

    /// Run the callbacks registered for `target`. Returns how many ran.
    pub fn notify(&mut self, target: K, change: Change<T>) -> usize {
        let mut count = 0;
        for watcher in self.entries.values_mut().filter(|w| w.target == target) {
            (watcher.callback)(target, change);
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_hydration_is_not_a_change() {
        let mut cell = Tracked::new();
        cell.hydrate(Some(1.5));
        assert_eq!(cell.get(), Some(1.5));
        assert_eq!(cell.observe(), None);
    }

    #[test]
    fn test_hydration_to_zero_is_distinct_from_unset() {
        let mut cell = Tracked::new();
        assert_eq!(cell.get(), None);
        cell.hydrate(Some(0.0));
        assert_eq!(cell.get(), Some(0.0));
        assert!(cell.is_hydrated());
    }

    #[test]
    fn test_edit_after_hydration_is_reported_once() {
        let mut cell = Tracked::new();
        cell.hydrate(Some(1.0));
        cell.assign(Some(3.0));
        assert_eq!(cell.observe(), Some(Change { old: Some(1.0), new: 3.0 }));
        assert_eq!(cell.observe(), None);
    }

    #[test]
    fn test_edit_back_to_baseline_is_not_a_change() {
        let mut cell = Tracked::new();
        cell.hydrate(Some(1.0));
        cell.assign(Some(2.0));
        cell.assign(Some(1.0));
        assert_eq!(cell.observe(), None);
    }

    #[test]
    fn test_edit_before_hydration_is_held() {
        let mut cell = Tracked::new();
        cell.assign(Some(4.0));
        assert_eq!(cell.observe(), None);

        cell.hydrate(Some(2.0));
        assert_eq!(cell.get(), Some(2.0));
        assert_eq!(cell.observe(), None);
    }

    #[test]
    fn test_unset_value_is_filtered() {
        let mut cell = Tracked::new();
        cell.hydrate(Some(1.0));
        cell.assign(None);
        assert_eq!(cell.observe(), None);

        // Baseline survives the cleared value
        cell.assign(Some(1.0));
        assert_eq!(cell.observe(), None);
    }

    #[test]
    fn test_first_value_after_empty_hydration() {
        let mut cell = Tracked::new();
        cell.hydrate(None);
        cell.assign(Some(5.0));
        assert_eq!(cell.observe(), Some(Change { old: None, new: 5.0 }));
    }

    #[test]
    fn test_synced_assignment_is_not_a_change() {
        let mut cell = Tracked::new();
        cell.hydrate(Some(9.0));
        cell.assign_synced(0.0);
        assert_eq!(cell.get(), Some(0.0));
        assert_eq!(cell.observe(), None);
    }

    #[test]
    fn test_assign_reports_value_change() {
        let mut cell = Tracked::new();
        assert!(cell.assign(Some(1.0)));
        assert!(!cell.assign(Some(1.0)));
        assert!(cell.assign(None));
    }

    #[test]
    fn test_synced_assignment_settles_unhydrated_cell() {
        let mut cell = Tracked::new();
        cell.assign_synced(0.0);
        assert!(cell.is_hydrated());

        // A read answered afterwards is stale
        assert!(!cell.hydrate(None));
        assert_eq!(cell.get(), Some(0.0));

        cell.assign(Some(2.0));
        assert_eq!(cell.observe(), Some(Change { old: Some(0.0), new: 2.0 }));
    }

    #[test]
    fn test_second_hydration_is_ignored() {
        let mut cell = Tracked::new();
        assert!(cell.hydrate(Some(1.0)));
        assert!(!cell.hydrate(Some(5.0)));
        assert_eq!(cell.get(), Some(1.0));
    }

    #[test]
    fn test_nan_equals_itself() {
        let mut cell = Tracked::new();
        cell.hydrate(Some(0.0));
        assert!(cell.assign(Some(f64::NAN)));
        assert!(cell.observe().is_some());

        assert!(!cell.assign(Some(f64::NAN)));
        assert_eq!(cell.observe(), None);
    }

    #[test]
    fn test_watchers_notify_only_target() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut watchers = Watchers::new();

        let log = seen.clone();
        watchers.watch("a", move |key, change: Change<i32>| log.borrow_mut().push((key, change.new)));
        let log = seen.clone();
        watchers.watch("b", move |key, change: Change<i32>| log.borrow_mut().push((key, change.new)));

        let ran = watchers.notify("a", Change { old: None, new: 7 });
        assert_eq!(ran, 1);
        assert_eq!(*seen.borrow(), vec![("a", 7)]);
    }

    #[test]
    fn test_unwatch() {
        let count = Rc::new(RefCell::new(0));
        let mut watchers = Watchers::new();
        let c = count.clone();
        let key = watchers.watch(1u8, move |_, _: Change<f64>| *c.borrow_mut() += 1);

        assert!(watchers.unwatch(key));
        assert!(!watchers.unwatch(key));
        assert!(watchers.is_empty());
        assert_eq!(watchers.notify(1, Change { old: None, new: 1.0 }), 0);
        assert_eq!(*count.borrow(), 0);
    }
}
