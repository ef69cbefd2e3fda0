//! Named row predicates and the id-keyed set that combines them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared row predicate.
pub type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Hook run when the user dismisses a filter, so the control that created it
/// can reset itself.
pub type RemoveHook = Arc<dyn Fn() + Send + Sync>;

/// A named predicate over rows of type `R`.
///
/// Filters are identified by `id`: inserting a filter into a [`FilterSet`]
/// with an id that is already present replaces the old one.
///
/// # Example
///
/// ```
/// use quantix_lib::table::Filter;
///
/// let positive = Filter::new("beta", |beta: &f64| *beta > 0.0)
///     .with_display("Beta")
///     .with_label("Positive");
///
/// assert!(positive.fits(&1.2));
/// assert!(!positive.fits(&-0.4));
/// ```
pub struct Filter<R> {
    id: String,
    display: Option<String>,
    label: Option<String>,
    fit: Predicate<R>,
    on_remove: Option<RemoveHook>,
}

impl<R> Filter<R> {
    /// Creates a filter from an id and a predicate.
    pub fn new<F>(id: impl Into<String>, fit: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            display: None,
            label: None,
            fit: Arc::new(fit),
            on_remove: None,
        }
    }

    /// Sets the heading shown on the filter pill.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Sets the value text shown on the filter pill.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the hook [`FilterSet::dismiss`] runs after removing this filter.
    pub fn on_remove<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_remove = Some(Arc::new(hook));
        self
    }

    /// Returns the filter id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the pill heading, if any.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Returns the pill value text, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` if `row` passes this filter.
    pub fn fits(&self, row: &R) -> bool {
        (self.fit)(row)
    }

    fn run_remove_hook(&self) {
        if let Some(hook) = &self.on_remove {
            hook();
        }
    }
}

impl<R> Clone for Filter<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            display: self.display.clone(),
            label: self.label.clone(),
            fit: Arc::clone(&self.fit),
            on_remove: self.on_remove.clone(),
        }
    }
}

impl<R> fmt::Debug for Filter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("id", &self.id)
            .field("display", &self.display)
            .field("label", &self.label)
            .field("on_remove", &self.on_remove.is_some())
            .finish_non_exhaustive()
    }
}

/// The active filters of one table, keyed by id.
///
/// Evaluation is a logical AND and does not depend on order. The display
/// order is kept separately so filter pills stay where they were when a
/// filter is replaced.
pub struct FilterSet<R> {
    filters: HashMap<String, Filter<R>>,
    order: Vec<String>,
}

impl<R> FilterSet<R> {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self {
            filters: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Inserts a filter, replacing any filter with the same id.
    ///
    /// Returns the replaced filter.
    pub fn insert(&mut self, filter: Filter<R>) -> Option<Filter<R>> {
        let id = filter.id.clone();
        let replaced = self.filters.insert(id.clone(), filter);
        if replaced.is_some() {
            log::debug!("Replaced filter '{}'", id);
        } else {
            self.order.push(id);
        }
        replaced
    }

    /// Removes a filter without running its hook.
    pub fn remove(&mut self, id: &str) -> Option<Filter<R>> {
        let removed = self.filters.remove(id)?;
        self.order.retain(|existing| existing != id);
        log::debug!("Removed filter '{}'", id);
        Some(removed)
    }

    /// Removes a filter and runs its remove hook.
    ///
    /// Returns `true` if a filter was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        match self.remove(id) {
            Some(filter) => {
                filter.run_remove_hook();
                true
            }
            None => false,
        }
    }

    /// Removes every filter without running hooks.
    pub fn clear(&mut self) {
        self.filters.clear();
        self.order.clear();
    }

    /// Returns the filter with the given id.
    pub fn get(&self, id: &str) -> Option<&Filter<R>> {
        self.filters.get(id)
    }

    /// Returns `true` if a filter with the given id is active.
    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// Returns the number of active filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterates over the filters in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Filter<R>> {
        self.order.iter().filter_map(|id| self.filters.get(id))
    }

    /// Returns `true` if `row` passes every filter. An empty set accepts all rows.
    pub fn fits(&self, row: &R) -> bool {
        self.filters.values().all(|filter| filter.fits(row))
    }
}

impl<R> Default for FilterSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FilterSet<R> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            order: self.order.clone(),
        }
    }
}

impl<R> fmt::Debug for FilterSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<R> FromIterator<Filter<R>> for FilterSet<R> {
    fn from_iter<I: IntoIterator<Item = Filter<R>>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for filter in iter {
            set.insert(filter);
        }
        set
    }
}

/// Returns the rows passing every filter, in their original order.
///
/// With no active filter this is every row, untouched.
pub fn filter_rows<'a, R>(rows: &'a [R], filters: &FilterSet<R>) -> Vec<&'a R> {
    if filters.is_empty() {
        return rows.iter().collect();
    }
    rows.iter().filter(|row| filters.fits(row)).collect()
}
