//! Priority-ordered component registration
//!
//! Handlers and processors are collected as `(component, priority)` pairs
//! while the logger is assembled, then sorted once. Lower priorities run
//! first; equal priorities keep their registration order.

/// A component bound to its execution priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered<T> {
    pub component: T,
    pub priority: i64,
}

/// Ordered collection of components awaiting assembly.
///
/// # Example
///
/// ```
/// use channel_logger::registry::PriorityRegistry;
///
/// let mut registry = PriorityRegistry::new();
/// registry.register("late", 100);
/// registry.register("early", 10);
/// registry.register_keyed("20", "middle");
/// registry.register_keyed("mailer", "default");
///
/// assert_eq!(registry.into_sorted(), vec!["default", "early", "middle", "late"]);
/// ```
#[derive(Debug, Clone)]
pub struct PriorityRegistry<T> {
    entries: Vec<Registered<T>>,
}

impl<T> PriorityRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, component: T, priority: i64) {
        self.entries.push(Registered {
            component,
            priority,
        });
    }

    /// Register under a configuration key; a numeric key is the priority.
    pub fn register_keyed(&mut self, key: &str, component: T) {
        self.register(component, parse_priority(key));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in execution order, with their priorities
    pub fn into_sorted_entries(mut self) -> Vec<Registered<T>> {
        // `sort_by_key` is stable
        self.entries.sort_by_key(|entry| entry.priority);
        self.entries
    }

    /// Components in execution order
    pub fn into_sorted(self) -> Vec<T> {
        self.into_sorted_entries()
            .into_iter()
            .map(|entry| entry.component)
            .collect()
    }
}

impl<T> Default for PriorityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(T, i64)> for PriorityRegistry<T> {
    fn from_iter<I: IntoIterator<Item = (T, i64)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (component, priority) in iter {
            registry.register(component, priority);
        }
        registry
    }
}

/// Priority encoded in a configuration key.
///
/// Integer keys are taken as-is, fractional ones are truncated, and any
/// other key means priority 0.
pub fn parse_priority(key: &str) -> i64 {
    let key = key.trim();
    if let Ok(priority) = key.parse::<i64>() {
        return priority;
    }
    match key.parse::<f64>() {
        Ok(priority) if priority.is_finite() => priority as i64,
        _ => 0,
    }
}
