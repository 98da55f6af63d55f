//! Container queries: style variants selected by an element's rendered width.
//!
//! Unlike breakpoints, which follow the viewport, a container query reacts
//! to the measured width of the element itself. The host rendering layer
//! watches nodes through a [`SizeObserver`] and feeds measured widths back
//! into [`ContainerQueryEngine::on_resize`].
//!
//! ## Matching
//!
//! A query matches when `width >= min_width` (if set) and
//! `width <= max_width` (if set). Queries are walked in list order and the
//! **last** matching one wins, so authors control precedence through order
//! alone. When nothing matches, no variant applies.
//!
//! ## Notifications
//!
//! Listeners receive `(element id, matched styles or None)` only when the
//! selected query changes. Repeated measurements that keep the same
//! selection are suppressed.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use cascade::style_map;
//! use studio::container_query::{ContainerQuery, ContainerQueryEngine, SizeObserver};
//!
//! struct Host;
//! impl SizeObserver for Host {
//!     type Node = ();
//!     fn observe(&mut self, _id: &str, _node: &()) {}
//!     fn unobserve(&mut self, _node: &()) {}
//! }
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//!
//! let mut engine = ContainerQueryEngine::new(Host);
//! engine.set_queries("card", vec![
//!     ContainerQuery::max_width(300.0, style_map! { "flexDirection" => "column" }),
//!     ContainerQuery::min_width(200.0, style_map! { "flexDirection" => "row" }),
//! ]);
//! engine.observe("card", &(), Some(Box::new(move |_id: &str, styles: Option<&cascade::StyleMap>| {
//!     sink.lock().unwrap().push(styles.map(|s| s.to_string()));
//! })));
//!
//! engine.on_resize("card", 250.0);
//! engine.on_resize("card", 260.0);
//!
//! let seen = seen.lock().unwrap();
//! assert_eq!(seen.len(), 1);
//! assert_eq!(seen[0].as_deref(), Some("flexDirection: row"));
//! ```

use std::collections::HashMap;

use cascade::{StyleMap, style_map, types::ElementId};
use tokio::sync::mpsc;

/// Receives `(element id, matched styles)` on every selection change.
pub type QueryCallback = Box<dyn FnMut(&str, Option<&StyleMap>) + Send>;

/// The host's size-measurement mechanism.
///
/// One observer is shared by every watched node; measurements come back
/// keyed by element id through [`ContainerQueryEngine::on_resize`].
pub trait SizeObserver: Send {
    /// The host's handle to a rendered node.
    type Node;

    fn observe(&mut self, element_id: &str, node: &Self::Node);
    fn unobserve(&mut self, node: &Self::Node);
}

/// Stand-in observer for contexts that cannot measure anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl SizeObserver for Headless {
    type Node = ();

    fn observe(&mut self, _element_id: &str, _node: &()) {}
    fn unobserve(&mut self, _node: &()) {}
}

/// One width-ranged style variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerQuery {
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub styles: StyleMap,
}

impl ContainerQuery {
    pub fn new(styles: StyleMap) -> Self {
        Self {
            styles,
            ..Default::default()
        }
    }

    /// Matches widths up to and including `max`.
    pub fn max_width(max: f64, styles: StyleMap) -> Self {
        Self::new(styles).with_max_width(max)
    }

    /// Matches widths from `min` up.
    pub fn min_width(min: f64, styles: StyleMap) -> Self {
        Self::new(styles).with_min_width(min)
    }

    pub fn with_min_width(mut self, min: f64) -> Self {
        self.min_width = Some(min);
        self
    }

    pub fn with_max_width(mut self, max: f64) -> Self {
        self.max_width = Some(max);
        self
    }

    pub fn matches(&self, width: f64) -> bool {
        self.min_width.is_none_or(|min| width >= min)
            && self.max_width.is_none_or(|max| width <= max)
    }
}

/// Index of the last query in `queries` that matches `width`.
pub fn select_query(queries: &[ContainerQuery], width: f64) -> Option<usize> {
    queries
        .iter()
        .enumerate()
        .filter(|(_, query)| query.matches(width))
        .map(|(index, _)| index)
        .last()
}

/// The intrinsic "card" rules: stacked below 300px, side by side above.
pub fn card_queries() -> Vec<ContainerQuery> {
    vec![
        ContainerQuery::max_width(
            300.0,
            style_map! { "flexDirection" => "column", "fontSize" => "14px" },
        ),
        ContainerQuery::min_width(
            301.0,
            style_map! { "flexDirection" => "row", "fontSize" => "16px" },
        ),
    ]
}

/// A change of matched variant, as delivered to channel subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    pub element_id: ElementId,
    /// `None` when no query matches any more.
    pub styles: Option<StyleMap>,
}

/// A measured width reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub element_id: ElementId,
    pub width: f64,
}

impl Measurement {
    pub fn new(element_id: impl Into<ElementId>, width: f64) -> Self {
        Self {
            element_id: element_id.into(),
            width,
        }
    }
}

enum Listener {
    Callback(QueryCallback),
    Channel(mpsc::UnboundedSender<QueryMatch>),
}

impl Listener {
    /// Delivers one notification. Returns false once a channel has closed.
    fn notify(&mut self, element_id: &str, styles: Option<&StyleMap>) -> bool {
        match self {
            Listener::Callback(callback) => {
                callback(element_id, styles);
                true
            }
            Listener::Channel(sender) => sender
                .send(QueryMatch {
                    element_id: element_id.to_string(),
                    styles: styles.cloned(),
                })
                .is_ok(),
        }
    }
}

/// Everything the engine remembers about one element.
#[derive(Default)]
struct Container {
    /// `None` until queries are registered; measurements are ignored until then.
    queries: Option<Vec<ContainerQuery>>,
    /// Outer `None`: never evaluated. Inner `None`: no query matched.
    last_match: Option<Option<usize>>,
    listeners: Vec<Listener>,
}

/// Tracks container queries for every observed element.
///
/// Constructed and owned by the editor's composition root; separate engines
/// share nothing.
pub struct ContainerQueryEngine<O: SizeObserver = Headless> {
    observer: Option<O>,
    containers: HashMap<ElementId, Container>,
}

impl ContainerQueryEngine<Headless> {
    /// An engine without size observation: [`observe`](Self::observe) does nothing.
    pub fn headless() -> Self {
        Self {
            observer: None,
            containers: HashMap::new(),
        }
    }
}

impl Default for ContainerQueryEngine<Headless> {
    fn default() -> Self {
        Self::headless()
    }
}

impl<O: SizeObserver> ContainerQueryEngine<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer: Some(observer),
            containers: HashMap::new(),
        }
    }

    /// Whether this engine can watch nodes at all.
    pub fn can_observe(&self) -> bool {
        self.observer.is_some()
    }

    /// Registers the ordered query list for an element, replacing any
    /// previous one. A different list clears the match memory so the next
    /// measurement notifies again.
    pub fn set_queries(&mut self, element_id: &str, queries: Vec<ContainerQuery>) {
        let container = self.containers.entry(element_id.to_string()).or_default();
        if container.queries.as_ref() != Some(&queries) {
            container.last_match = None;
        }
        container.queries = Some(queries);
    }

    pub fn queries(&self, element_id: &str) -> Option<&[ContainerQuery]> {
        self.containers
            .get(element_id)
            .and_then(|c| c.queries.as_deref())
    }

    /// Starts watching `node` for `element_id` and registers `callback`.
    ///
    /// Without a size observer this is a no-op and the callback is dropped.
    /// Callbacks are never invoked synchronously from here.
    pub fn observe(&mut self, element_id: &str, node: &O::Node, callback: Option<QueryCallback>) {
        let Some(observer) = self.observer.as_mut() else {
            log::debug!("No size observer, not observing '{}'", element_id);
            return;
        };
        observer.observe(element_id, node);

        let container = self.containers.entry(element_id.to_string()).or_default();
        if let Some(callback) = callback {
            container.listeners.push(Listener::Callback(callback));
        }
    }

    /// Subscribes to match changes for an element through a channel.
    ///
    /// The subscription lasts until the receiver is dropped or the element
    /// is unobserved.
    pub fn subscribe(&mut self, element_id: &str) -> mpsc::UnboundedReceiver<QueryMatch> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.containers
            .entry(element_id.to_string())
            .or_default()
            .listeners
            .push(Listener::Channel(sender));
        receiver
    }

    /// Stops watching `node` and discards everything known about the element.
    ///
    /// Unknown ids are fine.
    pub fn unobserve(&mut self, element_id: &str, node: &O::Node) {
        if let Some(observer) = self.observer.as_mut() {
            observer.unobserve(node);
        }
        self.forget(element_id);
    }

    /// Discards per-element state without talking to the observer, for
    /// elements whose node is already gone.
    pub fn forget(&mut self, element_id: &str) {
        if self.containers.remove(element_id).is_some() {
            log::debug!("Released container state for '{}'", element_id);
        }
    }

    /// Number of elements with state in the engine.
    pub fn tracked(&self) -> usize {
        self.containers.len()
    }

    /// Currently selected query index for an element, if evaluated and matched.
    pub fn current_match(&self, element_id: &str) -> Option<usize> {
        self.containers
            .get(element_id)
            .and_then(|c| c.last_match)
            .flatten()
    }

    /// Evaluates a new width for an element.
    ///
    /// Returns true if the selected query changed and listeners were told.
    pub fn on_resize(&mut self, element_id: &str, width: f64) -> bool {
        let Some(container) = self.containers.get_mut(element_id) else {
            return false;
        };
        let Some(queries) = container.queries.as_ref() else {
            return false;
        };

        let selected = select_query(queries, width);
        log::trace!(
            "CONTAINER: '{}' width={} -> {:?}",
            element_id,
            width,
            selected
        );

        if container.last_match == Some(selected) {
            return false;
        }
        container.last_match = Some(selected);

        let styles = selected.and_then(|index| queries.get(index));
        let styles = styles.map(|query| &query.styles);
        container
            .listeners
            .retain_mut(|listener| listener.notify(element_id, styles));
        true
    }

    /// Evaluates a batch of measurements. Returns how many notified.
    pub fn on_measurements(&mut self, batch: impl IntoIterator<Item = Measurement>) -> usize {
        batch
            .into_iter()
            .filter(|m| self.on_resize(&m.element_id, m.width))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_match_wins() {
        let queries = vec![
            ContainerQuery::max_width(300.0, style_map! { "a" => 1 }),
            ContainerQuery::min_width(200.0, style_map! { "b" => 1 }),
        ];

        assert_eq!(select_query(&queries, 250.0), Some(1));
        assert_eq!(select_query(&queries, 50.0), Some(0));
        assert_eq!(select_query(&queries, 1000.0), Some(1));
    }

    #[test]
    fn bounds_are_inclusive() {
        let query = ContainerQuery::new(StyleMap::new())
            .with_min_width(100.0)
            .with_max_width(200.0);

        assert!(query.matches(100.0));
        assert!(query.matches(200.0));
        assert!(!query.matches(200.5));
        assert!(!query.matches(99.0));
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(select_query(&card_queries(), 300.5), None);
        assert_eq!(select_query(&[], 10.0), None);
    }

    #[test]
    fn headless_engine_ignores_observe() {
        let mut engine = ContainerQueryEngine::headless();
        engine.set_queries("card", card_queries());
        engine.observe(
            "card",
            &(),
            Some(Box::new(|_: &str, _: Option<&StyleMap>| {
                panic!("must not be called")
            })),
        );

        assert!(!engine.can_observe());
        // The first evaluation records a match but there is nobody to tell.
        assert!(engine.on_resize("card", 120.0));
        assert_eq!(engine.current_match("card"), Some(0));
    }
}
