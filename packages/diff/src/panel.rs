//! Panel element tracking on top of [`diff`](crate::diff).
//!
//! A [`Panel`] remembers which elements it has rendered and what visual
//! state each was last sent to. Each call to [`Panel::render`] diffs the
//! new data against the last snapshot and returns a [`Frame`]:
//!
//! - entering data gets a fresh [`ElementId`] and transitions from the
//!   adapter's neutral state to its target;
//! - persisting data keeps its [`ElementId`] and transitions from the
//!   current state to the new target;
//! - exiting data transitions from its current state to a collapsed state
//!   and is then removed.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;

use crate::diff;

/// Identity of a rendered element. Stable for as long as its key stays in
/// the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Which side of the diff a transition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// New element.
    Enter,
    /// Existing element moving to a new target.
    Update,
    /// Element leaving; removed once the transition ends.
    Exit,
}

/// Animation timing for one transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    /// Wait before starting.
    pub delay: Duration,
    /// Length of the transition.
    pub duration: Duration,
}

impl Timing {
    /// Timing with no delay.
    #[must_use]
    pub const fn millis(duration: u64) -> Self {
        Self {
            delay: Duration::ZERO,
            duration: Duration::from_millis(duration),
        }
    }

    /// Adds a delay of `step` milliseconds per `index`.
    #[must_use]
    pub const fn staggered(self, step: u64, index: usize) -> Self {
        Self {
            delay: Duration::from_millis(step * index as u64),
            duration: self.duration,
        }
    }
}

/// Presentation rules for one kind of panel.
///
/// The engine never inspects data or visuals beyond what the adapter
/// returns; everything panel-specific lives here.
pub trait PanelAdapter {
    /// One data point (a bar, a slice, a circle, a line point).
    type Datum: Clone;
    /// Stable domain identifier of a datum.
    type Key: Ord + Clone + Debug;
    /// Rendered state of one element.
    type Visual: Clone + PartialEq + Debug;

    /// Panel name, for logging.
    fn name(&self) -> &'static str;

    /// Key of a datum.
    fn key(&self, datum: &Self::Datum) -> Self::Key;

    /// Visual state the element should end up in.
    fn target(&self, datum: &Self::Datum, index: usize) -> Self::Visual;

    /// Starting state for an entering element.
    fn neutral(&self, datum: &Self::Datum, index: usize) -> Self::Visual;

    /// End state for an exiting element, derived from where it is now.
    fn collapse(&self, current: &Self::Visual) -> Self::Visual;

    /// Timing of a transition. `index` is the element's position in the
    /// snapshot it belongs to.
    fn timing(&self, phase: Phase, index: usize) -> Timing {
        let _ = (phase, index);
        Timing::default()
    }
}

/// One element's transition in a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<K, V> {
    /// Element identity.
    pub element: ElementId,
    /// Data key bound to the element.
    pub key: K,
    /// Diff class.
    pub phase: Phase,
    /// State to start from.
    pub from: V,
    /// State to end in.
    pub to: V,
    /// Animation timing.
    pub timing: Timing,
}

impl<K, V> Transition<K, V> {
    /// Whether the element should be discarded once the transition ends.
    #[must_use]
    pub fn remove_after(&self) -> bool {
        self.phase == Phase::Exit
    }
}

/// Everything a surface needs to animate one render of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<K, V> {
    /// Panel name.
    pub panel: &'static str,
    /// Enter and update transitions in data order, then exit transitions
    /// in previous order.
    pub transitions: Vec<Transition<K, V>>,
}

impl<K, V> Frame<K, V> {
    /// Transitions of a single phase.
    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &Transition<K, V>> {
        self.transitions.iter().filter(move |t| t.phase == phase)
    }

    /// Number of transitions of a single phase.
    #[must_use]
    pub fn count(&self, phase: Phase) -> usize {
        self.phase(phase).count()
    }

    /// Whether the frame changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Element<V> {
    id: ElementId,
    visual: V,
}

/// Rendered state of one panel across snapshots.
#[derive(Debug)]
pub struct Panel<A: PanelAdapter> {
    data: Vec<A::Datum>,
    elements: BTreeMap<A::Key, Element<A::Visual>>,
    next_id: u64,
}

impl<A: PanelAdapter> Default for Panel<A> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            elements: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<A: PanelAdapter> Panel<A> {
    /// An empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Renders a new snapshot and returns the transitions to animate.
    pub fn render(&mut self, adapter: &A, data: &[A::Datum]) -> Frame<A::Key, A::Visual> {
        let previous = std::mem::take(&mut self.data);
        let mut transitions = Vec::with_capacity(data.len());

        let result = diff(&previous, data, |d| adapter.key(d));

        let mut updates = Vec::with_capacity(data.len());
        for (index, datum) in &result.entering {
            updates.push((*index, Phase::Enter, *datum));
        }
        for persisting in &result.persisting {
            updates.push((persisting.next_index, Phase::Update, persisting.next));
        }
        updates.sort_by_key(|(index, _, _)| *index);

        let mut exits = Vec::with_capacity(result.exiting.len());
        for (index, datum) in &result.exiting {
            let key = adapter.key(datum);
            if let Some(element) = self.elements.remove(&key) {
                exits.push(Transition {
                    element: element.id,
                    to: adapter.collapse(&element.visual),
                    from: element.visual,
                    key,
                    phase: Phase::Exit,
                    timing: adapter.timing(Phase::Exit, *index),
                });
            }
        }

        for (index, phase, datum) in updates {
            let key = adapter.key(datum);
            let to = adapter.target(datum, index);
            let existing = match phase {
                Phase::Update => self.elements.get(&key).map(|e| (e.id, e.visual.clone())),
                Phase::Enter | Phase::Exit => None,
            };
            let (element, from, phase) = match existing {
                Some((id, visual)) => (id, visual, Phase::Update),
                None => (self.allocate(), adapter.neutral(datum, index), Phase::Enter),
            };

            self.elements.insert(
                key.clone(),
                Element {
                    id: element,
                    visual: to.clone(),
                },
            );
            transitions.push(Transition {
                element,
                key,
                phase,
                from,
                to,
                timing: adapter.timing(phase, index),
            });
        }
        transitions.extend(exits);

        self.data = data.to_vec();

        let frame = Frame {
            panel: adapter.name(),
            transitions,
        };
        log::trace!(
            "{}: {} entering, {} updating, {} exiting",
            frame.panel,
            frame.count(Phase::Enter),
            frame.count(Phase::Update),
            frame.count(Phase::Exit)
        );
        frame
    }

    /// Sends every element to its collapsed state and forgets it.
    pub fn clear(&mut self, adapter: &A) -> Frame<A::Key, A::Visual> {
        self.render(adapter, &[])
    }

    /// Current elements in data order.
    pub fn elements(&self, adapter: &A) -> Vec<(ElementId, A::Key, A::Visual)> {
        self.data
            .iter()
            .filter_map(|datum| {
                let key = adapter.key(datum);
                let element = self.elements.get(&key)?;
                Some((element.id, key, element.visual.clone()))
            })
            .collect()
    }

    /// Element currently bound to `key`.
    pub fn element(&self, key: &A::Key) -> Option<ElementId> {
        self.elements.get(key).map(|e| e.id)
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bars whose height is the value and whose x is the index.
    struct Bars;

    #[derive(Debug, Clone, PartialEq)]
    struct Bar {
        x: usize,
        height: u32,
    }

    impl PanelAdapter for Bars {
        type Datum = (&'static str, u32);
        type Key = &'static str;
        type Visual = Bar;

        fn name(&self) -> &'static str {
            "bars"
        }

        fn key(&self, datum: &Self::Datum) -> Self::Key {
            datum.0
        }

        fn target(&self, datum: &Self::Datum, index: usize) -> Bar {
            Bar {
                x: index,
                height: datum.1,
            }
        }

        fn neutral(&self, _datum: &Self::Datum, index: usize) -> Bar {
            Bar {
                x: index,
                height: 0,
            }
        }

        fn collapse(&self, current: &Bar) -> Bar {
            Bar {
                x: current.x,
                height: 0,
            }
        }

        fn timing(&self, phase: Phase, index: usize) -> Timing {
            match phase {
                Phase::Enter => Timing::millis(600).staggered(40, index),
                Phase::Update => Timing::millis(600),
                Phase::Exit => Timing::millis(400),
            }
        }
    }

    #[test]
    fn first_render_enters_from_neutral() {
        let mut panel = Panel::new();
        let frame = panel.render(&Bars, &[("a", 10), ("b", 20)]);

        assert_eq!(frame.count(Phase::Enter), 2);
        let b = &frame.transitions[1];
        assert_eq!(b.from, Bar { x: 1, height: 0 });
        assert_eq!(b.to, Bar { x: 1, height: 20 });
        assert_eq!(b.timing.delay, Duration::from_millis(40));
        assert_eq!(panel.len(), 2);
    }

    #[test]
    fn rerender_with_same_keys_only_updates() {
        let mut panel = Panel::new();
        panel.render(&Bars, &[("a", 10), ("b", 20)]);
        let frame = panel.render(&Bars, &[("a", 15), ("b", 25)]);

        assert_eq!(frame.count(Phase::Enter), 0);
        assert_eq!(frame.count(Phase::Exit), 0);
        assert_eq!(frame.count(Phase::Update), 2);
        assert_eq!(frame.transitions[0].from, Bar { x: 0, height: 10 });
        assert_eq!(frame.transitions[0].to, Bar { x: 0, height: 15 });
    }

    #[test]
    fn reorder_preserves_element_identity() {
        let mut panel = Panel::new();
        panel.render(&Bars, &[("a", 10), ("b", 20)]);
        let a = panel.element(&"a").unwrap();
        let b = panel.element(&"b").unwrap();

        let frame = panel.render(&Bars, &[("b", 20), ("a", 10)]);

        assert_eq!(frame.transitions[0].key, "b");
        assert_eq!(frame.transitions[0].element, b);
        assert_eq!(frame.transitions[0].to.x, 0);
        assert_eq!(frame.transitions[1].element, a);
        assert_eq!(frame.transitions[1].from.x, 0);
        assert_eq!(frame.transitions[1].to.x, 1);
    }

    #[test]
    fn exiting_collapses_from_current_state_then_removes() {
        let mut panel = Panel::new();
        panel.render(&Bars, &[("a", 10), ("b", 20)]);
        let b = panel.element(&"b").unwrap();

        let frame = panel.render(&Bars, &[("a", 10), ("c", 5)]);

        let exit: Vec<_> = frame.phase(Phase::Exit).collect();
        assert_eq!(exit.len(), 1);
        assert_eq!(exit[0].element, b);
        assert_eq!(exit[0].from, Bar { x: 1, height: 20 });
        assert_eq!(exit[0].to, Bar { x: 1, height: 0 });
        assert!(exit[0].remove_after());
        assert_eq!(exit[0].timing, Timing::millis(400));

        assert!(panel.element(&"b").is_none());
        let c = panel.element(&"c").unwrap();
        assert_ne!(c, b, "ids are never reused");
    }

    #[test]
    fn clear_exits_everything() {
        let mut panel = Panel::new();
        panel.render(&Bars, &[("a", 10), ("b", 20)]);

        let frame = panel.clear(&Bars);

        assert_eq!(frame.count(Phase::Exit), 2);
        assert!(panel.is_empty());
        assert!(panel.clear(&Bars).is_empty());
    }

    #[test]
    fn reentering_key_gets_new_identity() {
        let mut panel = Panel::new();
        panel.render(&Bars, &[("a", 10)]);
        let first = panel.element(&"a").unwrap();
        panel.clear(&Bars);
        panel.render(&Bars, &[("a", 10)]);
        assert_ne!(panel.element(&"a").unwrap(), first);
    }

    #[test]
    fn elements_follow_data_order() {
        let mut panel = Panel::new();
        panel.render(&Bars, &[("b", 1), ("a", 2)]);
        let keys: Vec<_> = panel.elements(&Bars).into_iter().map(|(_, k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
