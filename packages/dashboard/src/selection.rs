//! Selection state machine.
//!
//! [`reduce`] is the only way the selection changes. It is a pure function
//! from the current state and an event to the next state plus the list of
//! [`Effect`]s the dashboard must carry out.

use std::sync::Arc;

use city_compare_city_models::{City, Slot};

/// The 0, 1, or 2 active cities, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Empty,
    /// One city, in the first slot.
    One(Arc<City>),
    /// Two distinct cities; the first selected is in the first slot.
    Two(Arc<City>, Arc<City>),
}

impl SelectionState {
    /// Number of selected cities.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    /// Whether nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// City in a slot.
    #[must_use]
    pub const fn slot(&self, slot: Slot) -> Option<&Arc<City>> {
        match (self, slot) {
            (Self::One(a) | Self::Two(a, _), Slot::First) => Some(a),
            (Self::Two(_, b), Slot::Second) => Some(b),
            _ => None,
        }
    }

    /// Both cities, when two are selected.
    #[must_use]
    pub const fn pair(&self) -> Option<(&Arc<City>, &Arc<City>)> {
        match self {
            Self::Two(a, b) => Some((a, b)),
            _ => None,
        }
    }

    /// Ids of the selected cities, in slot order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        Slot::ALL
            .iter()
            .filter_map(|&slot| self.slot(slot))
            .map(|c| c.id.as_str())
            .collect()
    }
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// A city was clicked on the map or picked from search results.
    Select(Arc<City>),
    /// The selection was reset.
    Clear,
    /// A region was picked for the ranking panel.
    SelectRegion(String),
}

/// Work the dashboard must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Redraw both city cards.
    RefreshCards,
    /// Re-rank the top cities of a region.
    RankRegion(String),
    /// Compute stats for the pair and render every comparison panel.
    ComparePair,
    /// Start the weather join for the pair.
    FetchWeather,
    /// Hide every panel that depends on the pair and drop any pending
    /// weather.
    ClearComparison,
}

/// Applies an event to a state.
///
/// Selecting a city while two are already selected clears both and starts
/// over with the new city. Selecting the sole selected city again changes
/// nothing.
#[must_use]
pub fn reduce(state: &SelectionState, event: SelectionEvent) -> (SelectionState, Vec<Effect>) {
    match event {
        SelectionEvent::Select(city) => select(state, city),
        SelectionEvent::Clear => match state {
            SelectionState::Empty => (SelectionState::Empty, vec![]),
            SelectionState::One(_) => (SelectionState::Empty, vec![Effect::RefreshCards]),
            SelectionState::Two(..) => (
                SelectionState::Empty,
                vec![Effect::ClearComparison, Effect::RefreshCards],
            ),
        },
        SelectionEvent::SelectRegion(code) => (state.clone(), vec![Effect::RankRegion(code)]),
    }
}

fn select(state: &SelectionState, city: Arc<City>) -> (SelectionState, Vec<Effect>) {
    let region = city.region_code.clone();

    match state {
        SelectionState::Empty => (
            SelectionState::One(city),
            vec![Effect::RefreshCards, Effect::RankRegion(region)],
        ),
        SelectionState::One(current) if current.id == city.id => {
            log::debug!("City {} is already selected; ignoring", city.id);
            (state.clone(), vec![])
        }
        SelectionState::One(current) => (
            SelectionState::Two(Arc::clone(current), city),
            vec![
                Effect::RefreshCards,
                Effect::RankRegion(region),
                Effect::ComparePair,
                Effect::FetchWeather,
            ],
        ),
        SelectionState::Two(..) => (
            SelectionState::One(city),
            vec![
                Effect::ClearComparison,
                Effect::RefreshCards,
                Effect::RankRegion(region),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::city;

    fn run(events: impl IntoIterator<Item = SelectionEvent>) -> (SelectionState, Vec<Effect>) {
        let mut state = SelectionState::Empty;
        let mut last = vec![];
        for event in events {
            let (next, effects) = reduce(&state, event);
            state = next;
            last = effects;
        }
        (state, last)
    }

    #[test]
    fn first_select_fills_first_slot() {
        let paris = city("75056", "Paris", "11", 2_145_906);
        let (state, effects) = run([SelectionEvent::Select(paris)]);
        assert_eq!(state.ids(), ["75056"]);
        assert_eq!(
            effects,
            [Effect::RefreshCards, Effect::RankRegion("11".to_string())]
        );
    }

    #[test]
    fn second_distinct_select_compares() {
        let (state, effects) = run([
            SelectionEvent::Select(city("75056", "Paris", "11", 2_145_906)),
            SelectionEvent::Select(city("69123", "Lyon", "84", 522_969)),
        ]);
        assert_eq!(state.ids(), ["75056", "69123"]);
        assert_eq!(
            state.slot(Slot::Second).map(|c| c.name.as_str()),
            Some("Lyon")
        );
        assert_eq!(
            effects,
            [
                Effect::RefreshCards,
                Effect::RankRegion("84".to_string()),
                Effect::ComparePair,
                Effect::FetchWeather,
            ]
        );
    }

    #[test]
    fn third_select_resets_instead_of_evicting() {
        let (state, effects) = run([
            SelectionEvent::Select(city("A", "A", "11", 30_000)),
            SelectionEvent::Select(city("B", "B", "11", 30_000)),
            SelectionEvent::Select(city("C", "C", "24", 30_000)),
        ]);
        assert_eq!(state.ids(), ["C"]);
        assert!(matches!(state, SelectionState::One(_)));
        assert_eq!(effects[0], Effect::ClearComparison);
        assert!(!effects.contains(&Effect::FetchWeather));
    }

    #[test]
    fn reselecting_sole_city_is_a_no_op() {
        let paris = city("75056", "Paris", "11", 2_145_906);
        let (state, effects) = run([
            SelectionEvent::Select(paris.clone()),
            SelectionEvent::Select(paris),
        ]);
        assert_eq!(state.len(), 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn clear_from_each_state() {
        let paris = city("75056", "Paris", "11", 2_145_906);
        let lyon = city("69123", "Lyon", "84", 522_969);

        assert_eq!(
            reduce(&SelectionState::Empty, SelectionEvent::Clear),
            (SelectionState::Empty, vec![])
        );
        assert_eq!(
            reduce(&SelectionState::One(paris.clone()), SelectionEvent::Clear),
            (SelectionState::Empty, vec![Effect::RefreshCards])
        );
        assert_eq!(
            reduce(&SelectionState::Two(paris, lyon), SelectionEvent::Clear),
            (
                SelectionState::Empty,
                vec![Effect::ClearComparison, Effect::RefreshCards]
            )
        );
    }

    #[test]
    fn region_pick_leaves_selection_alone() {
        let paris = city("75056", "Paris", "11", 2_145_906);
        let state = SelectionState::One(paris);
        let (next, effects) = reduce(&state, SelectionEvent::SelectRegion("84".to_string()));
        assert_eq!(next, state);
        assert_eq!(effects, [Effect::RankRegion("84".to_string())]);
    }

    #[test]
    fn length_never_exceeds_two() {
        let mut state = SelectionState::Empty;
        for i in 0..10 {
            let id = format!("{i:05}");
            state = reduce(&state, SelectionEvent::Select(city(&id, &id, "11", 30_000))).0;
            assert!(state.len() <= 2);
        }
    }
}
