//! Selection
//!
//! Which cart lines are included in the order on the cart page. Lines are
//! tracked by product id, and anything not explicitly excluded is selected,
//! so newly added lines start out included.

use rustc_hash::FxHashSet;

use crate::items::LineItem;

/// State of the master select-all control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// Every line is selected
    All,

    /// No line is selected, or there are no lines
    None,

    /// Some but not all lines are selected
    Partial,
}

impl SelectAllState {
    /// Whether the control shows as checked.
    pub fn is_checked(self) -> bool {
        self == Self::All
    }

    /// Whether the control shows as indeterminate.
    pub fn is_indeterminate(self) -> bool {
        self == Self::Partial
    }
}

/// Per-line inclusion flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    excluded: FxHashSet<String>,
}

impl Selection {
    /// Everything selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the line for `id` is included.
    pub fn is_selected(&self, id: &str) -> bool {
        !self.excluded.contains(id)
    }

    /// Include or exclude the line for `id`.
    pub fn set(&mut self, id: &str, selected: bool) {
        if selected {
            self.excluded.remove(id);
        } else {
            self.excluded.insert(id.to_string());
        }
    }

    /// Flip the line for `id`, returning its new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let selected = !self.is_selected(id);

        self.set(id, selected);

        selected
    }

    /// Force every line in `items` to the same state.
    pub fn set_all(&mut self, items: &[LineItem], selected: bool) {
        if selected {
            self.excluded.clear();
        } else {
            self.excluded = items.iter().map(|item| item.id.clone()).collect();
        }
    }

    /// Forget lines that are no longer in `items`.
    pub fn retain(&mut self, items: &[LineItem]) {
        self.excluded
            .retain(|id| items.iter().any(|item| &item.id == id));
    }

    /// Master control state for `items`.
    pub fn state(&self, items: &[LineItem]) -> SelectAllState {
        let selected = items
            .iter()
            .filter(|item| self.is_selected(&item.id))
            .count();

        match selected {
            0 => SelectAllState::None,
            n if n == items.len() => SelectAllState::All,
            _ => SelectAllState::Partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn items(ids: &[&str]) -> TestResult<Vec<LineItem>> {
        ids.iter()
            .map(|id| {
                LineItem::new(*id, *id, Decimal::ONE, None, 1).ok_or_else(|| "invalid item".into())
            })
            .collect()
    }

    #[test]
    fn lines_start_selected() -> TestResult {
        let items = items(&["a", "b"])?;
        let selection = Selection::new();

        assert!(selection.is_selected("a"));
        assert_eq!(selection.state(&items), SelectAllState::All);

        Ok(())
    }

    #[test]
    fn toggling_one_line_is_partial() -> TestResult {
        let items = items(&["a", "b"])?;
        let mut selection = Selection::new();

        assert!(!selection.toggle("a"));

        let state = selection.state(&items);

        assert_eq!(state, SelectAllState::Partial);
        assert!(state.is_indeterminate());
        assert!(!state.is_checked());

        Ok(())
    }

    #[test]
    fn set_all_forces_every_line() -> TestResult {
        let items = items(&["a", "b", "c"])?;
        let mut selection = Selection::new();

        selection.toggle("b");
        selection.set_all(&items, false);

        assert_eq!(selection.state(&items), SelectAllState::None);

        selection.set_all(&items, true);

        assert_eq!(selection.state(&items), SelectAllState::All);

        Ok(())
    }

    #[test]
    fn retain_drops_removed_lines() -> TestResult {
        let all = items(&["a", "b"])?;
        let remaining = items(&["b"])?;
        let mut selection = Selection::new();

        selection.set_all(&all, false);
        selection.retain(&remaining);

        assert!(selection.is_selected("a"));
        assert!(!selection.is_selected("b"));

        Ok(())
    }

    #[test]
    fn empty_cart_is_none() {
        assert_eq!(Selection::new().state(&[]), SelectAllState::None);
    }
}
