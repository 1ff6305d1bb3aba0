//! Cart badge
//!
//! The item counter shown in every page header. It is driven by cart store
//! notifications so it always reflects the persisted cart.

use std::{cell::Cell, fmt, rc::Rc};

use crate::items::LineItem;

/// Sum of quantities across `items`.
pub fn total_quantity(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity())).sum()
}

/// What the badge shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeState {
    /// Empty cart, badge is not displayed
    #[default]
    Hidden,

    /// Total number of units in the cart
    Count(u64),
}

impl BadgeState {
    /// Badge state for a total quantity.
    pub fn from_total(total: u64) -> Self {
        if total == 0 {
            Self::Hidden
        } else {
            Self::Count(total)
        }
    }

    /// Badge state for a list of items.
    pub fn from_items(items: &[LineItem]) -> Self {
        Self::from_total(total_quantity(items))
    }

    /// Whether the badge is displayed.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Count(_))
    }

    /// The count shown, zero when hidden.
    pub fn count(self) -> u64 {
        match self {
            Self::Hidden => 0,
            Self::Count(count) => count,
        }
    }
}

impl fmt::Display for BadgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => Ok(()),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

/// A place the badge is drawn.
pub trait BadgeSink {
    /// Show `state`.
    fn display(&mut self, state: BadgeState);
}

/// Badge state shared between the store observer and whoever draws it.
#[derive(Debug, Clone, Default)]
pub struct SharedBadge {
    state: Rc<Cell<BadgeState>>,
}

impl SharedBadge {
    /// New hidden badge.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently displayed state.
    pub fn state(&self) -> BadgeState {
        self.state.get()
    }
}

impl BadgeSink for SharedBadge {
    fn display(&mut self, state: BadgeState) {
        self.state.set(state);
    }
}

/// Fans badge updates out to every registered sink.
#[derive(Default)]
pub struct CartBadge {
    sinks: Vec<Box<dyn BadgeSink>>,
    state: BadgeState,
}

impl fmt::Debug for CartBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartBadge")
            .field("sinks", &self.sinks.len())
            .field("state", &self.state)
            .finish()
    }
}

impl CartBadge {
    /// Badge with no sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the badge in `sink` as well.
    #[must_use]
    pub fn with_sink(mut self, sink: impl BadgeSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Current state.
    pub fn state(&self) -> BadgeState {
        self.state
    }

    /// Recompute from `items` and redraw every sink.
    pub fn refresh(&mut self, items: &[LineItem]) -> BadgeState {
        self.state = BadgeState::from_items(items);

        for sink in &mut self.sinks {
            sink.display(self.state);
        }

        self.state
    }

    /// Turn the badge into a cart store observer.
    pub fn into_observer(mut self) -> impl FnMut(&[LineItem]) + 'static {
        move |items| {
            self.refresh(items);
        }
    }
}
