//! Option sheet lifecycle state machine.

use serde::{Deserialize, Serialize};

/// Which selector dropdown is expanded while the sheet is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SelectorState {
    /// Neither dropdown is expanded.
    #[default]
    Idle,
    /// First-level dropdown is expanded.
    FirstOpen,
    /// Second-level dropdown is expanded.
    SecondOpen,
}

impl SelectorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorState::Idle => "idle",
            SelectorState::FirstOpen => "first_open",
            SelectorState::SecondOpen => "second_open",
        }
    }
}

/// Bottom sheet state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SheetState {
    #[default]
    Closed,
    Open(SelectorState),
}

impl SheetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetState::Closed => "closed",
            SheetState::Open(_) => "open",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SheetState::Open(_))
    }

    /// Current selector sub-state, if the sheet is open.
    pub fn selector(&self) -> Option<SelectorState> {
        match self {
            SheetState::Open(selector) => Some(*selector),
            SheetState::Closed => None,
        }
    }

    /// Open the sheet. Opening an open sheet keeps its selector state.
    pub fn open(&mut self) {
        if !self.is_open() {
            *self = SheetState::Open(SelectorState::Idle);
        }
    }

    pub fn close(&mut self) {
        *self = SheetState::Closed;
    }

    /// Toggle the first dropdown, collapsing the second.
    ///
    /// Returns `false` when the sheet is closed.
    pub fn toggle_first(&mut self) -> bool {
        match self {
            SheetState::Open(selector) => {
                *selector = match selector {
                    SelectorState::FirstOpen => SelectorState::Idle,
                    _ => SelectorState::FirstOpen,
                };
                true
            }
            SheetState::Closed => false,
        }
    }

    /// Toggle the second dropdown, collapsing the first.
    ///
    /// Returns `false` when the sheet is closed.
    pub fn toggle_second(&mut self) -> bool {
        match self {
            SheetState::Open(selector) => {
                *selector = match selector {
                    SelectorState::SecondOpen => SelectorState::Idle,
                    _ => SelectorState::SecondOpen,
                };
                true
            }
            SheetState::Closed => false,
        }
    }

    /// Collapse any expanded dropdown. Called after a pick.
    pub fn collapse_selectors(&mut self) {
        if let SheetState::Open(selector) = self {
            *selector = SelectorState::Idle;
        }
    }
}

/// Release point of a drag on the sheet handle.
///
/// Positive values point in the dismiss (downward) direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DragRelease {
    pub offset: f64,
    pub velocity: f64,
}

/// Thresholds past which a drag release dismisses the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DismissThresholds {
    #[serde(default = "default_distance")]
    pub distance: f64,
    #[serde(default = "default_velocity")]
    pub velocity: f64,
}

fn default_distance() -> f64 {
    100.0
}

fn default_velocity() -> f64 {
    500.0
}

impl Default for DismissThresholds {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            velocity: default_velocity(),
        }
    }
}

impl DismissThresholds {
    /// Evaluated once per release; both comparisons are strict.
    pub fn should_dismiss(&self, release: DragRelease) -> bool {
        release.offset > self.distance || release.velocity > self.velocity
    }
}
