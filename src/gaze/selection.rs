//! The single "currently looked-at" target.

/// Current gaze selection: one target name or none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GazeSelection {
    current: Option<String>,
}

/// A transition between two selection values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// Value before the transition.
    pub previous: Option<String>,
    /// Value after the transition.
    pub current: Option<String>,
}

impl GazeSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the selected target, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Returns `true` if a target is selected.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces the selection. Returns the transition if the value changed.
    pub fn set(&mut self, next: Option<&str>) -> Option<SelectionChange> {
        if self.current.as_deref() == next {
            return None;
        }
        let previous = self.current.take();
        self.current = next.map(str::to_string);
        Some(SelectionChange {
            previous,
            current: self.current.clone(),
        })
    }
}
