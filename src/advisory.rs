use serde::{Deserialize, Serialize};

/// Non-fatal conditions reported alongside a computed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    /// Velocity points out of the collision plane; it was left untouched
    OutOfPlane,
    /// Pitch is ±π/2, so the horizontal view direction is undefined
    GimbalLock,
}

/// A value together with an optional advisory flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advised<T> {
    pub value: T,
    pub advisory: Option<Advisory>,
}

impl<T> Advised<T> {
    pub fn clean(value: T) -> Self {
        Self { value, advisory: None }
    }

    pub fn flagged(value: T, advisory: Advisory) -> Self {
        Self { value, advisory: Some(advisory) }
    }

    pub fn is_flagged(&self) -> bool {
        self.advisory.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
