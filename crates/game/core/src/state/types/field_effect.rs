use super::{Duration, TilePosition};

/// Field-level area marker independent of any object, such as a boss's
/// multi-tile attack zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldEffect {
    pub label: String,
    pub tiles: Vec<TilePosition>,
    pub duration: Duration,
}

impl FieldEffect {
    pub fn new(label: impl Into<String>, tiles: Vec<TilePosition>, duration: Duration) -> Self {
        Self {
            label: label.into(),
            tiles,
            duration,
        }
    }

    pub fn covers(&self, position: TilePosition) -> bool {
        self.tiles.contains(&position)
    }

    /// Counts down one tick. Returns true once the marker has expired.
    pub(crate) fn tick_down(&mut self) -> bool {
        match &mut self.duration {
            Duration::Ticks(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            Duration::Indefinite => false,
        }
    }
}
