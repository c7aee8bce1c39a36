//! Preset durations

/// Preset durations offered by default, in minutes
pub const DEFAULT_PRESETS: [u32; 9] = [1, 2, 5, 10, 15, 20, 30, 45, 60];

/// Ordered list of preset durations in whole minutes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presets(Vec<u32>);

impl Presets {
    /// Build a preset list, dropping zero entries and duplicates while keeping order
    pub fn new(minutes: impl IntoIterator<Item = u32>) -> Self {
        let mut list: Vec<u32> = Vec::new();
        for m in minutes {
            if m > 0 && !list.contains(&m) {
                list.push(m);
            }
        }
        Self(list)
    }

    pub fn contains(&self, minutes: u32) -> bool {
        self.0.contains(&minutes)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for Presets {
    fn default() -> Self {
        Self::new(DEFAULT_PRESETS)
    }
}
