use serde::{Deserialize, Serialize};

/// Replay pacing handed to the animation driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPlayback {
    /// Interval between two steps in milliseconds.
    pub speed_ms: u64,
}

impl Default for SettingsPlayback {
    fn default() -> Self {
        Self { speed_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsHistory {
    /// Maximum number of stored graph snapshots, including the initial one.
    /// Zero is treated as one.
    pub capacity: usize,
}

impl Default for SettingsHistory {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}
