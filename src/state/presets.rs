//! Fixed, cyclic list of sleep timer durations

use serde::Serialize;

use crate::error::PresetError;

/// One selectable timer duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub duration_seconds: u64,
    pub label: String,
}

impl Preset {
    pub fn new(duration_seconds: u64, label: impl Into<String>) -> Self {
        Self {
            duration_seconds,
            label: label.into(),
        }
    }

    /// The zero-length entry that switches the timer off
    pub fn is_disabled(&self) -> bool {
        self.duration_seconds == 0
    }
}

/// 60 min → 30 min → 15 min → 5 sec → OFF
pub fn standard_presets() -> Vec<Preset> {
    vec![
        Preset::new(3600, "60 min"),
        Preset::new(1800, "30 min"),
        Preset::new(900, "15 min"),
        Preset::new(5, "5 sec"),
        Preset::new(0, "OFF"),
    ]
}

/// Ordered presets containing exactly one disabled entry.
///
/// The list cannot be changed once built; cycling wraps from the last entry
/// back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetList {
    presets: Vec<Preset>,
    disabled_index: usize,
}

impl PresetList {
    /// Validate and build a preset list
    pub fn new(presets: Vec<Preset>) -> Result<Self, PresetError> {
        if presets.is_empty() {
            return Err(PresetError::Empty);
        }

        let disabled: Vec<usize> = presets
            .iter()
            .enumerate()
            .filter(|(_, preset)| preset.is_disabled())
            .map(|(index, _)| index)
            .collect();

        match disabled.as_slice() {
            [] => Err(PresetError::MissingSentinel),
            [index] => Ok(Self {
                disabled_index: *index,
                presets,
            }),
            many => Err(PresetError::MultipleSentinels(many.len())),
        }
    }

    /// The built-in list, parked on its trailing OFF entry
    pub fn standard() -> Self {
        Self {
            presets: standard_presets(),
            disabled_index: 4,
        }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Index of the disabled entry, where selection starts
    pub fn disabled_index(&self) -> usize {
        self.disabled_index
    }

    /// Preset at `index`, wrapping around the list
    pub fn get(&self, index: usize) -> &Preset {
        &self.presets[index % self.presets.len()]
    }

    /// Index following `index` in cycle order
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.presets.len()
    }
}

impl Default for PresetList {
    fn default() -> Self {
        Self::standard()
    }
}
