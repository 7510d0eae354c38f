//! Spell effect lists

use serde::{Deserialize, Serialize};

/// Who a spell effect is delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectRange {
    /// Affects the caster
    Caster,
    /// Affects whatever the caster touches
    Touch,
    /// Affects whatever the bolt strikes
    Target,
}

/// One effect of a spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectEntry {
    /// Magic effect identifier
    pub effect_id: u16,
    /// Delivery range
    pub range: EffectRange,
    /// Minimum magnitude
    pub magnitude_min: i32,
    /// Maximum magnitude
    pub magnitude_max: i32,
    /// Area radius, 0 for single target
    pub area: i32,
    /// Duration in seconds
    pub duration: i32,
}

impl EffectEntry {
    /// Effect with a fixed magnitude and no area or duration
    pub fn new(effect_id: u16, range: EffectRange, magnitude: i32) -> Self {
        Self {
            effect_id,
            range,
            magnitude_min: magnitude,
            magnitude_max: magnitude,
            area: 0,
            duration: 0,
        }
    }
}

/// Ordered list of spell effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectList(pub Vec<EffectEntry>);

impl EffectList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the entries delivered at `range`, order preserved
    pub fn only_range(&self, range: EffectRange) -> Self {
        Self(self.0.iter().filter(|e| e.range == range).cloned().collect())
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = &EffectEntry> {
        self.0.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<EffectEntry> for EffectList {
    fn from_iter<I: IntoIterator<Item = EffectEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_range_keeps_order() {
        let effects: EffectList = [
            EffectEntry::new(14, EffectRange::Target, 10),
            EffectEntry::new(75, EffectRange::Caster, 5),
            EffectEntry::new(16, EffectRange::Target, 20),
            EffectEntry::new(27, EffectRange::Touch, 3),
        ]
        .into_iter()
        .collect();

        let targeted = effects.only_range(EffectRange::Target);
        let ids: Vec<u16> = targeted.iter().map(|e| e.effect_id).collect();
        assert_eq!(ids, vec![14, 16]);
        assert_eq!(effects.len(), 4);
    }
}
