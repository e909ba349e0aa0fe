use std::time::Instant;

use evaluation::wdl::MAX_WIN_PROBABILITY;
use evaluation::WinProbability;

/// Shashin zone boundaries on the win-probability scale, ascending.
pub const ZONE_BOUNDS: [u8; 12] = [5, 10, 15, 20, 24, 49, 50, 75, 79, 84, 89, 94];

pub const MIN_VALUE: i32 = -4000;
pub const MAX_VALUE: i32 = 4000;

pub const MIN_MATERIAL: i32 = 17;
pub const MAX_MATERIAL: i32 = 78;

const BUCKETS: usize = MAX_WIN_PROBABILITY as usize + 1;

/// Smallest zone boundary strictly above `wp`, or 100 past the last one.
pub fn max_zone_bound(wp: u8) -> u8 {
    let idx = ZONE_BOUNDS.partition_point(|&bound| bound <= wp);
    ZONE_BOUNDS.get(idx).copied().unwrap_or(MAX_WIN_PROBABILITY)
}

/// Largest zone boundary strictly below `wp`, or 0 before the first one.
pub fn min_zone_bound(wp: u8) -> u8 {
    let idx = ZONE_BOUNDS.partition_point(|&bound| bound < wp);
    if idx == 0 {
        0
    } else {
        ZONE_BOUNDS[idx - 1]
    }
}

/// Inclusive range of values allowed for a win-probability bucket.
/// `min_value > max_value` means the bucket has no usable bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdEntry {
    pub min_value: i32,
    pub max_value: i32,
}

impl Default for ThresholdEntry {
    fn default() -> Self {
        Self {
            min_value: MAX_VALUE,
            max_value: MIN_VALUE,
        }
    }
}

impl ThresholdEntry {
    pub fn is_inverted(&self) -> bool {
        self.min_value > self.max_value
    }
}

/// Per-bucket clamping ranges that keep a perturbed value within one Shashin
/// zone of where it landed. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    entries: Vec<ThresholdEntry>,
}

impl ThresholdTable {
    /// A table that clamps nothing.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Scans every `(material, value)` pair once, remembering the extreme
    /// values that land in each bucket, then assembles each bucket's range
    /// from the neighbouring zone boundaries.
    pub fn build(model: &impl WinProbability) -> Self {
        let start = Instant::now();

        let mut lowest: [Option<i32>; BUCKETS] = [None; BUCKETS];
        let mut highest: [Option<i32>; BUCKETS] = [None; BUCKETS];

        for material in MIN_MATERIAL..=MAX_MATERIAL {
            for value in MIN_VALUE..=MAX_VALUE {
                let bucket = model.win_probability_by_material(value, material) as usize;
                let Some(slot) = lowest.get_mut(bucket) else {
                    continue;
                };
                *slot = Some(slot.map_or(value, |v| v.min(value)));
                highest[bucket] = Some(highest[bucket].map_or(value, |v| v.max(value)));
            }
        }

        let entries = (0..=MAX_WIN_PROBABILITY)
            .map(|wp| ThresholdEntry {
                min_value: lowest[min_zone_bound(wp) as usize].unwrap_or(MAX_VALUE),
                max_value: highest[max_zone_bound(wp) as usize].unwrap_or(MIN_VALUE),
            })
            .collect();

        log::info!("Threshold table built in {:?}", start.elapsed());
        Self { entries }
    }

    #[cfg(test)]
    pub(crate) fn uniform(entry: ThresholdEntry) -> Self {
        Self {
            entries: vec![entry; BUCKETS],
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn entry(&self, wp: u8) -> Option<ThresholdEntry> {
        self.entries.get(wp as usize).copied()
    }

    /// Clamps `value` into the range of bucket `wp`. Passes the value through
    /// when the table is not ready or the entry is inverted.
    #[inline]
    pub fn clamp(&self, value: i32, wp: u8) -> i32 {
        match self.entry(wp) {
            Some(entry) if !entry.is_inverted() => value.clamp(entry.min_value, entry.max_value),
            _ => value,
        }
    }
}
