//! Programmatic volume bucketing (spec §4.8: "bucketed by added+deleted
//! lines with declared thresholds"). The thresholds themselves are an Open
//! Question the source leaves unpinned; see `DESIGN.md`.

use crate::model::ChangeVolume;

/// Threshold table, in ascending order of total changed lines.
const TRIVIAL_MAX: u32 = 5;
const SMALL_MAX: u32 = 50;
const MEDIUM_MAX: u32 = 200;
const LARGE_MAX: u32 = 1000;

pub fn bucket_volume(added_lines: u32, deleted_lines: u32) -> ChangeVolume {
    let total = added_lines.saturating_add(deleted_lines);
    if total <= TRIVIAL_MAX {
        ChangeVolume::Trivial
    } else if total <= SMALL_MAX {
        ChangeVolume::Small
    } else if total <= MEDIUM_MAX {
        ChangeVolume::Medium
    } else if total <= LARGE_MAX {
        ChangeVolume::Large
    } else {
        ChangeVolume::VeryLarge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_at_declared_thresholds() {
        assert_eq!(bucket_volume(2, 1), ChangeVolume::Trivial);
        assert_eq!(bucket_volume(5, 0), ChangeVolume::Trivial);
        assert_eq!(bucket_volume(6, 0), ChangeVolume::Small);
        assert_eq!(bucket_volume(30, 20), ChangeVolume::Small);
        assert_eq!(bucket_volume(100, 100), ChangeVolume::Medium);
        assert_eq!(bucket_volume(600, 400), ChangeVolume::Large);
        assert_eq!(bucket_volume(900, 900), ChangeVolume::VeryLarge);
    }
}
