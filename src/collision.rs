//! Sprite/platform contact tests.
//!
//! Horizontal contact is forgiving by [`OVERLAP_TOLERANCE`] pixels on either
//! side. Vertical contact is exact: platforms sit a whole number of gravity
//! steps apart, so a descending sprite's feet hit each platform row exactly.

use crate::{
    config::{
        OVERLAP_TOLERANCE,
        PLATFORM_WIDTH,
        SPRITE_WIDTH,
    },
    platforms::Platform,
};

/// Leftmost sprite column that still counts as standing on a platform at `x`.
pub const fn overlap_min(platform_x: i32) -> i32 {
    platform_x - OVERLAP_TOLERANCE
}

/// Rightmost sprite column that still counts as standing on a platform at `x`.
pub const fn overlap_max(platform_x: i32) -> i32 {
    platform_x + (PLATFORM_WIDTH - SPRITE_WIDTH) + OVERLAP_TOLERANCE
}

/// Would a sprite at `sprite_x` stand on a platform whose left edge is at
/// `platform_x`?
pub const fn overlaps_at(sprite_x: i32, platform_x: i32) -> bool {
    overlap_min(platform_x) <= sprite_x && sprite_x <= overlap_max(platform_x)
}

/// Retired platforms never overlap anything.
pub fn horizontally_overlaps(sprite_x: i32, platform: &Platform) -> bool {
    platform.active && overlaps_at(sprite_x, platform.x)
}

/// Exact pixel match between the sprite's feet and the platform's top row.
pub fn vertically_touches(feet_y: i32, platform: &Platform) -> bool {
    platform.active && platform.y == feet_y
}

pub fn lands_on(sprite_x: i32, feet_y: i32, platform: &Platform) -> bool {
    horizontally_overlaps(sprite_x, platform) && vertically_touches(feet_y, platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(x: i32, y: i32) -> Platform {
        Platform {
            index: 1,
            x,
            y,
            active: true,
        }
    }

    #[test]
    fn tolerance_applies_on_both_sides() {
        let p = platform(16, 104);
        assert!(horizontally_overlaps(14, &p));
        assert!(horizontally_overlaps(24, &p));
        assert!(!horizontally_overlaps(13, &p));
        assert!(!horizontally_overlaps(25, &p));
    }

    #[test]
    fn window_is_symmetric_around_the_platform() {
        for x in [0, 16, 32, 48] {
            let slack_left = x - overlap_min(x);
            let slack_right = overlap_max(x) - (x + PLATFORM_WIDTH - SPRITE_WIDTH);
            assert_eq!(slack_left, slack_right);
            assert_eq!(slack_left, OVERLAP_TOLERANCE);
        }
    }

    #[test]
    fn retired_platform_is_never_touched() {
        let mut p = platform(0, 104);
        p.active = false;
        assert!(!horizontally_overlaps(0, &p));
        assert!(!vertically_touches(104, &p));
        assert!(!lands_on(0, 104, &p));
    }

    #[test]
    fn vertical_contact_is_exact() {
        let p = platform(0, 104);
        assert!(vertically_touches(104, &p));
        assert!(!vertically_touches(103, &p));
        assert!(!vertically_touches(105, &p));
    }

    #[test]
    fn landing_needs_both_axes() {
        let p = platform(32, 83);
        assert!(lands_on(30, 83, &p));
        assert!(!lands_on(29, 83, &p));
        assert!(!lands_on(30, 86, &p));
    }
}
