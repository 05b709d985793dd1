//! The fixed set of platforms making up one level.
//!
//! Index 0 is the wide start platform. It is drawn straight from its own
//! bitmap and never lives in the array as an active entry. Indices
//! `1..PLATFORM_COUNT` are stacked [`PLATFORM_SPACING`] pixels apart above it
//! and land in one of [`PLATFORM_SLOTS`] columns.

use crate::{
    collision::overlaps_at,
    config::{
        FLOOR_Y,
        PLATFORM_COUNT,
        PLATFORM_SLOTS,
        PLATFORM_SPACING,
        PLATFORM_WIDTH,
    },
    rng::Rng,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Platform {
    pub index: usize,
    pub x: i32,
    /// Top row of the platform.
    pub y: i32,
    /// Cleared once the sprite has passed this platform.
    pub active: bool,
}

impl Platform {
    const fn retired(index: usize) -> Self {
        Self {
            index,
            x: 0,
            y: row_y(index),
            active: false,
        }
    }
}

/// Top row of platform `index`.
pub const fn row_y(index: usize) -> i32 {
    FLOOR_Y - index as i32 * PLATFORM_SPACING
}

/// Left edge of column `slot`.
pub const fn slot_x(slot: usize) -> i32 {
    slot as i32 * PLATFORM_WIDTH
}

#[derive(Debug, Clone)]
pub struct PlatformField {
    platforms: [Platform; PLATFORM_COUNT],
    dirty: bool,
}

impl Default for PlatformField {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformField {
    pub const fn new() -> Self {
        let mut platforms = [Platform::retired(0); PLATFORM_COUNT];
        let mut i = 0;
        while i < PLATFORM_COUNT {
            platforms[i] = Platform::retired(i);
            i += 1;
        }
        Self {
            platforms,
            dirty: true,
        }
    }

    /// Schedule a fresh layout; everything is retired until it is generated.
    pub fn mark_dirty(&mut self) {
        for platform in &mut self.platforms {
            platform.active = false;
        }
        self.dirty = true;
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Lay out a new level if one is pending. Returns whether it did.
    ///
    /// Platform 1 is kept out of the column the sprite currently occupies so
    /// the first hop always needs a move.
    pub fn regenerate_if_needed(&mut self, sprite_x: i32, rng: &mut Rng) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        for platform in self.platforms.iter_mut().skip(1) {
            let slot = rng.range(PLATFORM_SLOTS as u32) as usize;
            *platform = Platform {
                index: platform.index,
                x: slot_x(slot),
                y: row_y(platform.index),
                active: true,
            };
        }

        if PLATFORM_COUNT > 1 {
            self.platforms[1].x = slot_x(free_slot(sprite_x, rng));
        }

        debug!(
            "platforms: {} {} {} {} {}",
            self.platforms[1].x,
            self.platforms[2].x,
            self.platforms[3].x,
            self.platforms[4].x,
            self.platforms[5].x
        );
        true
    }

    /// Take every platform up to and including `current` out of play.
    pub fn retire_passed(&mut self, current: usize) {
        for platform in self.platforms.iter_mut().take(current + 1) {
            platform.active = false;
        }
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    pub fn all(&self) -> &[Platform; PLATFORM_COUNT] {
        &self.platforms
    }

    pub fn active(&self) -> impl Iterator<Item = &Platform> + '_ {
        self.platforms.iter().filter(|p| p.active)
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, index: usize, x: i32) {
        self.platforms[index].x = x;
    }
}

/// Uniform pick among the columns a sprite at `sprite_x` does not stand on.
///
/// Equivalent to re-rolling until the column is clear, without the unbounded
/// loop. A sprite can touch at most one column, so there is always a choice;
/// an off-screen sprite leaves all of them free.
fn free_slot(sprite_x: i32, rng: &mut Rng) -> usize {
    let mut free = [0_usize; PLATFORM_SLOTS];
    let mut count = 0;
    for slot in 0..PLATFORM_SLOTS {
        if !overlaps_at(sprite_x, slot_x(slot)) {
            free[count] = slot;
            count += 1;
        }
    }
    if count == 0 {
        return rng.range(PLATFORM_SLOTS as u32) as usize;
    }
    free[rng.range(count as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::horizontally_overlaps;

    #[test]
    fn rows_are_gravity_aligned() {
        assert_eq!(row_y(0), 125);
        assert_eq!(row_y(1), 104);
        assert_eq!(row_y(5), 20);
    }

    #[test]
    fn regeneration_places_every_platform_in_a_slot() {
        let mut field = PlatformField::new();
        let mut rng = Rng::new(7);
        assert!(field.regenerate_if_needed(0, &mut rng));
        assert!(!field.is_dirty());

        assert!(!field.all()[0].active);
        for platform in field.all().iter().skip(1) {
            assert!(platform.active);
            assert_eq!(platform.x % PLATFORM_WIDTH, 0);
            assert!((0..PLATFORM_SLOTS as i32 * PLATFORM_WIDTH).contains(&platform.x));
            assert_eq!(platform.y, row_y(platform.index));
        }
    }

    #[test]
    fn regeneration_happens_once_per_dirty_flag() {
        let mut field = PlatformField::new();
        let mut rng = Rng::new(7);
        field.regenerate_if_needed(0, &mut rng);
        let layout = *field.all();
        assert!(!field.regenerate_if_needed(0, &mut rng));
        assert_eq!(*field.all(), layout);

        field.mark_dirty();
        assert!(field.active().next().is_none());
        assert!(field.regenerate_if_needed(0, &mut rng));
    }

    #[test]
    fn first_platform_avoids_the_sprite() {
        for sprite_x in 0..=53 {
            for seed in 1..64 {
                let mut field = PlatformField::new();
                let mut rng = Rng::new(seed);
                field.regenerate_if_needed(sprite_x, &mut rng);
                let first = field.get(1).unwrap();
                assert!(!horizontally_overlaps(sprite_x, first), "x={sprite_x} seed={seed}");
            }
        }
    }

    #[test]
    fn off_screen_sprite_does_not_stall_generation() {
        let mut field = PlatformField::new();
        let mut rng = Rng::new(99);
        for sprite_x in [-1000, -3, 200, i32::MAX - 100] {
            field.mark_dirty();
            assert!(field.regenerate_if_needed(sprite_x, &mut rng));
            assert!(field.get(1).unwrap().active);
        }
    }

    #[test]
    fn free_slot_uses_every_clear_column() {
        let mut rng = Rng::new(3);
        let mut seen = [false; PLATFORM_SLOTS];
        for _ in 0..200 {
            seen[free_slot(0, &mut rng)] = true;
        }
        assert_eq!(seen, [false, true, true, true]);
    }

    #[test]
    fn retiring_takes_passed_platforms_out_of_play() {
        let mut field = PlatformField::new();
        let mut rng = Rng::new(11);
        field.regenerate_if_needed(0, &mut rng);
        field.retire_passed(2);
        let active: [bool; PLATFORM_COUNT] = core::array::from_fn(|i| field.all()[i].active);
        assert_eq!(active, [false, false, false, true, true, true]);
        assert_eq!(field.active().count(), 3);
    }
}
