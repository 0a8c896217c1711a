use crate::color::Rgba;

pub const ALIVE_COLOR: Rgba = Rgba::BLACK;
pub const DEAD_COLOR: Rgba = Rgba::WHITE;

/// Every heatmap starts from this gray, and so does any cell that has never been drawn.
pub const BASELINE: Rgba = Rgba::opaque(128.0, 128.0, 128.0);

/// Fraction of the full channel range a cell moves by per generation
pub const HEATMAP_DELTA: f32 = 0.1;

/// Color a cell should be drawn with, given the color it currently has and whether it is alive.
///
/// `reset` discards the history and returns [`BASELINE`], whatever the other inputs. Otherwise,
/// without the heatmap this is the flat alive/dead color. With it, every channel moves toward
/// white while the cell lives and toward black while it is dead, by [`HEATMAP_DELTA`] of the range
/// per call, so a cell saturates after about ten generations in the same state.
pub fn blend(previous: Rgba, alive: bool, reset: bool, heatmap: bool) -> Rgba {
    if reset {
        return BASELINE;
    }

    if !heatmap {
        return if alive { ALIVE_COLOR } else { DEAD_COLOR };
    }

    let step = (if alive { 255.0 } else { -255.0 }) * HEATMAP_DELTA;
    let shift = |c: f32| (c + step).clamp(0.0, 255.0);

    Rgba {
        r: shift(previous.r),
        g: shift(previous.g),
        b: shift(previous.b),
        a: 1.0,
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    fn channel() -> impl Strategy<Value = f32> {
        0.0f32..=255.0
    }

    fn color() -> impl Strategy<Value = Rgba> {
        (channel(), channel(), channel()).prop_map(|(r, g, b)| Rgba::opaque(r, g, b))
    }

    #[test]
    fn flat_colors() {
        let previous = Rgba::opaque(12.0, 34.0, 56.0);

        assert_eq!(blend(previous, true, false, false), ALIVE_COLOR);
        assert_eq!(blend(previous, false, false, false), DEAD_COLOR);
    }

    #[test]
    fn reset_without_heatmap() {
        let previous = Rgba::opaque(12.0, 34.0, 56.0);

        assert_eq!(blend(previous, true, true, false), BASELINE);
        assert_eq!(blend(previous, false, true, false), BASELINE);
    }

    #[test]
    fn converges_to_white() {
        let mut color = BASELINE;
        for _ in 0..20 {
            color = blend(color, true, false, true);
        }

        assert_eq!(color, Rgba::WHITE);
        assert_eq!(blend(color, true, false, true), Rgba::WHITE);
    }

    #[test]
    fn converges_to_black() {
        let mut color = Rgba::WHITE;
        for _ in 0..10 {
            color = blend(color, false, false, true);
        }

        assert_eq!(color, Rgba::BLACK);
    }

    #[test]
    fn single_step() {
        let color = blend(BASELINE, false, false, true);

        assert_eq!(color, Rgba::opaque(102.5, 102.5, 102.5));
    }

    proptest! {
        #[test]
        fn reset_is_baseline(previous in color(), alive in any::<bool>(), heatmap in any::<bool>()) {
            prop_assert_eq!(blend(previous, alive, true, heatmap), BASELINE);
        }

        #[test]
        fn stays_in_range(previous in color(), alive in any::<bool>()) {
            let next = blend(previous, alive, false, true);

            for c in [next.r, next.g, next.b] {
                prop_assert!((0.0..=255.0).contains(&c));
            }
            prop_assert_eq!(next.a, 1.0);
        }

        #[test]
        fn moves_with_state(previous in color()) {
            let lighter = blend(previous, true, false, true);
            let darker = blend(previous, false, false, true);

            prop_assert!(lighter.r >= previous.r && darker.r <= previous.r);
        }
    }
}
