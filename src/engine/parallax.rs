use crate::{math::Vector2, util::Error};
use smallvec::SmallVec;

/// How the scroll speed of a [`ParallaxLayer`] is applied each update.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Scroll {
    /// Move `speed` units every tick regardless of the frame delta. This is what the
    /// original scenes do, so scrolling runs faster at higher frame rates.
    PerTick,
    /// Move `speed * delta` units per tick.
    PerSecond,
}

/// A horizontally tiled strip of equal-width sprites scrolling left.
///
/// Once a sprite's centre passes `-(width / 2)` it jumps to sit behind its cyclic
/// predecessor (index `i - 1`, wrapping), `width - overlap` further right, so the strip never
/// shows a gap.
#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    positions: SmallVec<[Vector2; 4]>,
    width: f32,
    overlap: f32,
    speed: f32,
    scroll: Scroll,
    wraps: u64,
}

impl ParallaxLayer {
    pub fn new(
        count: usize,
        width: f32,
        overlap: f32,
        speed: f32,
        origin: Vector2,
    ) -> Result<ParallaxLayer, Error> {
        if count < 2 {
            return Err(Error::GroupTooSmall(count));
        }
        if width <= overlap {
            return Err(Error::OverlapTooWide { width, overlap });
        }
        let positions = (0..count)
            .map(|i| Vector2::new(origin.x() + i as f32 * (width - overlap), origin.y()))
            .collect();
        Ok(ParallaxLayer {
            positions,
            width,
            overlap,
            speed,
            scroll: Scroll::PerTick,
            wraps: 0,
        })
    }

    pub fn with_scroll(mut self, scroll: Scroll) -> ParallaxLayer {
        self.scroll = scroll;
        self
    }

    #[inline]
    pub fn positions(&self) -> &[Vector2] {
        &self.positions
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn scroll(&self) -> Scroll {
        self.scroll
    }

    /// Total number of times any sprite in the group has been wrapped.
    #[inline]
    pub fn wrap_count(&self) -> u64 {
        self.wraps
    }

    #[inline]
    fn predecessor(&self, index: usize) -> usize {
        (index + self.positions.len() - 1) % self.positions.len()
    }

    pub fn update(&mut self, delta: f32) {
        let movement = match self.scroll {
            Scroll::PerTick => self.speed,
            Scroll::PerSecond => self.speed * delta,
        };
        for position in self.positions.iter_mut() {
            position.set_x(position.x() - movement);
        }

        let boundary = -(self.width * 0.5);
        for i in 0..self.positions.len() {
            if self.positions[i].x() <= boundary {
                let behind = self.positions[self.predecessor(i)].x();
                self.positions[i].set_x(behind + self.width - self.overlap);
                self.wraps += 1;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_degenerate_groups() {
        assert_eq!(
            Some(Error::GroupTooSmall(1)),
            ParallaxLayer::new(1, 100.0, 5.0, 5.0, Vector2::zero()).err()
        );
        assert!(ParallaxLayer::new(2, 5.0, 5.0, 5.0, Vector2::zero()).is_err());
    }

    #[test]
    fn lays_out_contiguously() {
        let layer = ParallaxLayer::new(3, 100.0, 5.0, 5.0, (0.0, 30.0).into()).unwrap();
        let xs: Vec<f32> = layer.positions().iter().map(Vector2::x).collect();
        assert_eq!(vec![0.0, 95.0, 190.0], xs);
    }

    #[test]
    fn lead_wraps_once_in_21_ticks() {
        let mut layer = ParallaxLayer::new(2, 100.0, 5.0, 5.0, Vector2::zero()).unwrap();
        for _ in 0..21 {
            layer.update(1.0 / 60.0);
        }
        assert_eq!(1, layer.wrap_count());
        // Lead wrapped on tick 10 to sit behind the trailing sprite
        assert_eq!(140.0 - 55.0, layer.positions()[0].x());
        assert_eq!(-10.0, layer.positions()[1].x());
    }

    #[test]
    fn per_tick_scroll_ignores_delta() {
        let mut slow = ParallaxLayer::new(2, 100.0, 0.0, 5.0, Vector2::zero()).unwrap();
        let mut fast = slow.clone();
        slow.update(1.0 / 30.0);
        fast.update(1.0 / 120.0);
        assert_eq!(slow.positions()[0].x(), fast.positions()[0].x());
    }

    #[test]
    fn per_second_scroll_scales_with_delta() {
        let mut layer = ParallaxLayer::new(2, 100.0, 0.0, 60.0, Vector2::zero())
            .unwrap()
            .with_scroll(Scroll::PerSecond);
        layer.update(0.5);
        assert_eq!(-30.0, layer.positions()[0].x());
    }

    #[test]
    fn four_sprites_keep_tiling() {
        let width = 100.0;
        let overlap = 5.0;
        let mut layer = ParallaxLayer::new(4, width, overlap, 7.0, Vector2::zero()).unwrap();
        for _ in 0..500 {
            layer.update(1.0 / 60.0);
            let mut xs: Vec<f32> = layer.positions().iter().map(Vector2::x).collect();
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.windows(2) {
                assert!((pair[1] - pair[0] - (width - overlap)).abs() < 1e-3);
            }
        }
        assert!(layer.wrap_count() > 4);
    }
}
