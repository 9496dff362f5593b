use crate::math::{Rect, Size, Vector2};
use bitflags::bitflags;

bitflags! {
    pub struct DirectorFlags: u8 {
        const PAUSED = 0b0001;
        const ANIMATING = 0b0010;
        const SHOW_STATS = 0b0100;
        const ENDED = 0b1000;
    }
}

/// The explicit stand-in for the engine's shared director.
///
/// Scenes receive it through [`crate::engine::Context`] instead of reaching for a global.
#[derive(Debug)]
pub struct Director {
    visible_size: Size,
    origin: Vector2,
    flags: DirectorFlags,
}

impl Director {
    pub fn new(visible_size: Size) -> Director {
        Director {
            visible_size,
            origin: Vector2::zero(),
            flags: DirectorFlags::ANIMATING,
        }
    }

    pub fn with_origin(mut self, origin: Vector2) -> Director {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.visible_size
    }

    #[inline]
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    /// The visible area of the scene in scene units.
    #[inline]
    pub fn visible_rect(&self) -> Rect {
        Rect::new(self.origin, self.visible_size)
    }

    #[inline]
    pub fn flags(&self) -> DirectorFlags {
        self.flags
    }

    pub fn pause(&mut self) {
        self.flags.insert(DirectorFlags::PAUSED);
    }

    pub fn resume(&mut self) {
        self.flags.remove(DirectorFlags::PAUSED);
    }

    pub fn start_animation(&mut self) {
        self.flags.insert(DirectorFlags::ANIMATING);
    }

    pub fn stop_animation(&mut self) {
        self.flags.remove(DirectorFlags::ANIMATING);
    }

    pub fn set_show_stats(&mut self, show: bool) {
        self.flags.set(DirectorFlags::SHOW_STATS, show);
    }

    #[inline]
    pub fn show_stats(&self) -> bool {
        self.flags.contains(DirectorFlags::SHOW_STATS)
    }

    /// Ask the host to shut down after the current frame.
    pub fn end(&mut self) {
        log::info!("Director asked to end");
        self.flags.insert(DirectorFlags::ENDED);
    }

    #[inline]
    pub fn has_ended(&self) -> bool {
        self.flags.contains(DirectorFlags::ENDED)
    }

    /// Whether scenes should receive updates this frame.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.flags.contains(DirectorFlags::ANIMATING)
            && !self.flags.intersects(DirectorFlags::PAUSED | DirectorFlags::ENDED)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn runs_until_paused() {
        let mut director = Director::new((800.0, 600.0).into());
        assert!(director.is_running());
        director.pause();
        assert!(!director.is_running());
        director.resume();
        assert!(director.is_running());
        director.stop_animation();
        assert!(!director.is_running());
        director.start_animation();
        director.end();
        assert!(!director.is_running());
        assert!(director.has_ended());
    }

    #[test]
    fn visible_rect_follows_origin() {
        let director = Director::new((800.0, 600.0).into()).with_origin((10.0, 20.0).into());
        let rect = director.visible_rect();
        assert_eq!(10.0, rect.min_x());
        assert_eq!(620.0, rect.max_y());
    }
}
