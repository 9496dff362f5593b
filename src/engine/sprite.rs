use crate::{
    engine::{Blink, Bounded, CompletionToken, MoveBy},
    math::{Rect, Size, Vector2},
};

/// When a pooled sprite stops being worth keeping, independent of any running move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Expiry {
    Never,
    /// Seconds left to live.
    After(f32),
    /// Expires once its bounds no longer touch this rect.
    Outside(Rect),
}

impl Default for Expiry {
    #[inline]
    fn default() -> Expiry {
        Expiry::Never
    }
}

#[derive(Debug)]
struct Motion {
    action: MoveBy,
    token: Option<CompletionToken<Sprite>>,
}

/// A centre-anchored quad. The renderer owns the texture; we only track where it is.
#[derive(Debug, Default)]
pub struct Sprite {
    pub position: Vector2,
    pub size: Size,
    pub z_order: i32,
    motion: Option<Motion>,
    blink: Option<Blink>,
    expiry: Expiry,
}

impl Sprite {
    #[inline]
    pub fn new(size: Size) -> Sprite {
        Sprite {
            size,
            ..Sprite::default()
        }
    }

    /// Forget any running actions so the sprite can be respawned.
    pub fn reset(&mut self, position: Vector2) {
        self.position = position;
        self.motion = None;
        self.blink = None;
        self.expiry = Expiry::Never;
    }

    #[inline]
    pub fn move_by(&mut self, offset: Vector2, duration: f32) {
        self.motion = Some(Motion {
            action: MoveBy::new(offset, duration),
            token: None,
        });
    }

    /// Start a move that reports `token` once it lands.
    #[inline]
    pub fn move_by_then(&mut self, offset: Vector2, duration: f32, token: CompletionToken<Sprite>) {
        self.motion = Some(Motion {
            action: MoveBy::new(offset, duration),
            token: Some(token),
        });
    }

    #[inline]
    pub fn blink(&mut self, times: u32, duration: f32) {
        self.blink = Some(Blink::new(times, duration));
    }

    #[inline]
    pub fn set_expiry(&mut self, expiry: Expiry) {
        self.expiry = expiry;
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.blink.as_ref().map_or(true, Blink::visible)
    }

    pub fn is_expired(&self) -> bool {
        match self.expiry {
            Expiry::Never => false,
            Expiry::After(remaining) => remaining <= 0.0,
            Expiry::Outside(area) => !area.intersects(&self.bounds()),
        }
    }

    /// Advance running actions. Returns `true` on the tick a move finishes.
    pub fn step(&mut self, delta: f32) -> bool {
        if let Expiry::After(remaining) = &mut self.expiry {
            *remaining -= delta;
        }
        if let Some(blink) = &mut self.blink {
            if blink.step(delta) {
                self.blink = None;
            }
        }
        let finished = match &mut self.motion {
            Some(motion) => motion.action.step(&mut self.position, delta),
            None => false,
        };
        if finished {
            if let Some(token) = self.motion.take().and_then(|motion| motion.token) {
                token.complete();
            }
        }
        finished
    }
}

impl Bounded for Sprite {
    #[inline]
    fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }
}
