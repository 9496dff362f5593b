use crate::{
    collections::{EntityPool, Handle},
    math::Vector2,
};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Move a position by a fixed offset over some duration.
#[derive(Copy, Clone, Debug)]
pub struct MoveBy {
    velocity: Vector2,
    offset: Vector2,
    remaining: f32,
}

impl MoveBy {
    pub fn new(offset: Vector2, duration: f32) -> MoveBy {
        let duration = duration.max(0.0);
        let velocity = if duration > 0.0 {
            offset * (1.0 / duration)
        } else {
            offset
        };
        MoveBy {
            velocity,
            offset,
            remaining: duration,
        }
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Advance the move, returning `true` on the step that finishes it.
    pub fn step(&mut self, position: &mut Vector2, delta: f32) -> bool {
        if self.is_done() {
            // Zero-duration moves jump straight to the end
            if self.offset != Vector2::zero() {
                *position += self.offset;
                self.offset = Vector2::zero();
            }
            return true;
        }
        let dt = delta.min(self.remaining);
        let step = self.velocity * dt;
        *position += step;
        self.offset -= step;
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            // Soak up float drift so the move ends exactly where it was aimed
            *position += self.offset;
            self.offset = Vector2::zero();
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }
}

/// Toggle visibility `times` times over `duration` seconds, ending visible.
#[derive(Copy, Clone, Debug)]
pub struct Blink {
    times: u32,
    duration: f32,
    elapsed: f32,
}

impl Blink {
    pub fn new(times: u32, duration: f32) -> Blink {
        Blink {
            times,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.times == 0 || self.elapsed >= self.duration
    }

    pub fn step(&mut self, delta: f32) -> bool {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.is_done()
    }

    /// Whether the target is visible at this point in the blink.
    pub fn visible(&self) -> bool {
        if self.is_done() {
            return true;
        }
        let period = self.duration / self.times as f32;
        let phase = self.elapsed % period;
        phase > period * 0.5
    }
}

/// Issued to a running action so it can report back once it finishes.
#[derive(Debug)]
pub struct CompletionToken<T> {
    handle: Handle<T>,
    sender: UnboundedSender<Handle<T>>,
}

impl<T> CompletionToken<T> {
    #[inline]
    pub fn handle(&self) -> Handle<T> {
        self.handle
    }

    pub fn complete(self) {
        if self.sender.unbounded_send(self.handle).is_err() {
            log::trace!("Completion for {:?} dropped, receiver is gone", self.handle);
        }
    }
}

/// A queue of finished actions, drained once per tick by whoever owns the pool.
///
/// Completions are handles, so a completion that arrives after the slot was respawned is
/// ignored by [`Completions::drain`] instead of recycling the new occupant.
#[derive(Debug)]
pub struct Completions<T> {
    sender: UnboundedSender<Handle<T>>,
    receiver: UnboundedReceiver<Handle<T>>,
}

impl<T> Default for Completions<T> {
    fn default() -> Completions<T> {
        let (sender, receiver) = mpsc::unbounded();
        Completions { sender, receiver }
    }
}

impl<T> Completions<T> {
    #[inline]
    pub fn new() -> Completions<T> {
        Completions::default()
    }

    pub fn token(&self, handle: Handle<T>) -> CompletionToken<T> {
        CompletionToken {
            handle,
            sender: self.sender.clone(),
        }
    }

    /// Deactivate every completed slot whose handle is still current.
    pub fn drain(&mut self, pool: &mut EntityPool<T>) -> usize {
        let mut recycled = 0;
        while let Ok(Some(handle)) = self.receiver.try_next() {
            if pool.deactivate_handle(handle) {
                recycled += 1;
            } else {
                log::trace!("Ignoring stale completion {:?}", handle);
            }
        }
        recycled
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn move_by_lands_exactly() {
        let mut position = Vector2::new(100.0, 50.0);
        let mut action = MoveBy::new((-300.0, 0.0).into(), 0.5);
        let mut finished = 0;
        for _ in 0..40 {
            if action.step(&mut position, 0.125) {
                finished += 1;
                break;
            }
        }
        assert_eq!(1, finished);
        assert_eq!(Vector2::new(-200.0, 50.0), position);
    }

    #[test]
    fn move_by_finishes_on_one_big_step() {
        let mut position = Vector2::zero();
        let mut action = MoveBy::new((10.0, 0.0).into(), 2.0);
        assert!(!action.step(&mut position, 1.0));
        assert_eq!(Vector2::new(5.0, 0.0), position);
        assert!(action.step(&mut position, 5.0));
        assert_eq!(Vector2::new(10.0, 0.0), position);
    }

    #[test]
    fn zero_duration_moves_jump() {
        let mut position = Vector2::zero();
        let mut action = MoveBy::new((3.0, 4.0).into(), 0.0);
        assert!(action.step(&mut position, 0.016));
        assert_eq!(Vector2::new(3.0, 4.0), position);
        assert!(action.step(&mut position, 0.016));
        assert_eq!(Vector2::new(3.0, 4.0), position);
    }

    #[test]
    fn blink_toggles_then_shows() {
        let mut blink = Blink::new(2, 1.0);
        let mut toggles = 0;
        let mut last = blink.visible();
        for _ in 0..25 {
            blink.step(0.05);
            if blink.visible() != last {
                toggles += 1;
                last = blink.visible();
            }
        }
        assert!(blink.is_done());
        assert!(blink.visible());
        assert!(toggles >= 3);
    }

    #[test]
    fn completions_recycle_current_slots_only() {
        let mut pool = EntityPool::<u32>::new(1).unwrap();
        let mut completions = Completions::new();

        let first = pool.spawn(1);
        let stale = completions.token(first);
        let second = pool.spawn(2);
        let current = completions.token(second);

        stale.complete();
        assert_eq!(0, completions.drain(&mut pool));
        assert!(pool.is_current(second));

        current.complete();
        assert_eq!(1, completions.drain(&mut pool));
        assert_eq!(0, pool.active_count());
        assert_eq!(0, completions.drain(&mut pool));
    }
}
