mod action;
mod audio;
mod clock;
mod director;
mod lifecycle;
mod parallax;
mod snapshot;
mod sprite;
mod sweep;
mod timer;

pub use action::*;
pub use audio::*;
pub use clock::*;
pub use director::*;
pub use lifecycle::*;
pub use parallax::*;
pub use snapshot::*;
pub use sprite::*;
pub use sweep::*;
pub use timer::*;

use crate::math::Vector2;

/// What a scene gets to touch while it runs.
pub struct Context<'a> {
    pub director: &'a mut Director,
    pub audio: &'a mut dyn Audio,
}

/// A game scene driven one tick at a time.
pub trait Scene {
    fn update(&mut self, ctx: &mut Context, delta: f32);

    /// A touch started at `point`. Returns whether the scene handled it.
    fn touch_begin(&mut self, _ctx: &mut Context, _point: Vector2) -> bool {
        false
    }

    fn accelerate(&mut self, _ctx: &mut Context, _acceleration: Vector2) {}

    /// Describe what should be drawn this frame.
    fn snapshot(&self, out: &mut Snapshot);

    fn resume(&mut self) {}

    fn pause(&mut self) {}
}

/// Owns the director, the audio sink and the current scene, and forwards host events to them.
pub struct Runner {
    director: Director,
    audio: Box<dyn Audio>,
    scene: Box<dyn Scene>,
    snapshot: Snapshot,
    frames: u64,
}

impl Runner {
    pub fn new(director: Director, audio: Box<dyn Audio>, scene: Box<dyn Scene>) -> Runner {
        Runner {
            director,
            audio,
            scene,
            snapshot: Snapshot::default(),
            frames: 0,
        }
    }

    #[inline]
    pub fn director(&self) -> &Director {
        &self.director
    }

    #[inline]
    pub fn director_mut(&mut self) -> &mut Director {
        &mut self.director
    }

    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of ticks the scene has actually been updated for.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn replace(&mut self, scene: Box<dyn Scene>) {
        log::debug!("Replacing scene after {} frames", self.frames);
        self.scene = scene;
    }

    /// Run one frame. Returns whether the scene was updated.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.director.is_running() {
            return false;
        }
        let mut ctx = Context {
            director: &mut self.director,
            audio: self.audio.as_mut(),
        };
        self.scene.update(&mut ctx, delta);
        self.frames += 1;

        self.snapshot.clear();
        self.scene.snapshot(&mut self.snapshot);
        self.snapshot.sort();
        true
    }

    pub fn touch(&mut self, point: Vector2) -> bool {
        if self.director.flags().contains(DirectorFlags::PAUSED) {
            return false;
        }
        let mut ctx = Context {
            director: &mut self.director,
            audio: self.audio.as_mut(),
        };
        self.scene.touch_begin(&mut ctx, point)
    }

    pub fn accelerate(&mut self, acceleration: Vector2) {
        let mut ctx = Context {
            director: &mut self.director,
            audio: self.audio.as_mut(),
        };
        self.scene.accelerate(&mut ctx, acceleration);
    }

    fn wake(&mut self) {
        self.director.resume();
        self.director.start_animation();
        self.scene.resume();
    }

    fn sleep(&mut self) {
        self.director.pause();
        self.director.stop_animation();
        self.scene.pause();
    }
}

impl Lifecycle for Runner {
    fn on_resume(&mut self) {
        log::debug!("Resumed");
        self.wake();
    }

    fn on_pause(&mut self) {
        log::debug!("Paused");
        self.sleep();
    }

    fn on_foreground(&mut self) {
        log::debug!("Entering foreground");
        self.wake();
    }

    fn on_background(&mut self) {
        log::debug!("Entering background");
        self.sleep();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    #[derive(Default)]
    struct Counter {
        updates: Rc<Cell<u32>>,
        pauses: Rc<Cell<u32>>,
    }

    impl Scene for Counter {
        fn update(&mut self, ctx: &mut Context, _delta: f32) {
            self.updates.set(self.updates.get() + 1);
            ctx.audio.effect("tick");
        }

        fn touch_begin(&mut self, ctx: &mut Context, _point: Vector2) -> bool {
            ctx.director.end();
            true
        }

        fn snapshot(&self, out: &mut Snapshot) {
            out.push(&Sprite::new((1.0, 1.0).into()));
        }

        fn pause(&mut self) {
            self.pauses.set(self.pauses.get() + 1);
        }
    }

    fn runner() -> (Runner, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let scene = Counter::default();
        let updates = scene.updates.clone();
        let pauses = scene.pauses.clone();
        let runner = Runner::new(
            Director::new((800.0, 600.0).into()),
            Box::new(Silent),
            Box::new(scene),
        );
        (runner, updates, pauses)
    }

    #[test]
    fn lifecycle_gates_updates() {
        let (mut runner, updates, pauses) = runner();
        assert!(runner.tick(0.016));
        assert_eq!(1, runner.snapshot().len());

        runner.on_pause();
        assert!(!runner.tick(0.016));
        assert_eq!(1, pauses.get());
        assert!(!runner.touch(Vector2::zero()));

        runner.on_resume();
        assert!(runner.tick(0.016));

        runner.on_background();
        assert!(!runner.tick(0.016));
        runner.on_foreground();
        assert!(runner.tick(0.016));

        assert_eq!(3, updates.get());
        assert_eq!(3, runner.frames());
        assert_eq!(2, pauses.get());
    }

    #[test]
    fn scenes_can_end_the_director() {
        let (mut runner, _, _) = runner();
        assert!(runner.touch(Vector2::zero()));
        assert!(runner.director().has_ended());
        assert!(!runner.tick(0.016));
    }
}
