use crate::{
    collections::EntityPool,
    engine::{
        sweep_against, Audio, Bounded, Completions, Context, Director, ParallaxLayer, Scene,
        Snapshot, SpawnTimer, Sprite,
    },
    math::{Rect, Size, Vector2},
    util::Error,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct FlappyConfig {
    pub skyline_size: Size,
    pub ground_size: Size,
    pub ground_y: f32,
    /// How far neighbouring background tiles overlap.
    pub overlap: f32,
    /// Units per tick.
    pub scroll_speed: f32,
    pub pipe_capacity: usize,
    pub pipe_interval: f32,
    /// Range for the y of the lower pipe.
    pub pipe_y: (f32, f32),
    /// How far above the lower pipe the upper one sits.
    pub pipe_offset: f32,
    pub pipe_spawn_x: f32,
    pub pipe_travel: Vector2,
    pub pipe_duration: f32,
    pub pipe_size: Size,
    pub bird_size: Size,
    pub bird_x: f32,
    pub gravity: f32,
    pub flap_speed: f32,
    pub seed: u64,
}

impl Default for FlappyConfig {
    fn default() -> FlappyConfig {
        FlappyConfig {
            skyline_size: Size::new(900.0, 300.0),
            ground_size: Size::new(900.0, 60.0),
            ground_y: 30.0,
            overlap: 5.0,
            scroll_speed: 5.0,
            pipe_capacity: 8,
            pipe_interval: 2.0,
            pipe_y: (150.0, 450.0),
            pipe_offset: 850.0,
            pipe_spawn_x: 800.0,
            pipe_travel: Vector2::new(-900.0, 0.0),
            pipe_duration: 4.0,
            pipe_size: Size::new(52.0, 700.0),
            bird_size: Size::new(34.0, 24.0),
            bird_x: 100.0,
            gravity: -900.0,
            flap_speed: 200.0,
            seed: 0,
        }
    }
}

const WING_SOUND: &str = "sfx_wing";
const HIT_SOUND: &str = "sfx_hit";

/// Keep a falling bird between pipe pairs by tapping.
pub struct FlappyScene {
    config: FlappyConfig,
    rng: StdRng,
    skyline: ParallaxLayer,
    ground: ParallaxLayer,
    initial_layers: (ParallaxLayer, ParallaxLayer),
    bird: Sprite,
    bird_speed: f32,
    pipes: EntityPool<Sprite>,
    pipes_done: Completions<Sprite>,
    pipe_timer: SpawnTimer,
    crashed: bool,
}

impl FlappyScene {
    pub fn new(config: FlappyConfig, director: &Director) -> Result<FlappyScene, Error> {
        let size = director.size();
        let skyline = ParallaxLayer::new(
            2,
            config.skyline_size.width,
            config.overlap,
            config.scroll_speed,
            (0.0, size.height * 0.5).into(),
        )?;
        let ground = ParallaxLayer::new(
            2,
            config.ground_size.width,
            config.overlap,
            config.scroll_speed,
            (0.0, config.ground_y).into(),
        )?;
        let pipe_size = config.pipe_size;
        let pipes = EntityPool::from_fn(config.pipe_capacity, |_| Sprite::new(pipe_size))?;
        let pipe_timer = SpawnTimer::fixed(config.pipe_interval)?;
        let (min, max) = config.pipe_y;
        if min > max {
            return Err(Error::EmptyRange { min, max });
        }

        let mut bird = Sprite::new(config.bird_size);
        bird.position = (config.bird_x, size.height * 0.5).into();
        bird.z_order = 3;

        Ok(FlappyScene {
            rng: StdRng::seed_from_u64(config.seed),
            initial_layers: (skyline.clone(), ground.clone()),
            skyline,
            ground,
            bird,
            bird_speed: 0.0,
            pipes,
            pipes_done: Completions::new(),
            pipe_timer,
            crashed: false,
            config,
        })
    }

    #[inline]
    pub fn bird(&self) -> &Sprite {
        &self.bird
    }

    #[inline]
    pub fn bird_speed(&self) -> f32 {
        self.bird_speed
    }

    /// Degrees, nose up while climbing and nose down while falling.
    pub fn bird_rotation(&self) -> f32 {
        360.0 - (self.bird_speed * 0.2 + 60.0).max(-90.0).min(30.0)
    }

    #[inline]
    pub fn pipes(&self) -> &EntityPool<Sprite> {
        &self.pipes
    }

    #[inline]
    pub fn pipes_mut(&mut self) -> &mut EntityPool<Sprite> {
        &mut self.pipes
    }

    #[inline]
    pub fn layers(&self) -> (&ParallaxLayer, &ParallaxLayer) {
        (&self.skyline, &self.ground)
    }

    #[inline]
    pub fn has_crashed(&self) -> bool {
        self.crashed
    }

    pub fn flap(&mut self, audio: &mut dyn Audio) {
        audio.effect(WING_SOUND);
        self.bird_speed = self.config.flap_speed;
    }

    fn spawn_pipes(&mut self) {
        let (min, max) = self.config.pipe_y;
        let y = self.rng.gen_range(min..=max);
        let x = self.config.pipe_spawn_x;
        let travel = self.config.pipe_travel;
        let duration = self.config.pipe_duration;
        for &offset in &[0.0, self.config.pipe_offset] {
            let done = &self.pipes_done;
            self.pipes.spawn_with(|pipe, handle| {
                pipe.reset((x, y + offset).into());
                pipe.z_order = 1;
                pipe.move_by_then(travel, duration, done.token(handle));
            });
        }
        log::trace!("Pipe pair at y {}", y);
    }

    fn ground_hit(&self, bird: &Rect) -> bool {
        self.ground
            .positions()
            .iter()
            .any(|&position| Rect::centered(position, self.config.ground_size).intersects(bird))
    }

    fn crash(&mut self, audio: &mut dyn Audio) {
        audio.effect(HIT_SOUND);
        log::info!("game over!");
        self.crashed = true;
    }

    pub fn restart(&mut self, director: &Director) {
        log::info!("Restarting");
        let (skyline, ground) = self.initial_layers.clone();
        self.skyline = skyline;
        self.ground = ground;
        self.bird
            .reset((self.config.bird_x, director.size().height * 0.5).into());
        self.bird_speed = 0.0;
        self.pipes.clear();
        self.pipe_timer.reset();
        self.crashed = false;
    }
}

impl Scene for FlappyScene {
    fn update(&mut self, ctx: &mut Context, delta: f32) {
        if self.crashed {
            return;
        }
        self.skyline.update(delta);
        self.ground.update(delta);

        self.bird_speed += self.config.gravity * delta;
        let y = self.bird.position.y() + self.bird_speed * delta;
        self.bird.position.set_y(y);

        if self.pipe_timer.update(delta) {
            self.spawn_pipes();
        }
        for (_, pipe) in self.pipes.iter_active_mut() {
            pipe.step(delta);
        }
        self.pipes_done.drain(&mut self.pipes);

        let bird = self.bird.bounds();
        let pipe_hits = sweep_against(&bird, &mut self.pipes, |_| false);
        if pipe_hits > 0 || self.ground_hit(&bird) {
            self.crash(ctx.audio);
        }
    }

    fn touch_begin(&mut self, ctx: &mut Context, _point: Vector2) -> bool {
        if self.crashed {
            self.restart(ctx.director);
        } else {
            self.flap(ctx.audio);
        }
        true
    }

    fn snapshot(&self, out: &mut Snapshot) {
        out.push_layer(&self.skyline, self.config.skyline_size, -1);
        out.push_layer(&self.ground, self.config.ground_size, 2);
        out.push_pool(&self.pipes);
        out.push(&self.bird);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::AudioLog;

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> (FlappyScene, Director, AudioLog) {
        let director = Director::new((800.0, 600.0).into());
        let scene = FlappyScene::new(FlappyConfig::default(), &director).unwrap();
        (scene, director, AudioLog::default())
    }

    #[test]
    fn backgrounds_tile_with_overlap() {
        let (scene, _, _) = scene();
        let (skyline, ground) = scene.layers();
        assert_eq!(895.0, skyline.positions()[1].x());
        assert_eq!(30.0, ground.positions()[1].y());
    }

    #[test]
    fn bird_falls_and_hits_the_ground() {
        let (mut scene, mut director, mut audio) = scene();
        let mut ctx = Context {
            director: &mut director,
            audio: &mut audio,
        };
        for _ in 0..120 {
            scene.update(&mut ctx, DT);
        }
        assert!(scene.has_crashed());
        assert_eq!(1, audio.count(HIT_SOUND));
    }

    #[test]
    fn flapping_climbs() {
        let (mut scene, mut director, mut audio) = scene();
        let mut ctx = Context {
            director: &mut director,
            audio: &mut audio,
        };
        let start = scene.bird().position.y();
        scene.touch_begin(&mut ctx, Vector2::zero());
        scene.update(&mut ctx, DT);
        assert!(scene.bird().position.y() > start);
        assert_eq!(1, audio.count(WING_SOUND));
    }

    #[test]
    fn rotation_is_clamped() {
        let (mut scene, _, mut audio) = scene();
        assert_eq!(330.0, scene.bird_rotation());
        scene.flap(&mut audio);
        assert_eq!(330.0, scene.bird_rotation());
        scene.bird_speed = -300.0;
        assert_eq!(360.0, scene.bird_rotation());
        scene.bird_speed = -2000.0;
        assert_eq!(450.0, scene.bird_rotation());
    }

    #[test]
    fn pipes_come_in_pairs_every_interval() {
        let (mut scene, mut director, mut audio) = scene();
        let mut ctx = Context {
            director: &mut director,
            audio: &mut audio,
        };
        // Keep the bird aloft and out of the pipes' way
        for tick in 0..600 {
            if tick % 20 == 0 {
                scene.flap(ctx.audio);
            }
            scene.update(&mut ctx, 0.25);
            scene.bird.position.set_y(2000.0);
            scene.bird_speed = 0.0;
            if tick == 8 {
                assert_eq!(2, scene.pipes().active_count());
            }
        }
        assert!(!scene.has_crashed());
        assert!(scene.pipes().active_count() <= 6);
        assert_eq!(0, scene.pipes().overwrites());
    }

    #[test]
    fn pipe_contact_crashes_and_tap_restarts() {
        let (mut scene, mut director, mut audio) = scene();
        let mut ctx = Context {
            director: &mut director,
            audio: &mut audio,
        };
        let at = scene.bird().position;
        scene.pipes_mut().spawn_with(|pipe, _| pipe.reset(at));
        scene.update(&mut ctx, DT);
        assert!(scene.has_crashed());

        scene.touch_begin(&mut ctx, Vector2::zero());
        assert!(!scene.has_crashed());
        assert_eq!(0, scene.pipes().active_count());
        assert_eq!(300.0, scene.bird().position.y());
    }
}
