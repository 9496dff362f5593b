use crate::{
    collections::EntityPool,
    engine::{
        sweep, sweep_against, Audio, Bounded, Completions, Context, Director, Expiry,
        ParallaxLayer, Resolution, Scene, Snapshot, SpawnTimer, Sprite,
    },
    math::{Size, Vector2},
    util::Error,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct SpaceConfig {
    pub asteroid_capacity: usize,
    pub laser_capacity: usize,
    pub lives: u32,
    /// Seconds between asteroids, drawn uniformly.
    pub asteroid_cadence: (f32, f32),
    /// Whole seconds an asteroid takes to cross the screen, drawn uniformly.
    pub asteroid_travel: (u32, u32),
    pub laser_travel: f32,
    /// Units per tick.
    pub dust_speed: f32,
    pub ship_size: Size,
    pub asteroid_size: Size,
    pub laser_size: Size,
    pub dust_size: Size,
    pub seed: u64,
}

impl Default for SpaceConfig {
    fn default() -> SpaceConfig {
        SpaceConfig {
            asteroid_capacity: 15,
            laser_capacity: 5,
            lives: 3,
            asteroid_cadence: (0.5, 1.2),
            asteroid_travel: (2, 10),
            laser_travel: 0.5,
            dust_speed: 5.0,
            ship_size: Size::new(58.0, 34.0),
            asteroid_size: Size::new(44.0, 44.0),
            laser_size: Size::new(26.0, 6.0),
            dust_size: Size::new(1024.0, 256.0),
            seed: 0,
        }
    }
}

const LASER_SOUND: &str = "laser_ship";
const EXPLOSION_SOUND: &str = "explosion_large";
const MUSIC: &str = "background_music";

/// Fly a ship through an asteroid field and shoot what gets in the way.
pub struct SpaceScene {
    config: SpaceConfig,
    rng: StdRng,
    ship: Sprite,
    ship_speed: f32,
    dust: ParallaxLayer,
    initial_dust: ParallaxLayer,
    asteroids: EntityPool<Sprite>,
    asteroids_done: Completions<Sprite>,
    asteroid_timer: SpawnTimer,
    lasers: EntityPool<Sprite>,
    lasers_done: Completions<Sprite>,
    lives: u32,
    score: u32,
    game_over: bool,
}

impl SpaceScene {
    pub fn new(
        config: SpaceConfig,
        director: &Director,
        audio: &mut dyn Audio,
    ) -> Result<SpaceScene, Error> {
        let size = director.size();

        let mut ship = Sprite::new(config.ship_size);
        ship.position = (size.width * 0.1, size.height * 0.5).into();
        ship.z_order = 1;

        let dust = ParallaxLayer::new(
            2,
            config.dust_size.width,
            0.0,
            config.dust_speed,
            (0.0, size.height * 0.5).into(),
        )?;
        let asteroid_size = config.asteroid_size;
        let asteroids = EntityPool::from_fn(config.asteroid_capacity, |_| {
            Sprite::new(asteroid_size)
        })?;
        let laser_size = config.laser_size;
        let lasers = EntityPool::from_fn(config.laser_capacity, |_| Sprite::new(laser_size))?;
        let (min, max) = config.asteroid_cadence;
        let asteroid_timer = SpawnTimer::uniform_seeded(min, max, config.seed)?.primed();
        if config.asteroid_travel.0 > config.asteroid_travel.1 {
            return Err(Error::EmptyRange {
                min: config.asteroid_travel.0 as f32,
                max: config.asteroid_travel.1 as f32,
            });
        }

        audio.play(MUSIC, true);

        Ok(SpaceScene {
            rng: StdRng::seed_from_u64(config.seed.wrapping_add(1)),
            ship,
            ship_speed: 0.0,
            initial_dust: dust.clone(),
            dust,
            asteroids,
            asteroids_done: Completions::new(),
            asteroid_timer,
            lasers,
            lasers_done: Completions::new(),
            lives: config.lives,
            score: 0,
            game_over: false,
            config,
        })
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn ship(&self) -> &Sprite {
        &self.ship
    }

    #[inline]
    pub fn asteroids(&self) -> &EntityPool<Sprite> {
        &self.asteroids
    }

    #[inline]
    pub fn asteroids_mut(&mut self) -> &mut EntityPool<Sprite> {
        &mut self.asteroids
    }

    #[inline]
    pub fn lasers(&self) -> &EntityPool<Sprite> {
        &self.lasers
    }

    #[inline]
    pub fn dust(&self) -> &ParallaxLayer {
        &self.dust
    }

    /// The text to put up once the run is over.
    pub fn message(&self) -> Option<String> {
        if self.game_over {
            Some(format!(
                "Game Over!\nYour score is {}\nTap to restart",
                self.score
            ))
        } else {
            None
        }
    }

    /// Turn an accelerometer reading into a vertical ship speed.
    pub fn steer(&mut self, acceleration: Vector2, visible_height: f32) {
        const FILTERING_FACTOR: f32 = 0.1;
        const REST_ACCEL: f32 = -0.6;
        const MAX_DIFF: f32 = 0.2;

        let max_points_per_sec = visible_height * 0.5;
        let x = acceleration.y();
        let mut rolling = x * FILTERING_FACTOR;
        rolling += rolling * (1.0 - FILTERING_FACTOR);
        let accel = x - rolling;
        let fraction = (accel - REST_ACCEL) / MAX_DIFF;
        self.ship_speed = max_points_per_sec * fraction;
    }

    pub fn fire_laser(&mut self, ctx: &mut Context) {
        ctx.audio.effect(LASER_SOUND);

        let origin = self.ship.position;
        let screen = ctx.director.visible_rect();
        let distance = ctx.director.size().width;
        let travel = self.config.laser_travel;
        let done = &self.lasers_done;
        self.lasers.spawn_with(|laser, handle| {
            let start = origin + Vector2::new(laser.size.width * 0.5, 0.0);
            laser.reset(start);
            laser.set_expiry(Expiry::Outside(screen));
            laser.move_by_then((distance, 0.0).into(), travel, done.token(handle));
        });
    }

    fn spawn_asteroid(&mut self, visible: Size) {
        let y = self.rng.gen_range(0.0..=visible.height);
        let (min, max) = self.config.asteroid_travel;
        let travel = self.rng.gen_range(min..=max) as f32;
        let done = &self.asteroids_done;
        let handle = self.asteroids.spawn_with(|asteroid, handle| {
            let width = asteroid.size.width;
            asteroid.reset((visible.width + width * 0.5, y).into());
            asteroid.move_by_then((-visible.width - width, 0.0).into(), travel, done.token(handle));
        });
        log::trace!("Asteroid {:?} at y {} for {}s", handle, y, travel);
    }

    fn finish(&mut self) {
        log::info!("Game over with a score of {}", self.score);
        self.game_over = true;
    }

    pub fn restart(&mut self, ctx: &mut Context) {
        log::info!("Restarting");
        let size = ctx.director.size();
        self.ship.reset((size.width * 0.1, size.height * 0.5).into());
        self.ship_speed = 0.0;
        self.dust = self.initial_dust.clone();
        self.asteroids.clear();
        self.lasers.clear();
        self.asteroid_timer.prime();
        self.lives = self.config.lives;
        self.score = 0;
        self.game_over = false;
        ctx.audio.play(MUSIC, true);
    }
}

impl Scene for SpaceScene {
    fn update(&mut self, ctx: &mut Context, delta: f32) {
        if self.game_over {
            return;
        }
        let visible = ctx.director.size();

        self.dust.update(delta);

        let half = self.ship.size.height * 0.5;
        let y = (self.ship.position.y() + self.ship_speed * delta)
            .max(half)
            .min(visible.height - half);
        self.ship.position.set_y(y);
        self.ship.step(delta);

        if self.asteroid_timer.update(delta) {
            self.spawn_asteroid(visible);
        }

        for (_, asteroid) in self.asteroids.iter_active_mut() {
            asteroid.step(delta);
        }
        for (_, laser) in self.lasers.iter_active_mut() {
            laser.step(delta);
        }
        self.asteroids_done.drain(&mut self.asteroids);
        self.lasers_done.drain(&mut self.lasers);
        self.lasers.recycle_where(Sprite::is_expired);

        let audio = &mut *ctx.audio;
        let destroyed = sweep(&mut self.asteroids, &mut self.lasers, |_| {
            audio.effect(EXPLOSION_SOUND);
            Resolution::DeactivateBoth
        });
        self.score += destroyed as u32;

        let ship = self.ship.bounds();
        let hits = sweep_against(&ship, &mut self.asteroids, |_| true);
        if hits > 0 {
            log::debug!("Ship hit by {} asteroid(s)", hits);
            self.lives = self.lives.saturating_sub(hits as u32);
            self.ship.blink(9, 1.0);
        }

        if self.lives == 0 {
            self.finish();
        }
    }

    fn touch_begin(&mut self, ctx: &mut Context, _point: Vector2) -> bool {
        if self.game_over {
            self.restart(ctx);
        } else {
            self.fire_laser(ctx);
        }
        true
    }

    fn accelerate(&mut self, ctx: &mut Context, acceleration: Vector2) {
        self.steer(acceleration, ctx.director.size().height);
    }

    fn snapshot(&self, out: &mut Snapshot) {
        out.push_layer(&self.dust, self.config.dust_size, -1);
        out.push_pool(&self.asteroids);
        out.push_pool(&self.lasers);
        out.push(&self.ship);
    }
}
