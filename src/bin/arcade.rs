use arcade::{
    engine::{Director, FrameClock, Lifecycle, Logged, Runner, Scene},
    game::{FlappyConfig, FlappyScene, SpaceConfig, SpaceScene},
    math::Vector2,
    util::{self, BoxedError},
};

use log::LevelFilter;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Headless frames run at this rate no matter how irregular the simulated host frames are.
const UPDATE_RATE_HZ: f32 = 60.0;

/// How often the simulated player taps the screen, in updates.
const TAP_INTERVAL: u64 = 45;

fn build_scene(name: &str, seed: u64, director: &Director) -> Result<Box<dyn Scene>, BoxedError> {
    let mut audio = Logged;
    match name {
        "space" => {
            let config = SpaceConfig {
                seed,
                ..SpaceConfig::default()
            };
            Ok(Box::new(SpaceScene::new(config, director, &mut audio)?))
        }
        "flappy" => {
            let config = FlappyConfig {
                seed,
                ..FlappyConfig::default()
            };
            Ok(Box::new(FlappyScene::new(config, director)?))
        }
        other => util::boxed_err(format!(
            "Unknown scene {:?}, expected \"space\" or \"flappy\"",
            other
        )),
    }
}

fn main() -> Result<(), BoxedError> {
    env_logger::builder()
        .filter_level(LevelFilter::Error)
        .filter_module("arcade", LevelFilter::Debug)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let name = args.get(0).map(String::as_str).unwrap_or("space");
    let updates: u64 = util::arg_or(&args, 1, "update count", 1800)?;
    let seed: u64 = util::arg_or(&args, 2, "seed", 0)?;

    let mut director = Director::new((800.0, 600.0).into());
    director.set_show_stats(true);
    let scene = build_scene(name, seed, &director)?;
    let mut runner = Runner::new(director, Box::new(Logged), scene);

    // Host frames arrive with jitter; the clock turns them into fixed updates
    let mut host = StdRng::seed_from_u64(seed);
    let mut clock = FrameClock::new(UPDATE_RATE_HZ);
    let mut host_frames = 0u64;

    while runner.frames() < updates && !runner.director().has_ended() {
        host_frames += 1;
        let elapsed = host.gen_range(0.008..0.034);
        for _ in 0..clock.advance(elapsed) {
            if runner.tick(clock.step()) && runner.frames() % TAP_INTERVAL == 0 {
                runner.touch(Vector2::zero());
            }
        }

        // Simulate the app being sent to the background for a moment
        if host_frames == 600 {
            runner.on_background();
        } else if host_frames == 660 {
            runner.on_foreground();
        }
    }

    log::info!(
        "Ran {} updates over {} host frames, last frame had {} sprites ({} bytes)",
        runner.frames(),
        host_frames,
        runner.snapshot().len(),
        runner.snapshot().to_bytes().len()
    );
    Ok(())
}
