/// Platform lifecycle notifications, forwarded by whatever hosts the game.
///
/// Android delivers resume/pause from the activity; iOS delivers foreground/background from
/// the app delegate. Implementors get no-op defaults for the ones they don't care about.
pub trait Lifecycle {
    fn on_resume(&mut self) {}

    fn on_pause(&mut self) {}

    fn on_foreground(&mut self) {}

    fn on_background(&mut self) {}
}
