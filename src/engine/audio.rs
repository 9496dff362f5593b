/// Fire-and-forget sound playback. Nothing comes back from the mixer.
pub trait Audio {
    fn play(&mut self, name: &str, looping: bool);

    #[inline]
    fn effect(&mut self, name: &str) {
        self.play(name, false)
    }
}

/// Drops every request.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    #[inline]
    fn play(&mut self, _name: &str, _looping: bool) {}
}

/// Writes every request to the log.
#[derive(Debug, Default)]
pub struct Logged;

impl Audio for Logged {
    fn play(&mut self, name: &str, looping: bool) {
        log::info!("play {} (looping: {})", name, looping);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cue {
    pub name: String,
    pub looping: bool,
}

/// Keeps every request around for later inspection.
#[derive(Debug, Default)]
pub struct AudioLog {
    cues: Vec<Cue>,
}

impl AudioLog {
    #[inline]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn count(&self, name: &str) -> usize {
        self.cues.iter().filter(|cue| cue.name == name).count()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl Audio for AudioLog {
    fn play(&mut self, name: &str, looping: bool) {
        self.cues.push(Cue {
            name: name.to_string(),
            looping,
        });
    }
}
