use std::path::PathBuf;
use tessera_core::SoundOutput;

/// Resolves sound names against a directory and logs playback instead of
/// driving an audio device.
pub struct LoggedSound {
    dir: PathBuf,
    loaded: Option<PathBuf>,
    pub played: usize,
}

impl LoggedSound {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            loaded: None,
            played: 0,
        }
    }
}

impl SoundOutput for LoggedSound {
    fn load_sound(&mut self, name: &str) -> bool {
        let path = self.dir.join(name);
        if !path.is_file() {
            tracing::warn!("Sound file {:?} not found", path);
            return false;
        }
        tracing::debug!("Loaded sound {:?}", path);
        self.loaded = Some(path);
        true
    }

    fn play_sound(&mut self) {
        match &self.loaded {
            Some(path) => {
                self.played += 1;
                tracing::info!("Playing {:?}", path);
            }
            None => tracing::warn!("Play requested with no sound loaded"),
        }
    }
}
