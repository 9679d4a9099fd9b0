//! Sound effects for reveals and explosions.

use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::AudioError;

/// Sound effect triggered by a change on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sound {
    /// One or more cells were revealed.
    Break,
    /// A mine was revealed.
    Boom,
}

const SOUND_FILES: &[(Sound, &str)] = &[(Sound::Break, "break"), (Sound::Boom, "boom")];

/// Sink for sound effects.
pub trait SoundPlayer {
    /// Starts playing `sound` without waiting for it to finish.
    fn play(&mut self, sound: Sound);
}

/// Player that discards every sound.
#[derive(Debug, Default, Copy, Clone)]
pub struct Silent;
impl SoundPlayer for Silent {
    fn play(&mut self, _sound: Sound) {}
}

type SoundData = Buffered<Decoder<Cursor<Vec<u8>>>>;

/// Sound effects played on the default output device.
pub struct Audio {
    // Playback stops when the stream is dropped.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds: BTreeMap<Sound, SoundData>,
}
impl Audio {
    /// Opens the default output device and loads sounds from `dir`.
    ///
    /// Sounds that fail to load are logged and stay silent.
    pub fn open(dir: &Path) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;

        let mut sounds = BTreeMap::new();
        for &(sound, name) in SOUND_FILES {
            match load_sound(&sound_path(dir, name)) {
                Ok(data) => {
                    sounds.insert(sound, data);
                }
                Err(e) => log::warn!("{}, {:?} will not be played", e, sound),
            }
        }
        log::info!("Loaded {} sounds from {}", sounds.len(), dir.display());

        Ok(Self {
            _stream: stream,
            handle,
            sounds,
        })
    }
}
impl SoundPlayer for Audio {
    fn play(&mut self, sound: Sound) {
        if let Some(data) = self.sounds.get(&sound) {
            if let Err(e) = self.handle.play_raw(data.clone().convert_samples()) {
                log::warn!("Failed to play {:?}: {}", sound, e);
            }
        }
    }
}

/// Returns the player to use for this session, falling back to silence when
/// there is no output device.
pub fn open_or_silent(dir: &Path) -> Box<dyn SoundPlayer> {
    match Audio::open(dir) {
        Ok(audio) => Box::new(audio),
        Err(e) => {
            log::warn!("{}, continuing without sound", e);
            Box::new(Silent)
        }
    }
}

fn load_sound(path: &Path) -> Result<SoundData, AudioError> {
    let bytes = std::fs::read(path).map_err(|source| AudioError::Io {
        path: path.to_owned(),
        source,
    })?;
    let decoder = Decoder::new(Cursor::new(bytes)).map_err(|source| AudioError::Decode {
        path: path.to_owned(),
        source,
    })?;
    Ok(decoder.buffered())
}

fn sound_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.flac", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sound_has_a_file() {
        for sound in [Sound::Break, Sound::Boom] {
            assert!(SOUND_FILES.iter().any(|&(s, _)| s == sound));
        }
        assert_eq!(
            sound_path(Path::new("sfx"), "boom"),
            Path::new("sfx").join("boom.flac"),
        );
    }

    #[test]
    fn test_missing_sound_file() {
        let path = Path::new("sfx").join("does-not-exist.flac");
        match load_sound(&path) {
            Err(AudioError::Io { path: p, .. }) => assert_eq!(p, path),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("loaded a missing file"),
        }
    }
}
