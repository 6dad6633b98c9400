//! Sound effects and music playlists.
//!
//! Decoding and mixing belong to an [`AudioBackend`]. [`Sound`] sits in front
//! of it: it caches handles, degrades missing files to a dummy handle (each
//! reported once), and turns into a no-op when sound is disabled or the backend
//! is unavailable.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;
use variantly::Variantly;

use crate::data_paths::data_path;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The device or mixer cannot be used at all.
    #[error("audio unavailable: {0}")]
    Unavailable(String),
    #[error("cannot load {path}: {reason}")]
    Missing { path: String, reason: String },
}

/// A loaded sound, or the silent stand-in for one that failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Variantly)]
pub enum SoundHandle {
    Dummy,
    Loaded(PathBuf),
}

/// An ordered list of music pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub pieces: Vec<SoundHandle>,
    pub random: bool,
    pub repeat: bool,
}

/// Platform audio used by [`Sound`].
pub trait AudioBackend {
    /// Check that a file can be played.
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    fn play(&mut self, _path: &Path) {}
    /// Replace the background music. `None` stops it.
    fn start_playlist(&mut self, _playlist: Option<&Playlist>) {}
}

/// Accepts any existing file and plays nothing.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(AudioError::Missing {
                path: path.display().to_string(),
                reason: "no such file".into(),
            })
        }
    }

    fn play(&mut self, path: &Path) {
        debug!("(silent) play {}", path.display());
    }

    fn start_playlist(&mut self, playlist: Option<&Playlist>) {
        debug!("(silent) playlist {:?}", playlist.map(|p| p.pieces.len()));
    }
}

/// Observable audio events, for tests and the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioEvent {
    Play { path: PathBuf },
    Playlist { pieces: Option<usize> },
}

/// Backend that loads everything and records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    events: Rc<RefCell<Vec<AudioEvent>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AudioEvent> {
        self.events.borrow().clone()
    }
}

impl AudioBackend for RecordingBackend {
    fn load(&mut self, _path: &Path) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, path: &Path) {
        self.events.borrow_mut().push(AudioEvent::Play {
            path: path.to_path_buf(),
        });
    }

    fn start_playlist(&mut self, playlist: Option<&Playlist>) {
        self.events.borrow_mut().push(AudioEvent::Playlist {
            pieces: playlist.map(|p| p.pieces.len()),
        });
    }
}

/// Front end to the audio backend.
pub struct Sound {
    backend: Option<Box<dyn AudioBackend>>,
    root: PathBuf,
    cache: HashMap<String, SoundHandle>,
    missing: HashSet<String>,
    playlist: Option<Playlist>,
    stashed: HashMap<String, Option<Playlist>>,
}

impl Sound {
    /// Sounds are read from `data/sounds`.
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self::with_root(backend, data_path("sounds"))
    }

    pub fn with_root(backend: Box<dyn AudioBackend>, root: impl Into<PathBuf>) -> Self {
        Self {
            backend: Some(backend),
            root: root.into(),
            cache: HashMap::new(),
            missing: HashSet::new(),
            playlist: None,
            stashed: HashMap::new(),
        }
    }

    /// Every call is a no-op.
    pub fn disabled() -> Self {
        Self {
            backend: None,
            root: PathBuf::new(),
            cache: HashMap::new(),
            missing: HashSet::new(),
            playlist: None,
            stashed: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Turn sound off for the rest of the session.
    pub fn disable(&mut self) {
        if self.backend.take().is_some() {
            info!("sound disabled");
        }
        self.cache.clear();
        self.playlist = None;
    }

    fn no_sound(&mut self, err: &AudioError) {
        warn!("get_sound: {err}");
        warn!("get_sound: sound not available, continuing without it");
        self.disable();
    }

    /// Look up a sound file, loading it on first use.
    pub fn get_sound(&mut self, name: &str) -> SoundHandle {
        let Some(backend) = self.backend.as_mut() else {
            return SoundHandle::Dummy;
        };
        if let Some(handle) = self.cache.get(name) {
            return handle.clone();
        }
        let path = self.root.join(name);
        match backend.load(&path) {
            Ok(()) => {
                let handle = SoundHandle::Loaded(path);
                self.cache.insert(name.to_string(), handle.clone());
                handle
            },
            Err(err @ AudioError::Unavailable(_)) => {
                self.no_sound(&err);
                SoundHandle::Dummy
            },
            Err(err) => {
                if self.missing.insert(name.to_string()) {
                    warn!("{err}");
                }
                SoundHandle::Dummy
            },
        }
    }

    pub fn play_sound(&mut self, name: &str) {
        if let SoundHandle::Loaded(path) = self.get_sound(name)
            && let Some(backend) = self.backend.as_mut()
        {
            backend.play(&path);
        }
    }

    /// Build a playlist from file names. Random playlists are shuffled once here.
    pub fn get_playlist(&mut self, pieces: &[&str], random: bool, repeat: bool) -> Playlist {
        let mut handles: Vec<SoundHandle> = pieces.iter().map(|name| self.get_sound(name)).collect();
        if random {
            handles.shuffle(&mut rand::rng());
        }
        Playlist {
            pieces: handles,
            random,
            repeat,
        }
    }

    /// Replace the background music; `None` silences it.
    pub fn change_playlist(&mut self, playlist: Option<Playlist>) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.start_playlist(playlist.as_ref());
        self.playlist = playlist;
    }

    pub fn current_playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    /// Remember the current playlist under `owner` and stop the music.
    pub fn stash_playlist(&mut self, owner: &str) {
        if !self.is_enabled() {
            return;
        }
        self.stashed.insert(owner.to_string(), self.playlist.clone());
        self.change_playlist(None);
    }

    /// Resume whatever `owner` stashed. Does nothing if nothing was stashed.
    pub fn restore_playlist(&mut self, owner: &str) {
        if let Some(playlist) = self.stashed.remove(owner) {
            self.change_playlist(playlist);
        }
    }
}

impl std::fmt::Debug for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sound")
            .field("enabled", &self.is_enabled())
            .field("root", &self.root)
            .field("cached", &self.cache.len())
            .field("playlist", &self.playlist)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenBackend;

    impl AudioBackend for BrokenBackend {
        fn load(&mut self, _path: &Path) -> Result<(), AudioError> {
            Err(AudioError::Unavailable("no mixer".into()))
        }
    }

    #[test]
    fn disabled_sound_hands_out_dummies() {
        let mut sound = Sound::disabled();
        assert!(sound.get_sound("beep550.ogg").is_dummy());
        sound.change_playlist(Some(Playlist {
            pieces: Vec::new(),
            random: false,
            repeat: true,
        }));
        assert!(sound.current_playlist().is_none());
    }

    #[test]
    fn missing_files_degrade_to_dummy_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("beep550.ogg"), b"ogg").expect("write");
        let mut sound = Sound::with_root(Box::new(SilentBackend), dir.path());

        assert!(sound.get_sound("beep550.ogg").is_loaded());
        assert!(sound.get_sound("gone.ogg").is_dummy());
        assert!(sound.get_sound("gone.ogg").is_dummy());
        assert_eq!(sound.missing.len(), 1);
        assert!(sound.is_enabled());
    }

    #[test]
    fn unavailable_backend_disables_sound() {
        let mut sound = Sound::with_root(Box::new(BrokenBackend), "sounds");
        assert!(sound.get_sound("beep1.ogg").is_dummy());
        assert!(!sound.is_enabled());
    }

    #[test]
    fn stash_and_restore_round_trip_the_playlist() {
        let backend = RecordingBackend::new();
        let mut sound = Sound::with_root(Box::new(backend.clone()), "sounds");
        let playlist = sound.get_playlist(&["beep1.ogg", "beep2.ogg", "beep3.ogg"], true, true);
        assert_eq!(playlist.pieces.len(), 3);
        sound.change_playlist(Some(playlist.clone()));

        sound.stash_playlist("bridge_comp_detail");
        assert!(sound.current_playlist().is_none());
        sound.restore_playlist("bridge_comp_detail");
        assert_eq!(sound.current_playlist(), Some(&playlist));

        assert_eq!(
            backend.events(),
            vec![
                AudioEvent::Playlist { pieces: Some(3) },
                AudioEvent::Playlist { pieces: None },
                AudioEvent::Playlist { pieces: Some(3) },
            ]
        );
    }
}
