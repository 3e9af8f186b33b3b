//! Playback collaborator and the in-session player implementation

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::catalog::Catalog;
use super::track::Track;

/// Receives play and playlist requests from the controller
#[async_trait]
pub trait Player: Send + Sync {
    async fn play_track(&self, track: &Track) -> anyhow::Result<()>;

    /// Append a track to the session playlist. Returns `false` when it is
    /// already there.
    async fn add_to_playlist(&self, track: &Track) -> anyhow::Result<bool>;

    async fn playback_info(&self) -> PlaybackInfo;
}

/// Timing state for a smooth progress bar without a playback engine
#[derive(Clone)]
pub struct PlaybackTiming {
    pub position_ms: u32,
    pub last_update: Instant,
    pub is_playing: bool,
    pub duration_ms: u32,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_ms: 0,
            last_update: Instant::now(),
            is_playing: false,
            duration_ms: 0,
        }
    }
}

impl PlaybackTiming {
    pub fn start(duration_secs: u32) -> Self {
        Self {
            position_ms: 0,
            last_update: Instant::now(),
            is_playing: true,
            duration_ms: duration_secs.saturating_mul(1000),
        }
    }

    pub fn current_position_ms(&self) -> u32 {
        if self.is_playing && self.duration_ms > 0 {
            let elapsed = u32::try_from(self.last_update.elapsed().as_millis()).unwrap_or(u32::MAX);
            self.position_ms.saturating_add(elapsed).min(self.duration_ms)
        } else {
            self.position_ms.min(self.duration_ms)
        }
    }

    /// Still playing, i.e. started and not yet at the end
    pub fn is_running(&self) -> bool {
        self.is_playing && (self.duration_ms == 0 || self.current_position_ms() < self.duration_ms)
    }
}

/// Snapshot of the player for rendering
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub progress_ms: u32,
    pub duration_ms: u32,
    pub is_playing: bool,
    pub playlist_len: usize,
}

#[derive(Default)]
struct SessionState {
    now_playing: Option<Track>,
    timing: PlaybackTiming,
    playlist: Vec<Track>,
}

/// Player that lives for the terminal session: tracks what is "playing" and
/// reports plays to the library so recently-played stays current.
pub struct SessionPlayer {
    catalog: Arc<dyn Catalog>,
    state: Mutex<SessionState>,
}

impl SessionPlayer {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            state: Mutex::new(SessionState::default()),
        }
    }
}

#[async_trait]
impl Player for SessionPlayer {
    async fn play_track(&self, track: &Track) -> anyhow::Result<()> {
        tracing::info!(track_id = %track.id, title = %track.title, "Playing track");
        {
            let mut state = self.state.lock().await;
            state.now_playing = Some(track.clone());
            state.timing = PlaybackTiming::start(track.duration_secs);
        }

        // The track plays even if the server does not take the play event
        if let Err(e) = self.catalog.record_play(&track.id).await {
            tracing::warn!(track_id = %track.id, error = %e, "Failed to record play");
        }
        Ok(())
    }

    async fn add_to_playlist(&self, track: &Track) -> anyhow::Result<bool> {
        let mut state = self.state.lock().await;
        if state.playlist.iter().any(|t| t.id == track.id) {
            tracing::debug!(track_id = %track.id, "Track already in playlist");
            return Ok(false);
        }
        state.playlist.push(track.clone());
        tracing::info!(track_id = %track.id, len = state.playlist.len(), "Added track to playlist");
        Ok(true)
    }

    async fn playback_info(&self) -> PlaybackInfo {
        let state = self.state.lock().await;
        PlaybackInfo {
            track: state.now_playing.clone(),
            progress_ms: state.timing.current_position_ms(),
            duration_ms: state.timing.duration_ms,
            is_playing: state.timing.is_running(),
            playlist_len: state.playlist.len(),
        }
    }
}
