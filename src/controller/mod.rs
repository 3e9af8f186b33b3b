//! Controller module - Application logic and event handling
//!
//! The controller receives its collaborators explicitly: the backend
//! [`Catalog`] and the [`Player`]. It is organized into submodules by
//! responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Location changes, list changes and data loading
//! - `actions`: Play, playlist, favorite and open-detail actions

mod actions;
mod input;
mod navigation;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{ApiError, AppModel, Catalog, PlaybackInfo, Player};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) catalog: Arc<dyn Catalog>,
    pub(crate) player: Arc<dyn Player>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        catalog: Arc<dyn Catalog>,
        player: Arc<dyn Player>,
    ) -> Self {
        Self {
            model,
            catalog,
            player,
        }
    }

    pub async fn playback_info(&self) -> PlaybackInfo {
        self.player.playback_info().await
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        match error.downcast_ref::<ApiError>() {
            Some(api_error) => api_error.user_message(),
            None => format!("Error: {}", error),
        }
    }
}
