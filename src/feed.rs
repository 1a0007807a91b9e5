//! Drives a [`Notifier`] from newline-delimited JSON player updates.
//!
//! ```text
//! {"type":"now_playing","track":{"title":"A","artist":"B","album":"C"},"state":"playing"}
//! {"type":"show","track":{"title":"A"},"state":"paused"}
//! {"type":"dismiss"}
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::BufRead;

use crate::client::NotificationBackend;
use crate::dispatcher::Notifier;
use crate::types::{PlaybackState, TrackInfo};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    /// Regular player update, deduplicated
    NowPlaying {
        track: Option<TrackInfo>,
        state: PlaybackState,
    },
    /// Explicit show request, never deduplicated
    Show {
        track: Option<TrackInfo>,
        state: PlaybackState,
    },
    Dismiss,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub handled: usize,
    pub malformed: usize,
    pub failed: usize,
}

/// Read messages until EOF.
///
/// Malformed lines and failed daemon calls are logged and skipped; only a
/// read error on `reader` ends the loop early.
pub fn run<R: BufRead, B: NotificationBackend>(reader: R, notifier: &Notifier<B>) -> Result<FeedStats> {
    let mut stats = FeedStats::default();

    for line in reader.lines() {
        let line = line.context("Failed to read player update")?;
        if line.trim().is_empty() {
            continue;
        }

        log::debug!("Feed: {}", line);

        let message = match serde_json::from_str::<FeedMessage>(&line) {
            Ok(message) => message,
            Err(e) => {
                log::error!("Failed to parse player update: {} - {}", e, line);
                stats.malformed += 1;
                continue;
            }
        };

        match handle_message(message, notifier) {
            Ok(()) => stats.handled += 1,
            Err(e) => {
                log::error!("Error handling player update: {}", e);
                stats.failed += 1;
            }
        }
    }

    log::info!(
        "Feed ended: {} handled, {} malformed, {} failed",
        stats.handled,
        stats.malformed,
        stats.failed
    );
    Ok(stats)
}

fn handle_message<B: NotificationBackend>(message: FeedMessage, notifier: &Notifier<B>) -> crate::Result<()> {
    match message {
        FeedMessage::NowPlaying { track, state } => notifier.notify(track.as_ref(), state),
        FeedMessage::Show { track, state } => notifier.notify_now(track.as_ref(), state),
        FeedMessage::Dismiss => notifier.dismiss(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_message_kind() {
        let msg: FeedMessage = serde_json::from_str(
            r#"{"type":"now_playing","track":{"title":"A","artist":"B","album":"C"},"state":"playing"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            FeedMessage::NowPlaying {
                track: Some(TrackInfo::new("A", "B", "C")),
                state: PlaybackState::Playing,
            }
        );

        let msg: FeedMessage = serde_json::from_str(r#"{"type":"show","track":null,"state":"stopped"}"#).unwrap();
        assert_eq!(
            msg,
            FeedMessage::Show {
                track: None,
                state: PlaybackState::Stopped,
            }
        );

        let msg: FeedMessage = serde_json::from_str(r#"{"type":"dismiss"}"#).unwrap();
        assert_eq!(msg, FeedMessage::Dismiss);
    }

    #[test]
    fn rejects_unknown_state() {
        assert!(serde_json::from_str::<FeedMessage>(r#"{"type":"now_playing","state":"buffering"}"#).is_err());
    }
}
