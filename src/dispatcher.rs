use parking_lot::Mutex;

use crate::client::{DbusClient, NotificationBackend, ServerInformation};
use crate::error::Result;
use crate::formatter;
use crate::types::{Options, PlaybackState, TrackIdentity, TrackInfo};

/// Shows now-playing notifications, skipping updates that would repeat the
/// one already on screen.
///
/// All methods take `&self`; calls from several threads are serialized on an
/// internal lock, so one notifier can sit behind an `Arc`.
pub struct Notifier<B: NotificationBackend = DbusClient> {
    options: Options,
    inner: Mutex<Inner<B>>,
}

struct Inner<B> {
    backend: B,
    last_track: Option<TrackIdentity>,
    /// Id of the last notification the daemon gave us, 0 if none
    replace_id: u32,
}

impl Notifier<DbusClient> {
    /// Connect to the session bus and verify a notification daemon is running.
    ///
    /// Fails with [`Error::Unavailable`](crate::Error::Unavailable) when either
    /// step fails; callers decide whether to run without notifications.
    pub fn new(options: Options) -> Result<Self> {
        let client = DbusClient::connect()?;
        log::info!("Desktop notifications enabled for {:?}", options.app_name);
        Ok(Self::with_backend(client, options))
    }
}

impl<B: NotificationBackend> Notifier<B> {
    pub fn with_backend(backend: B, options: Options) -> Self {
        Self {
            options,
            inner: Mutex::new(Inner {
                backend,
                last_track: None,
                replace_id: 0,
            }),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Show a notification if `track` differs from the last one shown.
    ///
    /// Nothing happens when there is no track, when nothing is playing
    /// (no title and no artist), when paused without `notify_on_pause`, or
    /// when title, artist and album match the previous update.
    ///
    /// The track is remembered before the daemon is called, so a failed
    /// call is not retried by repeating the same update; use
    /// [`notify_now`](Self::notify_now) for that.
    pub fn notify(&self, track: Option<&TrackInfo>, state: PlaybackState) -> Result<()> {
        let Some(track) = track else {
            return Ok(());
        };

        if track.is_empty() {
            log::debug!("Nothing playing, skipping notification");
            return Ok(());
        }

        if state == PlaybackState::Paused && !self.options.notify_on_pause {
            log::debug!("Paused, skipping notification for {:?}", track.title);
            return Ok(());
        }

        let mut inner = self.inner.lock();

        let identity = track.identity();
        if inner.last_track.as_ref() == Some(&identity) {
            log::debug!("Same track as last notification: {:?}", track.title);
            return Ok(());
        }
        inner.last_track = Some(identity);

        self.show(&mut inner, track, state)
    }

    /// Show a notification for `track` right away, without deduplication
    pub fn notify_now(&self, track: Option<&TrackInfo>, state: PlaybackState) -> Result<()> {
        let Some(track) = track else {
            return Ok(());
        };

        let mut inner = self.inner.lock();
        self.show(&mut inner, track, state)
    }

    /// Capability tokens advertised by the daemon (e.g. "actions", "body-markup")
    pub fn capabilities(&self) -> Result<Vec<String>> {
        self.inner.lock().backend.capabilities()
    }

    pub fn server_information(&self) -> Result<ServerInformation> {
        self.inner.lock().backend.server_information()
    }

    /// Close the notification we last showed, if the daemon gave us an id
    pub fn dismiss(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.replace_id == 0 {
            return Ok(());
        }

        let id = inner.replace_id;
        inner.backend.close_notification(id)?;
        inner.replace_id = 0;
        log::debug!("Closed notification {}", id);
        Ok(())
    }

    /// Release the bus connection. Later calls fail with a transport error.
    pub fn close(&self) {
        self.inner.lock().backend.close();
    }

    fn show(&self, inner: &mut Inner<B>, track: &TrackInfo, state: PlaybackState) -> Result<()> {
        let notification = formatter::format(track, state, &self.options);

        let replace_id = if self.options.replace_existing {
            inner.replace_id
        } else {
            0
        };

        let id = inner.backend.notify(&notification, replace_id).map_err(|e| {
            log::warn!("Failed to show notification for {:?}: {}", track.title, e);
            e
        })?;

        if self.options.replace_existing {
            inner.replace_id = id;
        }

        log::info!("Notified: {} - {}", notification.summary, track.artist);
        Ok(())
    }
}

impl<B: NotificationBackend> Drop for Notifier<B> {
    fn drop(&mut self) {
        self.inner.get_mut().backend.close();
    }
}
