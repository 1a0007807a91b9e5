//! Now-playing desktop notifications over the freedesktop.org
//! `org.freedesktop.Notifications` D-Bus interface.
//!
//! ```no_run
//! use nowplaying_notify::{Notifier, Options, PlaybackState, TrackInfo};
//!
//! let notifier = Notifier::new(Options::new("My Player"))?;
//! let track = TrackInfo::new("Title", "Artist", "Album");
//! notifier.notify(Some(&track), PlaybackState::Playing)?;
//! # Ok::<(), nowplaying_notify::Error>(())
//! ```

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod feed;
pub mod formatter;
pub mod gateway;
pub mod types;

pub use client::{DbusClient, NotificationBackend, ServerInformation};
pub use dispatcher::Notifier;
pub use error::{Error, Result};
pub use formatter::Notification;
pub use types::{Options, PlaybackState, TrackIdentity, TrackInfo};
