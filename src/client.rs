//! Calls into the `org.freedesktop.Notifications` interface.

use std::collections::HashMap;
use zbus::proxy;
use zbus::zvariant::{Signature, Value};

use crate::error::{Error, Result};
use crate::formatter::Notification;
use crate::gateway::{self, SessionBus, NOTIFICATIONS_INTERFACE, NOTIFICATIONS_PATH, NOTIFICATIONS_SERVICE};

#[allow(clippy::too_many_arguments)]
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;

    fn close_notification(&self, id: u32) -> zbus::Result<()>;

    fn get_server_information(&self) -> zbus::Result<(String, String, String, String)>;
}

/// Name, vendor, version and spec version reported by the daemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInformation {
    pub name: String,
    pub vendor: String,
    pub version: String,
    pub spec_version: String,
}

/// The remote side of a notifier.
///
/// `DbusClient` talks to the real daemon; hosts without a session bus can
/// plug in an inert implementation instead.
pub trait NotificationBackend {
    /// Create a notification, or replace `replaces_id` when non-zero.
    /// Returns the id assigned by the daemon.
    fn notify(&mut self, notification: &Notification, replaces_id: u32) -> Result<u32>;

    fn capabilities(&mut self) -> Result<Vec<String>>;

    fn close_notification(&mut self, id: u32) -> Result<()>;

    fn server_information(&mut self) -> Result<ServerInformation>;

    /// Release whatever the backend holds. Must be idempotent.
    fn close(&mut self) {}
}

pub struct DbusClient {
    bus: SessionBus,
}

impl DbusClient {
    pub fn connect() -> Result<Self> {
        Ok(Self::new(SessionBus::connect()?))
    }

    pub fn new(bus: SessionBus) -> Self {
        Self { bus }
    }

    fn connection(&self) -> Result<&zbus::blocking::Connection> {
        self.bus
            .connection()
            .ok_or_else(|| Error::Transport(gateway::closed()))
    }

    fn proxy(&self) -> Result<NotificationsProxyBlocking<'static>> {
        NotificationsProxyBlocking::new(self.connection()?).map_err(Error::Transport)
    }
}

impl NotificationBackend for DbusClient {
    fn notify(&mut self, notification: &Notification, replaces_id: u32) -> Result<u32> {
        let actions: Vec<&str> = notification.actions.iter().map(String::as_str).collect();
        let hints: HashMap<&str, Value<'_>> = notification
            .hints
            .iter()
            .map(|(k, v)| (k.as_str(), Value::from(v.as_str())))
            .collect();

        let id = self
            .proxy()?
            .notify(
                &notification.app_name,
                replaces_id,
                &notification.icon,
                &notification.summary,
                &notification.body,
                actions,
                hints,
                notification.timeout,
            )
            .map_err(Error::Transport)?;

        log::debug!("Daemon assigned notification id {} (replaces {})", id, replaces_id);
        Ok(id)
    }

    /// A reply without a body is read as no capabilities
    fn capabilities(&mut self) -> Result<Vec<String>> {
        let reply = self
            .connection()?
            .call_method(
                Some(NOTIFICATIONS_SERVICE),
                NOTIFICATIONS_PATH,
                Some(NOTIFICATIONS_INTERFACE),
                "GetCapabilities",
                &(),
            )
            .map_err(Error::Transport)?;

        let body = reply.body();
        if matches!(body.signature(), Signature::Unit) {
            return Ok(Vec::new());
        }
        body.deserialize::<Vec<String>>().map_err(Error::Transport)
    }

    fn close_notification(&mut self, id: u32) -> Result<()> {
        self.proxy()?.close_notification(id).map_err(Error::Transport)
    }

    fn server_information(&mut self) -> Result<ServerInformation> {
        let (name, vendor, version, spec_version) =
            self.proxy()?.get_server_information().map_err(Error::Transport)?;
        Ok(ServerInformation {
            name,
            vendor,
            version,
            spec_version,
        })
    }

    fn close(&mut self) {
        self.bus.close();
    }
}
