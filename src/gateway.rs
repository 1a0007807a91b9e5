//! Session bus connection to the freedesktop notification daemon.

use zbus::blocking::Connection;

use crate::error::{Error, Result};

pub const NOTIFICATIONS_SERVICE: &str = "org.freedesktop.Notifications";
pub const NOTIFICATIONS_PATH: &str = "/org/freedesktop/Notifications";
pub const NOTIFICATIONS_INTERFACE: &str = "org.freedesktop.Notifications";

/// Owns the session bus connection used to reach the daemon
pub struct SessionBus {
    conn: Option<Connection>,
}

impl SessionBus {
    /// Connect to the session bus and check that a notification daemon answers.
    ///
    /// A connection whose probe fails is closed before the error is returned.
    pub fn connect() -> Result<Self> {
        let conn = Connection::session().map_err(Error::Unavailable)?;
        log::info!("Connected to session bus");
        Self::from_connection(conn)
    }

    /// Wrap an already open connection, probing the daemon behind it
    pub(crate) fn from_connection(conn: Connection) -> Result<Self> {
        let mut bus = Self { conn: Some(conn) };
        if let Err(e) = bus.probe() {
            bus.close();
            return Err(e);
        }

        Ok(bus)
    }

    /// Issue a zero-argument `GetCapabilities` call as a liveness check
    pub fn probe(&self) -> Result<()> {
        let conn = self.conn.as_ref().ok_or_else(|| Error::Unavailable(closed()))?;
        conn.call_method(
            Some(NOTIFICATIONS_SERVICE),
            NOTIFICATIONS_PATH,
            Some(NOTIFICATIONS_INTERFACE),
            "GetCapabilities",
            &(),
        )
        .map_err(Error::Unavailable)?;

        log::debug!("Notification daemon responded to capability probe");
        Ok(())
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the connection. Safe to call any number of times.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            match conn.close() {
                Ok(()) => log::info!("Session bus connection closed"),
                Err(e) => log::warn!("Error closing session bus connection: {}", e),
            }
        }
    }
}

impl Drop for SessionBus {
    fn drop(&mut self) {
        self.close();
    }
}

pub(crate) fn closed() -> zbus::Error {
    zbus::Error::Failure("session bus connection already closed".to_string())
}
