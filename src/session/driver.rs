//! Local browser driver process (`chromedriver`).
//!
//! The process is started on the port of the configured WebDriver URL and
//! killed when [`DriverProcess`] is dropped.

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use super::AuthError;
use super::webdriver::{WebDriver, wait_until};
use crate::debug;

/// Port used when the WebDriver URL does not name one.
pub const DEFAULT_PORT: u16 = 9515;

/// A running driver process.
pub struct DriverProcess {
    child: Child,
}

impl DriverProcess {
    /// Locate `program` on `PATH` and start it listening on `port`.
    pub fn spawn(program: &str, port: u16) -> Result<Self, AuthError> {
        let path = which::which(program)
            .map_err(|e| AuthError::Launch(format!("`{program}` not found: {e}")))?;

        debug!("login"; "starting {} on port {}", path.display(), port);
        let child = Command::new(&path)
            .arg(format!("--port={port}"))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AuthError::Launch(format!("{}: {e}", path.display())))?;

        Ok(Self { child })
    }

    /// Block until the driver answers `/status` as ready.
    pub fn wait_ready(
        &mut self,
        driver: &WebDriver,
        timeout: Duration,
        poll: Duration,
    ) -> Result<(), AuthError> {
        wait_until("browser driver", timeout, poll, || {
            if let Some(status) = self.child.try_wait().ok().flatten() {
                return Err(AuthError::Launch(format!("driver exited early ({status})")));
            }
            Ok(driver.is_ready().then_some(()))
        })
    }
}

impl Drop for DriverProcess {
    fn drop(&mut self) {
        self.child.kill().ok();
        self.child.wait().ok();
    }
}

/// Port the driver should listen on for `webdriver_url`.
pub fn port_of(webdriver_url: &str) -> u16 {
    url::Url::parse(webdriver_url)
        .ok()
        .and_then(|u| u.port_or_known_default())
        .unwrap_or(DEFAULT_PORT)
}
