//! Mini App Client
//!
//! Read accessors for the launch state the host hands to the Mini App.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::host::HostBridge;
use crate::models::{LaunchParams, User};

/// Launch-state reader backed by a [`HostBridge`].
///
/// The user snapshot is parsed on first access and cached for the rest of the
/// session; the host is never asked for it again. Init data is passed through
/// untouched: it must be verified by a backend, never here.
pub struct MiniAppClient {
    host: Arc<dyn HostBridge>,
    user: OnceCell<User>,
}

impl MiniAppClient {
    pub fn new(host: Arc<dyn HostBridge>) -> Self {
        Self {
            host,
            user: OnceCell::new(),
        }
    }

    pub fn host(&self) -> &Arc<dyn HostBridge> {
        &self.host
    }

    /// Cached user snapshot, or the error that prevented reading it.
    /// Failures are not cached, so a host that appears later is picked up.
    pub fn try_user(&self) -> Result<&User> {
        self.user.get_or_try_init(|| {
            let json = self.host.user_info()?;
            serde_json::from_str::<User>(&json)
                .map_err(|e| Error::parse(format!("user info: {}", e)))
        })
    }

    /// User snapshot; `None` if the host is missing or sent malformed JSON.
    pub fn user(&self) -> Option<&User> {
        match self.try_user() {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("User info unavailable: {}", e);
                None
            }
        }
    }

    pub fn try_launch_params(&self) -> Result<LaunchParams> {
        LaunchParams::from_json(&self.host.launch_params()?)
    }

    pub fn launch_params(&self) -> Option<LaunchParams> {
        self.try_launch_params()
            .map_err(|e| tracing::warn!("Launch params unavailable: {}", e))
            .ok()
    }

    /// `startapp` parameter; `None` when absent or the host is missing
    pub fn start_param(&self) -> Option<String> {
        match self.host.start_param() {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Start param unavailable: {}", e);
                None
            }
        }
    }

    /// Raw signed init data, for forwarding to a backend
    pub fn init_data_raw(&self) -> Option<String> {
        match self.host.init_data_raw() {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Init data unavailable: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for MiniAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniAppClient")
            .field("user", &self.user.get())
            .finish_non_exhaustive()
    }
}
