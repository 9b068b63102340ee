use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app at a temporary config home and disables the OS keyring
/// so API keys land in the encrypted fallback file.
pub struct SilibusEnvGuard {
    previous_home: Option<String>,
    previous_keyring: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl SilibusEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var("SILIBUS_CONFIG_HOME").ok();
        let previous_keyring = std::env::var("SILIBUS_DISABLE_KEYRING").ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var("SILIBUS_CONFIG_HOME", path);
            std::env::set_var("SILIBUS_DISABLE_KEYRING", "1");
        }
        Self {
            previous_home,
            previous_keyring,
            _lock: lock,
        }
    }
}

impl Drop for SilibusEnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            match self.previous_home.take() {
                Some(value) => std::env::set_var("SILIBUS_CONFIG_HOME", value),
                None => std::env::remove_var("SILIBUS_CONFIG_HOME"),
            }
            match self.previous_keyring.take() {
                Some(value) => std::env::set_var("SILIBUS_DISABLE_KEYRING", value),
                None => std::env::remove_var("SILIBUS_DISABLE_KEYRING"),
            }
        }
    }
}
