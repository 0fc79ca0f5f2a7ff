//! Session progress persistence
//!
//! Experience and lives are the only state that survives a reload.
//! They are written through to LocalStorage immediately after every
//! mutation (the shell persists on each `ProgressChanged` event), so a
//! mid-session refresh resumes where the player left off. Storage
//! failures are best-effort: log and keep playing.

use serde::{Deserialize, Serialize};

/// Lives at the start of a session
pub const MAX_LIVES: u8 = 3;

/// The cross-act session state: accumulated experience and remaining
/// lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub xp: u32,
    pub lives: u8,
}

impl SessionProgress {
    #[allow(dead_code)]
    const XP_KEY: &'static str = "knightfall_xp";
    #[allow(dead_code)]
    const LIVES_KEY: &'static str = "knightfall_lives";

    pub fn new() -> Self {
        Self {
            xp: 0,
            lives: MAX_LIVES,
        }
    }

    /// Back to a fresh session
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Load persisted progress (WASM only); anything missing or
    /// unparsable falls back to a fresh session
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, starting fresh");
            return Self::new();
        };

        let read_int = |key: &str| -> Option<u32> {
            storage
                .get_item(key)
                .ok()
                .flatten()
                .and_then(|v| v.parse().ok())
        };

        let loaded = Self {
            xp: read_int(Self::XP_KEY).unwrap_or(0),
            // A stored zero means a finished session; start that player fresh
            lives: read_int(Self::LIVES_KEY)
                .filter(|&l| l > 0)
                .map(|l| l.min(MAX_LIVES as u32) as u8)
                .unwrap_or(MAX_LIVES),
        };
        log::info!("loaded progress: {} xp, {} lives", loaded.xp, loaded.lives);
        loaded
    }

    /// Persist both values (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::XP_KEY, &self.xp.to_string());
            let _ = storage.set_item(Self::LIVES_KEY, &self.lives.to_string());
        } else {
            log::warn!("progress not saved: LocalStorage unavailable");
        }
    }

    /// Wipe the stored session (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn clear_store() {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.remove_item(Self::XP_KEY);
            let _ = storage.remove_item(Self::LIVES_KEY);
            log::info!("stored progress cleared");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear_store() {}
}

impl Default for SessionProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let p = SessionProgress::new();
        assert_eq!(p.xp, 0);
        assert_eq!(p.lives, MAX_LIVES);
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut p = SessionProgress { xp: 999, lives: 1 };
        p.reset();
        assert_eq!(p, SessionProgress::new());
    }

    #[test]
    fn test_roundtrips_as_json() {
        let p = SessionProgress { xp: 145, lives: 2 };
        let json = serde_json::to_string(&p).unwrap();
        let back: SessionProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
