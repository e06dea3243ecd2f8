//! 메모리 키-값 저장소.

use std::collections::HashMap;

use parking_lot::Mutex;
use sidekick_core::error::CoreError;
use sidekick_core::ports::storage::KeyValueStore;

/// 프로세스 내 `KeyValueStore` 구현 (종료 시 사라짐)
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidekick_core::ports::storage::SettingsRepository;
    use sidekick_core::settings_manager::SettingsManager;
    use std::sync::Arc;

    #[test]
    fn basic_operations() {
        let store = MemoryKvStore::new();
        assert!(store.get("a").unwrap().is_none());
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn backs_settings_manager() {
        let store = Arc::new(MemoryKvStore::new());
        let manager = SettingsManager::new(store.clone());
        manager.save_api_key("key-1").unwrap();
        assert!(store.get("sidekick_settings").unwrap().is_some());
        assert_eq!(manager.get().api_key, "key-1");
    }
}
