use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ems_client::api::ApiClient;
use ems_client::store::KvStore;

/// Nothing listens on port 1, so every remote call fails immediately and
/// deterministically, which is exactly the degraded mode under test.
pub fn unreachable_api() -> ApiClient {
    ApiClient::new("http://127.0.0.1:1/api")
}

/// In-memory store that can be cloned into a component while the test keeps
/// a handle for inspection, standing in for shared browser local storage.
#[derive(Clone, Default)]
pub struct SharedStore(Arc<Mutex<HashMap<String, String>>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl KvStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.0.lock().unwrap().remove(key);
    }
}
