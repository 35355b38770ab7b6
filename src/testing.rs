//! Scripted collaborators for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use tokio::sync::Notify;

use crate::audio::{AcquireOptions, AudioEngine, AudioHandle, EngineStatus, StatusCallback};
use crate::catalog::{Catalog, Listing};

/// Holds a call open until the test releases it
#[derive(Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    /// Resolves once a call has reached the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    listings: Mutex<HashMap<String, Listing>>,
    failing_lists: Mutex<HashSet<String>>,
    failing_locators: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_groupings(self, path: &str, names: &[&str]) -> Self {
        self.listings
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .groupings = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_items(self, path: &str, names: &[&str]) -> Self {
        self.listings
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .items = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn fail_list(self, path: &str) -> Self {
        self.failing_lists.lock().unwrap().insert(path.to_string());
        self
    }

    pub fn fail_locator(self, item_path: &str) -> Self {
        self.failing_locators.lock().unwrap().insert(item_path.to_string());
        self
    }

    /// Make the next `list(path)` wait for the returned gate.
    pub fn gate(&self, path: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().unwrap().insert(path.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list(&self, path: &str) -> Result<Listing> {
        self.calls.lock().unwrap().push(format!("list:{}", path));
        let gate = self.gates.lock().unwrap().remove(path);
        if let Some(gate) = gate {
            gate.pass().await;
        }

        if self.failing_lists.lock().unwrap().contains(path) {
            bail!("listing {} failed", path);
        }
        let listing = self.listings.lock().unwrap().get(path).cloned();
        listing.ok_or_else(|| anyhow!("no such path: {}", path))
    }

    async fn resolve_locator(&self, item_path: &str) -> Result<String> {
        self.calls.lock().unwrap().push(format!("resolve:{}", item_path));
        if self.failing_locators.lock().unwrap().contains(item_path) {
            bail!("object {} does not exist", item_path);
        }
        Ok(format!("https://cdn.test/{}?token=1", item_path))
    }
}

/// Shared state of one acquired fake resource
pub struct FakeResource {
    pub url: String,
    log: Arc<Mutex<Vec<String>>>,
    callback: Mutex<Option<StatusCallback>>,
    fail_stop: bool,
    unloaded: AtomicBool,
}

impl FakeResource {
    /// Deliver a status tick. Returns `false` if no callback is registered.
    pub fn emit(&self, status: EngineStatus) -> bool {
        let callback = self.callback.lock().unwrap();
        match callback.as_ref() {
            Some(callback) => {
                callback(status);
                true
            }
            None => false,
        }
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded.load(Ordering::SeqCst)
    }

    fn record(&self, event: &str) {
        self.log.lock().unwrap().push(format!("{}:{}", event, self.url));
    }
}

struct FakeHandle(Arc<FakeResource>);

#[async_trait]
impl AudioHandle for FakeHandle {
    async fn play(&self) -> Result<()> {
        self.0.record("play");
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.0.record("pause");
        Ok(())
    }

    async fn seek(&self, position_ms: u64) -> Result<()> {
        self.0.record(&format!("seek({})", position_ms));
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.0.record("stop");
        if self.0.fail_stop {
            bail!("player already released");
        }
        Ok(())
    }

    async fn unload(&self) -> Result<()> {
        self.0.record("unload");
        self.0.unloaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn set_on_status(&self, callback: Option<StatusCallback>) {
        *self.0.callback.lock().unwrap() = callback;
    }
}

#[derive(Default)]
pub struct FakeEngine {
    log: Arc<Mutex<Vec<String>>>,
    resources: Mutex<Vec<Arc<FakeResource>>>,
    failing_urls: Mutex<HashSet<String>>,
    fail_stop: AtomicBool,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
}

impl FakeEngine {
    pub fn fail_acquire(&self, url: &str) {
        self.failing_urls.lock().unwrap().insert(url.to_string());
    }

    /// Resources acquired from now on fail their `stop` call.
    pub fn fail_stop(&self) {
        self.fail_stop.store(true, Ordering::SeqCst);
    }

    pub fn gate(&self, url: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().unwrap().insert(url.to_string(), gate.clone());
        gate
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// The most recently acquired resource for `url`.
    pub fn resource(&self, url: &str) -> Option<Arc<FakeResource>> {
        self.resources
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.url == url)
            .cloned()
    }

    pub fn live_urls(&self) -> Vec<String> {
        self.resources
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.is_unloaded())
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait]
impl AudioEngine for FakeEngine {
    async fn acquire(&self, url: &str, options: AcquireOptions) -> Result<Box<dyn AudioHandle>> {
        self.log.lock().unwrap().push(format!("acquire:{}", url));
        let gate = self.gates.lock().unwrap().remove(url);
        if let Some(gate) = gate {
            gate.pass().await;
        }

        if self.failing_urls.lock().unwrap().contains(url) {
            bail!("unable to load {}", url);
        }

        let resource = Arc::new(FakeResource {
            url: url.to_string(),
            log: self.log.clone(),
            callback: Mutex::new(None),
            fail_stop: self.fail_stop.load(Ordering::SeqCst),
            unloaded: AtomicBool::new(false),
        });
        if options.autoplay {
            resource.record("autoplay");
        }
        self.resources.lock().unwrap().push(resource.clone());
        Ok(Box::new(FakeHandle(resource)))
    }
}
