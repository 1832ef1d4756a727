use crate::error::Result;
use signal_hook::consts::SIGWINCH;
use signal_hook::SigId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Records window size changes. The handler only sets a flag; the edit loop polls it between keys
pub struct SigwinchWatcher {
    resized: Arc<AtomicBool>,
    id: SigId,
}

impl SigwinchWatcher {
    pub fn new() -> Result<Self> {
        let resized = Arc::new(AtomicBool::new(false));
        let id = signal_hook::flag::register(SIGWINCH, Arc::clone(&resized))?;
        tracing::debug!("watching SIGWINCH");
        Ok(Self { resized, id })
    }

    // Returns true at most once per received signal(s)
    pub fn take(&self) -> bool {
        self.resized.swap(false, Ordering::Relaxed)
    }
}

impl Drop for SigwinchWatcher {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.id);
    }
}
