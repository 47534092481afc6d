use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use ch_core::ports::{ClipboardSinkPort, ClipboardSourcePort};
use ch_core::{ChangeToken, ClipboardSnapshot, Entry, EntryContent, EntryId};

#[derive(Debug, Default)]
struct State {
    change_count: u64,
    content: Option<ClipboardSnapshot>,
    fail_reads: bool,
    written: Vec<EntryId>,
}

/// Process-local clipboard with a real change counter.
///
/// Used by headless runs and tests. Every `put`/`write` bumps the counter,
/// even when the content is identical, like a native pasteboard does.
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    state: Mutex<State>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("in-memory clipboard lock poisoned"))
    }

    /// Replace the content as another application would.
    pub fn put(&self, snapshot: ClipboardSnapshot) -> Result<()> {
        let mut state = self.lock()?;
        state.change_count += 1;
        state.content = Some(snapshot);
        Ok(())
    }

    pub fn put_text(&self, text: &str) -> Result<()> {
        self.put(ClipboardSnapshot::text(text))
    }

    pub fn clear(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.change_count += 1;
        state.content = None;
        Ok(())
    }

    /// Make every subsequent read fail until reset.
    pub fn set_fail_reads(&self, fail: bool) -> Result<()> {
        self.lock()?.fail_reads = fail;
        Ok(())
    }

    pub fn content(&self) -> Result<Option<ClipboardSnapshot>> {
        Ok(self.lock()?.content.clone())
    }

    /// Ids of entries written through the sink, oldest first.
    pub fn written(&self) -> Result<Vec<EntryId>> {
        Ok(self.lock()?.written.clone())
    }
}

impl ClipboardSourcePort for InMemoryClipboard {
    fn current_change_token(&self) -> Result<ChangeToken> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(anyhow!("clipboard unavailable"));
        }
        Ok(ChangeToken(state.change_count))
    }

    fn read_snapshot(&self) -> Result<Option<ClipboardSnapshot>> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(anyhow!("clipboard unavailable"));
        }
        Ok(state.content.clone())
    }
}

impl ClipboardSinkPort for InMemoryClipboard {
    fn write(&self, entry: &Entry) -> Result<()> {
        let snapshot = match &entry.content {
            EntryContent::Text(text) => ClipboardSnapshot::text(text.clone()),
            EntryContent::Image(image) => ClipboardSnapshot::image(image.png.to_vec()),
        };
        let mut state = self.lock()?;
        state.change_count += 1;
        state.content = Some(snapshot);
        state.written.push(entry.id.clone());
        Ok(())
    }
}
