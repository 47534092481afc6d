//! End-to-end history behaviour over the real adapters: in-memory clipboard,
//! poller, normalizer, JSON file store.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ch_app::usecases::CaptureClipboard;
use ch_app::{Activation, AppDeps, HistoryEngine};
use ch_core::entry::display_title;
use ch_core::ports::PasteSimulatorPort;
use ch_core::{ClipboardSnapshot, EntryKind};
use ch_infra::{
    Blake3Hasher, ContentNormalizer, FileKeyValueStore, SystemClock, TracingPersistenceEvents,
};
use ch_platform::runtime::TickOutcome;
use ch_platform::{ClipboardPoller, InMemoryClipboard};
use tempfile::TempDir;

#[derive(Default)]
struct CountingPaste {
    presses: AtomicUsize,
}

impl PasteSimulatorPort for CountingPaste {
    fn paste(&self) -> Result<()> {
        self.presses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Harness {
    clipboard: Arc<InMemoryClipboard>,
    poller: Arc<ClipboardPoller>,
    paste: Arc<CountingPaste>,
    activation: Activation,
}

impl Harness {
    fn new(history_file: &Path) -> Self {
        let clipboard = Arc::new(InMemoryClipboard::new());
        let engine = Arc::new(HistoryEngine::new(
            Arc::new(FileKeyValueStore::new(history_file)),
            Arc::new(SystemClock),
            Arc::new(TracingPersistenceEvents),
        ));
        let capture = Arc::new(CaptureClipboard::new(
            Arc::new(ContentNormalizer::new(Arc::new(Blake3Hasher))),
            engine.clone(),
        ));
        let poller = Arc::new(ClipboardPoller::new(
            clipboard.clone(),
            capture,
            Duration::from_millis(500),
        ));
        let paste = Arc::new(CountingPaste::default());
        let activation = Activation::new(
            engine,
            AppDeps {
                clipboard_sink: clipboard.clone(),
                paste: paste.clone(),
                watcher_control: poller.clone(),
            },
        );
        Self {
            clipboard,
            poller,
            paste,
            activation,
        }
    }

    /// Simulate a copy in another application followed by one poll.
    async fn copy(&self, text: &str) -> TickOutcome {
        self.clipboard.put_text(text).unwrap();
        self.poller.tick().await
    }

    async fn texts(&self) -> Vec<String> {
        self.activation
            .snapshot()
            .await
            .items
            .iter()
            .map(display_title)
            .collect()
    }
}

fn history_file(dir: &TempDir) -> PathBuf {
    dir.path().join("history.json")
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn copies_are_trimmed_and_deduplicated() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&history_file(&dir));

    h.copy(" hello ").await;
    h.copy("hello").await;
    h.copy("   ").await;
    assert_eq!(h.texts().await, vec!["hello"]);

    h.copy("world").await;
    h.copy("hello").await;
    assert_eq!(h.texts().await, vec!["hello", "world"]);
}

#[tokio::test]
async fn history_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    {
        let h = Harness::new(&history_file(&dir));
        h.activation.load_persisted().await;
        for s in ["one", "two", "three"] {
            h.copy(s).await;
        }
        let one = h.activation.list("one").await[0].id.clone();
        h.activation.toggle_pin(&one).await;
        h.activation.set_max_items(7).await;
        h.activation.set_auto_paste(true).await;
    }

    let h = Harness::new(&history_file(&dir));
    let restored = h.activation.load_persisted().await;
    assert_eq!(h.texts().await, vec!["one", "three", "two"]);
    assert!(restored.items[0].is_pinned);
    assert_eq!(restored.max_items, 7);
    assert!(restored.auto_paste_enabled);
}

#[tokio::test]
async fn corrupt_history_file_loads_as_empty_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(history_file(&dir), "\u{0}\u{1} definitely not json").unwrap();

    let h = Harness::new(&history_file(&dir));
    let snapshot = h.activation.load_persisted().await;
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.max_items, 50);
    assert!(!snapshot.auto_paste_enabled);

    h.copy("fresh").await;
    let reloaded = Harness::new(&history_file(&dir));
    reloaded.activation.load_persisted().await;
    assert_eq!(reloaded.texts().await, vec!["fresh"]);
}

#[tokio::test]
async fn missing_file_is_a_first_run() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&dir.path().join("nested").join("history.json"));
    let snapshot = h.activation.load_persisted().await;
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.max_items, 50);
}

#[tokio::test]
async fn images_are_captured_and_deduplicated_by_fingerprint() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&history_file(&dir));

    h.clipboard.put(ClipboardSnapshot::image(png(3, 2))).unwrap();
    assert_eq!(h.poller.tick().await, TickOutcome::Delivered);
    h.copy("between").await;
    h.clipboard.put(ClipboardSnapshot::image(png(3, 2))).unwrap();
    h.poller.tick().await;

    let snapshot = h.activation.snapshot().await;
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[0].kind(), EntryKind::Image);
    assert_eq!(display_title(&snapshot.items[0]), "Image 3x2");
    assert_eq!(h.activation.list("IMA").await.len(), 1);
    assert_eq!(h.activation.list("betw").await.len(), 1);

    let reloaded = Harness::new(&history_file(&dir));
    let restored = reloaded.activation.load_persisted().await;
    assert_eq!(restored.items, snapshot.items);
}

#[tokio::test]
async fn undecodable_image_is_ignored() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&history_file(&dir));
    h.clipboard
        .put(ClipboardSnapshot::image(b"garbage".to_vec()))
        .unwrap();
    h.poller.tick().await;
    assert!(h.activation.snapshot().await.items.is_empty());
}

#[tokio::test]
async fn selecting_writes_back_and_is_reobserved() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&history_file(&dir));
    h.copy("older").await;
    h.copy("newer").await;

    let older = h.activation.list("older").await[0].id.clone();
    assert!(h.activation.select(&older).await.unwrap());
    assert_eq!(
        h.clipboard.content().unwrap(),
        Some(ClipboardSnapshot::text("older"))
    );
    assert_eq!(h.paste.presses.load(Ordering::SeqCst), 0);

    h.poller.tick().await;
    assert_eq!(h.texts().await, vec!["older", "newer"]);

    h.activation.set_auto_paste(true).await;
    let newer = h.activation.list("newer").await[0].id.clone();
    h.activation.select(&newer).await.unwrap();
    assert_eq!(h.paste.presses.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clear_removes_pinned_and_persists() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&history_file(&dir));
    h.copy("a").await;
    h.copy("b").await;
    let a = h.activation.list("a").await[0].id.clone();
    h.activation.toggle_pin(&a).await;

    assert_eq!(h.activation.clear().await, 2);

    let reloaded = Harness::new(&history_file(&dir));
    assert!(reloaded.activation.load_persisted().await.items.is_empty());
}

#[tokio::test]
async fn recopying_after_clear_is_recorded_again() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&history_file(&dir));
    assert_eq!(h.copy("a").await, TickOutcome::Delivered);
    h.activation.clear().await;

    // Same content, new copy: the counter moves, the payload does not.
    assert_eq!(h.copy("a").await, TickOutcome::Delivered);
    assert_eq!(h.texts().await, vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn start_loads_then_polls_until_stopped() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(&history_file(&dir));

    h.activation.start().await.unwrap();
    let mut updates = h.activation.subscribe();

    h.clipboard.put_text("while running").unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(h.texts().await, vec!["while running"]);
    assert!(updates.has_changed().unwrap());

    h.activation.stop().await.unwrap();
    h.activation.stop().await.unwrap();
    h.clipboard.put_text("while stopped").unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(h.texts().await, vec!["while running"]);
}
