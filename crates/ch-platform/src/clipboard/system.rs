//! System clipboard adapter backed by `arboard`.
//!
//! On macOS the change token is the pasteboard's change counter. `arboard`
//! exposes no counter, so elsewhere the token is a fingerprint of the current
//! content: copying identical content again is not seen as a change there.
//! Text is preferred over image when both are present.

use std::borrow::Cow;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use arboard::{Clipboard, ImageData};
use ch_core::ports::{ClipboardSinkPort, ClipboardSourcePort};
use ch_core::{ChangeToken, ClipboardSnapshot, Entry, EntryContent};
use image::{ExtendedColorType, ImageEncoder};
use tracing::{debug, trace};
use twox_hash::xxh3::hash64_with_seed;

const TEXT_SEED: u64 = 0x7465_7874;

/// Token reported when the clipboard holds nothing readable.
const EMPTY_TOKEN: ChangeToken = ChangeToken(0);

enum RawContent {
    Text(String),
    Image(ImageData<'static>),
}

pub struct SystemClipboard {
    inner: Mutex<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize system clipboard")?;
        Ok(Self {
            inner: Mutex::new(clipboard),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Clipboard>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("system clipboard lock poisoned"))
    }

    fn read_raw(&self) -> Result<Option<RawContent>> {
        let mut clipboard = self.lock()?;
        match clipboard.get_text() {
            Ok(text) => return Ok(Some(RawContent::Text(text))),
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(err) => trace!(error = %err, "Clipboard text unavailable"),
        }
        match clipboard.get_image() {
            Ok(image) => Ok(Some(RawContent::Image(image))),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(anyhow!(err)).context("read clipboard image"),
        }
    }
}

#[cfg_attr(target_os = "macos", allow(dead_code))]
fn fingerprint(raw: Option<&RawContent>) -> ChangeToken {
    match raw {
        None => EMPTY_TOKEN,
        Some(RawContent::Text(text)) => ChangeToken(hash64_with_seed(text.as_bytes(), TEXT_SEED)),
        Some(RawContent::Image(image)) => {
            let seed = ((image.width as u64) << 32) | (image.height as u64 & 0xffff_ffff);
            ChangeToken(hash64_with_seed(&image.bytes, seed))
        }
    }
}

impl ClipboardSourcePort for SystemClipboard {
    #[cfg(target_os = "macos")]
    fn current_change_token(&self) -> Result<ChangeToken> {
        super::pasteboard::change_count()
            .map(ChangeToken)
            .ok_or_else(|| anyhow!("general pasteboard unavailable"))
    }

    #[cfg(not(target_os = "macos"))]
    fn current_change_token(&self) -> Result<ChangeToken> {
        Ok(fingerprint(self.read_raw()?.as_ref()))
    }

    fn read_snapshot(&self) -> Result<Option<ClipboardSnapshot>> {
        match self.read_raw()? {
            None => Ok(None),
            Some(RawContent::Text(text)) => Ok(Some(ClipboardSnapshot::text(text))),
            Some(RawContent::Image(image)) => {
                let png = rgba_to_png(&image)?;
                debug!(
                    width = image.width,
                    height = image.height,
                    size_bytes = png.len(),
                    "Read image from system clipboard"
                );
                Ok(Some(ClipboardSnapshot::image(png)))
            }
        }
    }
}

impl ClipboardSinkPort for SystemClipboard {
    fn write(&self, entry: &Entry) -> Result<()> {
        match &entry.content {
            EntryContent::Text(text) => {
                self.lock()?
                    .set_text(text.as_str())
                    .context("write text to system clipboard")?;
            }
            EntryContent::Image(image) => {
                let rgba = image::load_from_memory(&image.png)
                    .context("decode stored png")?
                    .to_rgba8();
                let (width, height) = rgba.dimensions();
                let data = ImageData {
                    width: width as usize,
                    height: height as usize,
                    bytes: Cow::Owned(rgba.into_raw()),
                };
                self.lock()?
                    .set_image(data)
                    .context("write image to system clipboard")?;
            }
        }
        debug!(entry_id = %entry.id, kind = ?entry.kind(), "Wrote entry to system clipboard");
        Ok(())
    }
}

fn rgba_to_png(image: &ImageData<'_>) -> Result<Vec<u8>> {
    let width = u32::try_from(image.width).context("image width exceeds u32 range")?;
    let height = u32::try_from(image.height).context("image height exceeds u32 range")?;
    let expected = image.width.saturating_mul(image.height).saturating_mul(4);
    if image.bytes.len() != expected {
        anyhow::bail!(
            "clipboard image buffer is {} bytes, expected {expected}",
            image.bytes.len()
        );
    }

    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(&image.bytes, width, height, ExtendedColorType::Rgba8)
        .context("encode clipboard image to png")?;
    Ok(png)
}
