//! Raw clipboard snapshot -> history candidate.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use ch_core::ports::{ContentHashPort, ContentNormalizerPort};
use ch_core::{ClipboardSnapshot, ContentTag, EntryCandidate, EntryContent, ImageContent};
use image::{GenericImageView, ImageFormat};
use tracing::debug;

/// Normalizes text by trimming and images by re-encoding them to canonical
/// RGBA8 PNG, so that the same picture copied from different sources shares a
/// fingerprint.
pub struct ContentNormalizer {
    hasher: Arc<dyn ContentHashPort>,
}

impl ContentNormalizer {
    pub fn new(hasher: Arc<dyn ContentHashPort>) -> Self {
        Self { hasher }
    }

    fn normalize_text(&self, bytes: &[u8]) -> Option<EntryCandidate> {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "Ignoring clipboard text that is not UTF-8");
                return None;
            }
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(EntryCandidate::new(EntryContent::Text(trimmed.to_string())))
    }

    fn normalize_image(&self, bytes: &[u8]) -> Result<Option<EntryCandidate>> {
        let decoded = image::load_from_memory(bytes).context("decode clipboard image")?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Ok(None);
        }

        let rgba = image::DynamicImage::ImageRgba8(decoded.to_rgba8());
        let mut png = Vec::new();
        rgba.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("encode canonical png")?;
        let hash = self.hasher.hash_bytes(&png)?;

        Ok(Some(EntryCandidate::new(EntryContent::Image(ImageContent {
            png: Bytes::from(png),
            hash,
            width,
            height,
        }))))
    }
}

impl ContentNormalizerPort for ContentNormalizer {
    fn normalize(&self, snapshot: &ClipboardSnapshot) -> Option<EntryCandidate> {
        match &snapshot.tag {
            ContentTag::Text => self.normalize_text(&snapshot.bytes),
            ContentTag::Image => match self.normalize_image(&snapshot.bytes) {
                Ok(candidate) => candidate,
                Err(err) => {
                    debug!(
                        error = %format!("{err:#}"),
                        size_bytes = snapshot.size_bytes(),
                        "Ignoring clipboard image"
                    );
                    None
                }
            },
            ContentTag::Other(format) => {
                debug!(format = %format, "Ignoring unsupported clipboard content");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::Blake3Hasher;
    use ch_core::EntryKind;

    fn normalizer() -> ContentNormalizer {
        ContentNormalizer::new(Arc::new(Blake3Hasher))
    }

    fn encode(image: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    fn checkerboard() -> image::RgbImage {
        image::RgbImage::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        })
    }

    #[test]
    fn text_is_trimmed() {
        let candidate = normalizer()
            .normalize(&ClipboardSnapshot::text("  hello world \n"))
            .unwrap();
        assert_eq!(candidate.content, EntryContent::Text("hello world".into()));
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert!(normalizer()
            .normalize(&ClipboardSnapshot::text(" \n\t "))
            .is_none());
        assert!(normalizer().normalize(&ClipboardSnapshot::text("")).is_none());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let snapshot = ClipboardSnapshot {
            tag: ContentTag::Text,
            bytes: vec![0xff, 0xfe, 0x00],
        };
        assert!(normalizer().normalize(&snapshot).is_none());
    }

    #[test]
    fn undecodable_image_is_rejected() {
        let snapshot = ClipboardSnapshot::image(b"definitely not a png".to_vec());
        assert!(normalizer().normalize(&snapshot).is_none());
    }

    #[test]
    fn unsupported_type_is_rejected() {
        let snapshot = ClipboardSnapshot {
            tag: ContentTag::Other("public.file-url".into()),
            bytes: b"file:///tmp/a".to_vec(),
        };
        assert!(normalizer().normalize(&snapshot).is_none());
    }

    #[test]
    fn image_is_reencoded_with_dimensions() {
        let png = encode(image::DynamicImage::ImageRgb8(checkerboard()), ImageFormat::Png);
        let candidate = normalizer()
            .normalize(&ClipboardSnapshot::image(png))
            .unwrap();

        assert_eq!(candidate.content.kind(), EntryKind::Image);
        let EntryContent::Image(image) = candidate.content else {
            panic!("expected image content");
        };
        assert_eq!((image.width, image.height), (4, 3));

        let decoded = image::load_from_memory(&image.png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        assert_eq!(image.hash, Blake3Hasher.hash_bytes(&image.png).unwrap());
    }

    #[test]
    fn same_pixels_in_different_containers_share_a_fingerprint() {
        let rgb = image::DynamicImage::ImageRgb8(checkerboard());
        let rgba = image::DynamicImage::ImageRgba8(rgb.to_rgba8());
        let from_rgb_png = normalizer()
            .normalize(&ClipboardSnapshot::image(encode(rgb.clone(), ImageFormat::Png)))
            .unwrap();
        let from_rgba_png = normalizer()
            .normalize(&ClipboardSnapshot::image(encode(rgba, ImageFormat::Png)))
            .unwrap();
        let from_tiff = normalizer()
            .normalize(&ClipboardSnapshot::image(encode(rgb, ImageFormat::Tiff)))
            .unwrap();

        assert_eq!(from_rgb_png.dedup_key(), from_rgba_png.dedup_key());
        assert_eq!(from_rgb_png.dedup_key(), from_tiff.dedup_key());
    }
}
