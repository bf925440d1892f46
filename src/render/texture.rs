use std::path::Path;

use anyhow::Context;

use crate::math::{hsv_to_rgb, Rgba};

/// Handle to an image registered in a `TextureStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) usize);

impl TextureId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// CPU-side RGBA8 image, decoded once at scene init and uploaded once by
/// the renderer.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Owns every image a scene registers during `init`.
#[derive(Debug, Default)]
pub struct TextureStore {
    images: Vec<TextureImage>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, image: TextureImage) -> TextureId {
        self.images.push(image);
        TextureId(self.images.len() - 1)
    }

    /// Decode a PNG or JPEG from disk.
    pub fn load_file(&mut self, path: &Path) -> anyhow::Result<TextureId> {
        let img = image::open(path)
            .with_context(|| format!("decoding texture {}", path.display()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("loaded texture {} ({}x{})", path.display(), width, height);
        Ok(self.add(TextureImage {
            width,
            height,
            pixels: rgba.into_raw(),
        }))
    }

    /// Procedural checkerboard of `squares` x `squares` alternating cells.
    pub fn add_checkerboard(&mut self, size: u32, squares: u32, light: Rgba, dark: Rgba) -> TextureId {
        let cell = (size / squares).max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                let c = if even { light } else { dark };
                pixels.extend_from_slice(&to_rgba8(c));
            }
        }
        self.add(TextureImage {
            width: size,
            height: size,
            pixels,
        })
    }

    /// Procedural horizontal hue sweep, used as a stand-in when an asset
    /// file is missing.
    pub fn add_gradient(&mut self, size: u32) -> TextureId {
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            let value = 1.0 - 0.5 * (y as f32 / size as f32);
            for x in 0..size {
                let hue = x as f32 / size as f32;
                let [r, g, b] = hsv_to_rgb(hue, 0.8, value);
                pixels.extend_from_slice(&to_rgba8(Rgba::opaque(r, g, b)));
            }
        }
        self.add(TextureImage {
            width: size,
            height: size,
            pixels,
        })
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureImage> {
        self.images.get(id.0)
    }

    pub fn images(&self) -> &[TextureImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn to_rgba8(c: Rgba) -> [u8; 4] {
    [
        (c.r.clamp(0.0, 1.0) * 255.0) as u8,
        (c.g.clamp(0.0, 1.0) * 255.0) as u8,
        (c.b.clamp(0.0, 1.0) * 255.0) as u8,
        (c.a.clamp(0.0, 1.0) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_alternates() {
        let mut store = TextureStore::new();
        let id = store.add_checkerboard(4, 2, Rgba::WHITE, Rgba::BLACK);
        let image = store.get(id).unwrap();
        assert_eq!(image.width, 4);
        // First texel white, texel at (2, 0) black (cell size 2).
        assert_eq!(&image.pixels[0..3], &[255, 255, 255]);
        let off = (2 * 4) as usize;
        assert_eq!(&image.pixels[off..off + 3], &[0, 0, 0]);
    }

    #[test]
    fn test_gradient_dimensions() {
        let mut store = TextureStore::new();
        let id = store.add_gradient(8);
        let image = store.get(id).unwrap();
        assert_eq!(image.pixels.len(), 8 * 8 * 4);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut store = TextureStore::new();
        assert!(store.load_file(Path::new("no/such/texture.png")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut store = TextureStore::new();
        let a = store.add_gradient(2);
        let b = store.add_gradient(2);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert!(store.get(b).is_some());
        assert!(store.get(TextureId(9)).is_none());
    }
}
