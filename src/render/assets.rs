use image::RgbaImage;
use std::collections::HashMap;

/// Decoded cover images keyed by the URL the scene references.
///
/// A URL without an entry is painted as the "Sem Capa" placeholder.
#[derive(Debug, Default, Clone)]
pub struct AssetSet {
    images: HashMap<String, RgbaImage>,
}

impl AssetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, image: RgbaImage) {
        self.images.insert(url.into(), image);
    }

    pub fn get(&self, url: &str) -> Option<&RgbaImage> {
        self.images.get(url)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
