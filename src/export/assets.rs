//! Cover image downloads with a per-load timeout and an on-disk cache

use futures::future::join_all;
use image::RgbaImage;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::render::AssetSet;

const USER_AGENT: &str = concat!("coverly/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not a decodable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Default cover cache location: `<cache dir>/coverly/covers`
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("coverly").join("covers"))
}

/// Cache file name for a URL (first 16 bytes of its SHA-256, hex)
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

pub struct AssetLoader {
    client: reqwest::Client,
    timeout: Duration,
    cache_dir: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(timeout: Duration, cache_dir: Option<PathBuf>) -> Result<Self, AssetError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            timeout,
            cache_dir,
        })
    }

    /// Load every URL concurrently. Failed or timed-out loads are logged and
    /// left out of the set, so they paint as the placeholder cover.
    pub async fn load_all(&self, urls: &[&str]) -> AssetSet {
        let loads = urls.iter().map(|url| async move { (*url, self.load(url).await) });

        let mut assets = AssetSet::new();
        for (url, result) in join_all(loads).await {
            match result {
                Ok(image) => assets.insert(url, image),
                Err(e) => warn!("Cover {} unavailable, using placeholder: {}", url, e),
            }
        }
        assets
    }

    /// Load one image: cache first, then the network under the timeout
    pub async fn load(&self, url: &str) -> Result<RgbaImage, AssetError> {
        if let Some(image) = self.read_cached(url) {
            debug!("Cover cache hit for {}", url);
            return Ok(image);
        }

        let bytes = tokio::time::timeout(self.timeout, self.fetch(url))
            .await
            .map_err(|_| AssetError::Timeout(self.timeout))??;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        self.write_cached(url, &bytes);
        Ok(image)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }

    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| dir.join(cache_key(url)))
    }

    fn read_cached(&self, url: &str) -> Option<RgbaImage> {
        let path = self.cache_path(url)?;
        let bytes = std::fs::read(&path).ok()?;
        match image::load_from_memory(&bytes) {
            Ok(image) => Some(image.to_rgba8()),
            Err(e) => {
                warn!("Ignoring corrupt cached cover {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_cached(&self, url: &str, bytes: &[u8]) {
        let Some(path) = self.cache_path(url) else {
            return;
        };
        if let Err(e) = write_file(&path, bytes) {
            warn!("Failed to cache cover {}: {}", path.display(), e);
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::ImageEncoder;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn png_bytes(color: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(4, 6, image::Rgba(color));
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(&image, 4, 6, image::ExtendedColorType::Rgba8)
            .unwrap();
        bytes
    }

    async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) -> String {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(server)
            .await;
        format!("{}{}", server.uri(), route)
    }

    #[test]
    fn test_cache_key_is_stable_hex() {
        let key = cache_key("https://covers.example.com/a.jpg");
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, cache_key("https://covers.example.com/a.jpg"));
        assert_ne!(key, cache_key("https://covers.example.com/b.jpg"));
    }

    #[tokio::test]
    async fn test_load_all_mixes_loaded_and_failed() {
        let server = MockServer::start().await;
        let ok = serve(
            &server,
            "/ok.png",
            ResponseTemplate::new(200).set_body_bytes(png_bytes([9, 8, 7, 255])),
        )
        .await;
        let missing = serve(&server, "/missing.png", ResponseTemplate::new(404)).await;
        let garbage = serve(
            &server,
            "/garbage.png",
            ResponseTemplate::new(200).set_body_bytes(b"not an image".to_vec()),
        )
        .await;

        let loader = AssetLoader::new(Duration::from_secs(5), None).unwrap();
        let assets = loader.load_all(&[ok.as_str(), missing.as_str(), garbage.as_str()]).await;

        assert_eq!(assets.len(), 1);
        assert_eq!(assets.get(&ok).unwrap().get_pixel(0, 0).0, [9, 8, 7, 255]);
        assert!(assets.get(&missing).is_none());
        assert!(assets.get(&garbage).is_none());
    }

    #[tokio::test]
    async fn test_slow_cover_times_out() {
        let server = MockServer::start().await;
        let slow = serve(
            &server,
            "/slow.png",
            ResponseTemplate::new(200)
                .set_body_bytes(png_bytes([1, 1, 1, 255]))
                .set_delay(Duration::from_secs(5)),
        )
        .await;

        let loader = AssetLoader::new(Duration::from_millis(100), None).unwrap();
        let err = loader.load(&slow).await.unwrap_err();
        assert!(matches!(err, AssetError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_cached_cover_skips_network() {
        let dir = TempDir::new().unwrap();
        let server = MockServer::start().await;
        let url = serve(
            &server,
            "/cover.png",
            ResponseTemplate::new(200).set_body_bytes(png_bytes([50, 60, 70, 255])),
        )
        .await;

        let loader = AssetLoader::new(Duration::from_secs(5), Some(dir.path().to_path_buf())).unwrap();
        loader.load(&url).await.unwrap();
        assert!(dir.path().join(cache_key(&url)).is_file());

        server.reset().await;
        let cached = loader.load(&url).await.unwrap();
        assert_eq!(cached.get_pixel(1, 1).0, [50, 60, 70, 255]);
    }
}
