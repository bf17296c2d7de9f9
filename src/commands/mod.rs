pub mod board;
pub mod history;
pub mod hours;
pub mod init;
pub mod palette;
pub mod search;
pub mod show;
pub mod story;

use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::books::Book;
use crate::config::Config;
use crate::export::{default_cache_dir, AssetLoader, Exporter};
use crate::render::load_font;
use crate::storage::{SqliteStore, TypedStore, SEARCH_RESULTS};

/// Global options shared by every command
pub struct GlobalArgs<'a> {
    pub config: Option<&'a Path>,
    pub store: Option<&'a Path>,
    pub api_url: Option<&'a str>,
    pub quiet: bool,
}

/// Loaded config plus the open store
pub struct Session {
    pub config: Config,
    pub store: SqliteStore,
    pub base_url: String,
    pub quiet: bool,
}

impl Session {
    pub fn open(args: &GlobalArgs<'_>) -> Result<Self> {
        let config = Config::load(args.config)?;
        let store_path = config.store_path(args.store)?;
        let store = SqliteStore::open(&store_path)
            .with_context(|| format!("Failed to open store {:?}", store_path))?;
        let base_url = config.base_url(args.api_url);

        Ok(Self {
            config,
            store,
            base_url,
            quiet: args.quiet,
        })
    }

    /// Resolve a book id against the last search results
    pub fn cached_book(&self, book_id: &str) -> Result<Book> {
        let results = self
            .store
            .get(&SEARCH_RESULTS)
            .context("Failed to read cached search results")?
            .unwrap_or_default();

        results
            .into_iter()
            .find(|book| book.id == book_id)
            .with_context(|| {
                format!(
                    "Book not found: {} (run 'coverly search' first and use an id from its results)",
                    book_id
                )
            })
    }

    /// Exporter writing into `out`, or the configured output directory
    pub fn exporter(&self, out: Option<&Path>) -> Result<Exporter> {
        let export = &self.config.export;
        let loader = AssetLoader::new(self.config.image_timeout(), default_cache_dir())
            .context("Failed to create image loader")?;

        let font = match load_font(export.font_path.as_deref()) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        let output_dir: PathBuf = self.config.output_dir(out);
        Ok(Exporter::new(loader, font, &output_dir, export.jpeg_quality))
    }
}

/// Drive an async operation to completion from a sync command
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    Ok(rt.block_on(future))
}

/// Session over a fresh store in `dir`, with default config
#[cfg(test)]
pub(crate) fn test_session(dir: &Path) -> Session {
    Session {
        config: Config::default(),
        store: SqliteStore::open(&dir.join("coverly.db")).unwrap(),
        base_url: "http://127.0.0.1:9".to_string(),
        quiet: true,
    }
}
