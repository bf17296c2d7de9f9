//! Export orchestration: reveal, load covers, rasterize, save, restore

use ab_glyph::FontVec;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::assets::AssetLoader;
use super::filename::file_name;
use super::stage::Stage;
use super::strategy::{default_strategies, RasterError, RasterJob, RasterStrategy, RenderedImage};
use crate::render::{CardProps, CardSummary};
use crate::story::TemplateKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Generating,
    Succeeded,
    Failed,
}

/// One strategy's failure, kept for diagnostics
#[derive(Debug)]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub error: RasterError,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Template not found: {0}")]
    TemplateNotFound(&'static str),

    #[error("Failed to generate the image.")]
    AllStrategiesFailed(Vec<StrategyFailure>),

    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Per-strategy errors, in the order the strategies ran
    pub fn failures(&self) -> &[StrategyFailure] {
        match self {
            ExportError::AllStrategiesFailed(failures) => failures,
            _ => &[],
        }
    }
}

/// What to export: which stage node, how to name the file, and the
/// reduced content for the fallback card
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub kind: TemplateKind,
    pub title: String,
    pub fallback_stem: &'static str,
    pub summary: CardSummary,
}

impl ExportRequest {
    pub fn from_props(props: &CardProps<'_>) -> Self {
        Self {
            kind: props.kind(),
            title: props.title().to_string(),
            fallback_stem: props.fallback_file_stem(),
            summary: props.summary(),
        }
    }
}

#[derive(Debug)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub image: RenderedImage,
}

pub struct Exporter {
    loader: AssetLoader,
    strategies: Vec<Box<dyn RasterStrategy>>,
    font: Option<FontVec>,
    output_dir: PathBuf,
    state: ExportState,
}

impl Exporter {
    pub fn new(loader: AssetLoader, font: Option<FontVec>, output_dir: &Path, jpeg_quality: u8) -> Self {
        Self {
            loader,
            strategies: default_strategies(jpeg_quality),
            font,
            output_dir: output_dir.to_path_buf(),
            state: ExportState::Idle,
        }
    }

    #[cfg(test)]
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn RasterStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Current state; a finished export's outcome is kept until the next one starts
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Capture the request's stage node into a file in the output directory.
    ///
    /// The node is revealed for the duration of the capture and its previous
    /// style is restored on every path, including failures.
    pub async fn export(&mut self, stage: &mut Stage, request: &ExportRequest) -> Result<ExportOutcome, ExportError> {
        if self.state != ExportState::Idle {
            debug!("Export state {:?} -> Idle", self.state);
            self.state = ExportState::Idle;
        }
        self.state = ExportState::Generating;

        let result = self.run(stage, request).await;
        self.state = match &result {
            Ok(outcome) => {
                info!(
                    "Exported {} via {} strategy",
                    outcome.path.display(),
                    outcome.image.strategy
                );
                ExportState::Succeeded
            }
            Err(e) => {
                warn!("Export of {} failed: {}", request.kind.name(), e);
                ExportState::Failed
            }
        };
        result
    }

    async fn run(&self, stage: &mut Stage, request: &ExportRequest) -> Result<ExportOutcome, ExportError> {
        let node_id = request.kind.node_id();
        let guard = stage
            .reveal(node_id)
            .ok_or(ExportError::TemplateNotFound(node_id))?;
        let node = guard.node();
        debug!(node = node.id(), style = node.style(), "capturing template");
        let scene = node.scene();

        let urls = scene.image_urls();
        debug!("Waiting for {} cover image(s)", urls.len());
        let assets = self.loader.load_all(&urls).await;

        let job = RasterJob {
            scene,
            summary: &request.summary,
            assets: &assets,
            font: self.font.as_ref(),
        };
        let image = self.rasterize(&job)?;

        let path = self
            .output_dir
            .join(file_name(&request.title, request.fallback_stem, image.format));
        save(&path, &image.bytes).map_err(|source| ExportError::Save {
            path: path.clone(),
            source,
        })?;

        Ok(ExportOutcome { path, image })
    }

    /// First successful strategy wins; every failure is logged and kept
    fn rasterize(&self, job: &RasterJob<'_>) -> Result<RenderedImage, ExportError> {
        let mut failures = Vec::new();
        for strategy in &self.strategies {
            match strategy.rasterize(job) {
                Ok(image) => return Ok(image),
                Err(error) => {
                    warn!("{} rasterization failed: {}", strategy.name(), error);
                    failures.push(StrategyFailure {
                        strategy: strategy.name(),
                        error,
                    });
                }
            }
        }
        Err(ExportError::AllStrategiesFailed(failures))
    }
}

fn save(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}
