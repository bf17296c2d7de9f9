//! Rasterization strategies, tried in order until one produces an image

use ab_glyph::FontVec;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use thiserror::Error;

use crate::render::scene::{Align, Fill, TextStyle};
use crate::render::{paint_scene, AssetSet, CardSummary, PaintError, Rgb, Scene};
use crate::render::templates::FOOTER_TEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Encoded output of a successful strategy
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub strategy: &'static str,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    Paint(#[from] PaintError),

    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Inputs shared by every strategy for one export
pub struct RasterJob<'a> {
    pub scene: &'a Scene,
    pub summary: &'a CardSummary,
    pub assets: &'a AssetSet,
    pub font: Option<&'a FontVec>,
}

pub trait RasterStrategy {
    fn name(&self) -> &'static str;

    fn rasterize(&self, job: &RasterJob<'_>) -> Result<RenderedImage, RasterError>;
}

/// PNG, then JPEG, then the reduced sketch card
pub fn default_strategies(jpeg_quality: u8) -> Vec<Box<dyn RasterStrategy>> {
    vec![
        Box::new(PngStrategy),
        Box::new(JpegStrategy::new(jpeg_quality)),
        Box::new(SketchStrategy),
    ]
}

/// Full scene, lossless
pub struct PngStrategy;

impl RasterStrategy for PngStrategy {
    fn name(&self) -> &'static str {
        "png"
    }

    fn rasterize(&self, job: &RasterJob<'_>) -> Result<RenderedImage, RasterError> {
        let image = paint_scene(job.scene, job.assets, job.font)?;
        encode_png(self.name(), &image)
    }
}

/// Full scene, lossy
pub struct JpegStrategy {
    quality: u8,
}

impl JpegStrategy {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl RasterStrategy for JpegStrategy {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn rasterize(&self, job: &RasterJob<'_>) -> Result<RenderedImage, RasterError> {
        let image = paint_scene(job.scene, job.assets, job.font)?;
        let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality).write_image(
            &rgb,
            width,
            height,
            ExtendedColorType::Rgb8,
        )?;

        Ok(RenderedImage {
            strategy: self.name(),
            format: ImageFormat::Jpeg,
            width,
            height,
            bytes,
        })
    }
}

/// Degraded card: gradient background with title, subtitle, stars, hours
/// and mood. Covers, quotes and progress are not drawn.
pub struct SketchStrategy;

impl SketchStrategy {
    pub fn sketch_scene(summary: &CardSummary, width: u32, height: u32) -> Scene {
        let mut scene = Scene::new(width, height);
        scene.background(Fill::Linear(summary.background));

        let margin = 80;
        let content = width.saturating_sub(160);
        let white = |size: f32| TextStyle::new(size, Rgb::WHITE.into(), Align::Center);

        let mut y = scene.paragraph(margin, height as i32 / 3, content, &summary.title, white(80.0), 20, 3);
        if !summary.subtitle.is_empty() {
            y = scene.paragraph(margin, y + 20, content, &summary.subtitle, white(40.0), 40, 3);
        }
        if let Some(row) = summary.stars {
            scene.stars(
                margin,
                y + 40,
                content,
                56.0,
                row,
                Rgb(0xff, 0xd7, 0x00).into(),
                Rgb::WHITE.with_alpha(90),
                Align::Center,
            );
            y += 120;
        }
        if let Some(hours) = &summary.hours {
            scene.text(margin, y + 40, content, hours.as_str(), white(40.0));
            y += 80;
        }
        if let Some(mood) = &summary.mood {
            scene.text(margin, y + 40, content, mood.as_str(), white(40.0));
        }
        scene.text(margin, height as i32 - 90, content, FOOTER_TEXT, white(28.0));
        scene
    }
}

impl RasterStrategy for SketchStrategy {
    fn name(&self) -> &'static str {
        "sketch"
    }

    fn rasterize(&self, job: &RasterJob<'_>) -> Result<RenderedImage, RasterError> {
        let scene = Self::sketch_scene(job.summary, job.scene.width, job.scene.height);
        let image = paint_scene(&scene, &AssetSet::new(), job.font)?;
        encode_png(self.name(), &image)
    }
}

fn encode_png(strategy: &'static str, image: &RgbaImage) -> Result<RenderedImage, RasterError> {
    let (width, height) = image.dimensions();
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(image, width, height, ExtendedColorType::Rgba8)?;
    Ok(RenderedImage {
        strategy,
        format: ImageFormat::Png,
        width,
        height,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scene::Rect;
    use crate::render::Gradient;
    use crate::story::StarRow;

    fn summary() -> CardSummary {
        CardSummary {
            title: "O Hobbit".to_string(),
            subtitle: "por J.R.R. Tolkien".to_string(),
            stars: Some(StarRow::new(4.0, 5)),
            hours: Some("12 horas".to_string()),
            mood: Some("😌 Me senti relaxado".to_string()),
            background: Gradient::diagonal(Rgb(0xa8, 0xed, 0xea), Rgb(0xfe, 0xd6, 0xe3)),
        }
    }

    fn shapes_only() -> Scene {
        let mut scene = Scene::new(60, 90);
        scene.background(Fill::Solid(Rgb(20, 40, 60).into()));
        scene.fill(Rect::new(10, 10, 20, 20), Fill::Solid(Rgb::WHITE.into()));
        scene
    }

    #[test]
    fn test_png_strategy() {
        let scene = shapes_only();
        let summary = summary();
        let assets = AssetSet::new();
        let job = RasterJob {
            scene: &scene,
            summary: &summary,
            assets: &assets,
            font: None,
        };
        let image = PngStrategy.rasterize(&job).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!((image.width, image.height), (60, 90));
        assert!(image.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_jpeg_strategy() {
        let scene = shapes_only();
        let summary = summary();
        let assets = AssetSet::new();
        let job = RasterJob {
            scene: &scene,
            summary: &summary,
            assets: &assets,
            font: None,
        };
        let image = JpegStrategy::new(90).rasterize(&job).unwrap();
        assert_eq!(image.format, ImageFormat::Jpeg);
        assert_eq!(image.format.extension(), "jpg");
        assert!(image.bytes.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_sketch_needs_a_font() {
        let scene = shapes_only();
        let summary = summary();
        let assets = AssetSet::new();
        let job = RasterJob {
            scene: &scene,
            summary: &summary,
            assets: &assets,
            font: None,
        };
        let err = SketchStrategy.rasterize(&job).unwrap_err();
        assert!(matches!(err, RasterError::Paint(PaintError::MissingFont)));
    }

    #[test]
    fn test_sketch_scene_keeps_reduced_content() {
        let scene = SketchStrategy::sketch_scene(&summary(), 1080, 1920);
        assert!(scene.contains_text("O Hobbit"));
        assert!(scene.contains_text("por J.R.R. Tolkien"));
        assert!(scene.contains_text("12 horas"));
        assert!(scene.contains_text("Me senti relaxado"));
        assert_eq!(scene.star_rows(), vec![StarRow::new(4.0, 5)]);
        assert!(scene.image_urls().is_empty());
    }

    #[test]
    fn test_default_strategy_order() {
        let names: Vec<&str> = default_strategies(90).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["png", "jpeg", "sketch"]);
    }
}
