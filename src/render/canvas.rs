//! Rasterize a [`Scene`] into an RGBA bitmap

use ab_glyph::{Font, FontVec, PxScale};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Pixel, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};
use thiserror::Error;

use super::assets::AssetSet;
use super::color::{Gradient, Rgb, Rgba};
use super::font::{drawable_text, line_width};
use super::scene::{Align, Fill, ImageSource, Paint, Rect, Scene, TextStyle};
use crate::story::StarRow;

/// Background of the generated "Sem Capa" cover
pub const PLACEHOLDER_GRADIENT: Gradient =
    Gradient::diagonal(Rgb(0x66, 0x7e, 0xea), Rgb(0x76, 0x4b, 0xa2));
pub const PLACEHOLDER_LABEL: &str = "Sem Capa";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaintError {
    #[error("Scene has no drawable area ({0}x{1})")]
    EmptyCanvas(u32, u32),

    #[error("No font loaded; cannot draw text")]
    MissingFont,
}

/// Paint every command of `scene`, in order, onto a fresh bitmap
pub fn paint_scene(
    scene: &Scene,
    assets: &AssetSet,
    font: Option<&FontVec>,
) -> Result<RgbaImage, PaintError> {
    let mut canvas = Canvas::new(scene.width, scene.height, font)?;
    for command in &scene.commands {
        canvas.paint(command, assets)?;
    }
    Ok(canvas.into_image())
}

pub struct Canvas<'f> {
    image: RgbaImage,
    font: Option<&'f FontVec>,
}

impl<'f> Canvas<'f> {
    pub fn new(width: u32, height: u32, font: Option<&'f FontVec>) -> Result<Self, PaintError> {
        if width == 0 || height == 0 {
            return Err(PaintError::EmptyCanvas(width, height));
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255])),
            font,
        })
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn paint(&mut self, command: &Paint, assets: &AssetSet) -> Result<(), PaintError> {
        match command {
            Paint::Rect { rect, fill } => self.fill_rect(*rect, fill),
            Paint::Circle {
                cx,
                cy,
                radius,
                color,
            } => draw_filled_circle_mut(&mut self.image, (*cx, *cy), *radius, pixel(*color)),
            Paint::Text {
                x,
                y,
                width,
                text,
                style,
            } => self.text(*x, *y, *width, text, style)?,
            Paint::Image { rect, source } => {
                let loaded = match source {
                    ImageSource::Url(url) => assets.get(url),
                    ImageSource::Placeholder => None,
                };
                match loaded {
                    Some(cover) => self.cover(*rect, cover),
                    None => self.placeholder(*rect),
                }
            }
            Paint::Stars {
                x,
                y,
                width,
                size,
                row,
                lit,
                dim,
                align,
            } => self.stars(*x, *y, *width, *size, *row, (*lit, *dim), *align),
        }
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        let (width, height) = self.image.dimensions();
        let x0 = rect.x.max(0) as u32;
        let y0 = rect.y.max(0) as u32;
        let x1 = (rect.right().max(0) as u32).min(width);
        let y1 = (rect.bottom().max(0) as u32).min(height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let w = rect.width.max(1) as f32;
        let h = rect.height.max(1) as f32;
        for y in y0..y1 {
            for x in x0..x1 {
                let color = match fill {
                    Fill::Solid(color) => *color,
                    Fill::Linear(gradient) => {
                        let u = (x as i32 - rect.x) as f32 / w;
                        let v = (y as i32 - rect.y) as f32 / h;
                        gradient.sample(u, v).into()
                    }
                };
                self.blend(x, y, color);
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        if color.3 == 255 {
            self.image.put_pixel(x, y, pixel(color));
        } else if color.3 > 0 {
            self.image.get_pixel_mut(x, y).blend(&pixel(color));
        }
    }

    fn text(&mut self, x: i32, y: i32, width: u32, text: &str, style: &TextStyle) -> Result<(), PaintError> {
        let font = self.font.ok_or(PaintError::MissingFont)?;
        let text = drawable_text(font, text);
        if text.is_empty() {
            return Ok(());
        }
        let left = match style.align {
            Align::Left => x,
            Align::Center => {
                let measured = line_width(font, style.size, &text);
                x + ((width as f32 - measured) / 2.0).max(0.0) as i32
            }
        };
        draw_text_mut(
            &mut self.image,
            pixel(style.color),
            left,
            y,
            PxScale::from(style.size),
            font,
            &text,
        );
        Ok(())
    }

    fn cover(&mut self, rect: Rect, cover: &RgbaImage) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let fitted = DynamicImage::ImageRgba8(cover.clone())
            .resize_to_fill(rect.width, rect.height, FilterType::Triangle)
            .to_rgba8();
        imageops::overlay(&mut self.image, &fitted, rect.x as i64, rect.y as i64);
    }

    /// Gradient block with a centered "Sem Capa" label
    pub fn placeholder(&mut self, rect: Rect) {
        self.fill_rect(rect, &Fill::Linear(PLACEHOLDER_GRADIENT));
        let Some(font) = self.font else {
            return;
        };
        let size = (rect.width as f32 / 8.0).clamp(12.0, 48.0);
        let label_width = line_width(font, size, PLACEHOLDER_LABEL);
        let x = rect.x + ((rect.width as f32 - label_width) / 2.0).max(0.0) as i32;
        let y = rect.y + (rect.height as i32 - size as i32) / 2;
        draw_text_mut(
            &mut self.image,
            pixel(Rgb::WHITE.with_alpha(217)),
            x,
            y,
            PxScale::from(size),
            font,
            PLACEHOLDER_LABEL,
        );
    }

    /// Star glyphs when the font has them, dots otherwise
    #[allow(clippy::too_many_arguments)]
    pub fn stars(&mut self, x: i32, y: i32, width: u32, size: f32, row: StarRow, colors: (Rgba, Rgba), align: Align) {
        let step = (size * 1.15).round() as i32;
        let total = step * row.max as i32;
        let mut cursor = match align {
            Align::Left => x,
            Align::Center => x + (width as i32 - total).max(0) / 2,
        };
        let glyph_font = self.font.filter(|f| f.glyph_id('★').0 != 0);

        for lit in row.glyphs() {
            let color = pixel(if lit { colors.0 } else { colors.1 });
            match glyph_font {
                Some(font) => {
                    draw_text_mut(&mut self.image, color, cursor, y, PxScale::from(size), font, "★")
                }
                None => {
                    let radius = (size / 3.0).round() as i32;
                    let center = (cursor + step / 2, y + (size / 2.0) as i32);
                    draw_filled_circle_mut(&mut self.image, center, radius, color);
                }
            }
            cursor += step;
        }
    }
}

fn pixel(color: Rgba) -> image::Rgba<u8> {
    image::Rgba([color.0, color.1, color.2, color.3])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_at(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        image.get_pixel(x, y).0
    }

    #[test]
    fn test_empty_canvas_rejected() {
        let scene = Scene::new(0, 10);
        assert_eq!(
            paint_scene(&scene, &AssetSet::new(), None).unwrap_err(),
            PaintError::EmptyCanvas(0, 10)
        );
    }

    #[test]
    fn test_solid_fill_and_clipping() {
        let mut scene = Scene::new(20, 20);
        scene.fill(Rect::new(-5, -5, 15, 15), Fill::Solid(Rgb(10, 20, 30).into()));
        let image = paint_scene(&scene, &AssetSet::new(), None).unwrap();
        assert_eq!(rgba_at(&image, 0, 0), [10, 20, 30, 255]);
        assert_eq!(rgba_at(&image, 9, 9), [10, 20, 30, 255]);
        assert_eq!(rgba_at(&image, 10, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut scene = Scene::new(4, 4);
        scene.background(Fill::Solid(Rgb(0, 0, 0).into()));
        scene.background(Fill::Solid(Rgb::WHITE.with_alpha(128)));
        let image = paint_scene(&scene, &AssetSet::new(), None).unwrap();
        let [r, g, b, a] = rgba_at(&image, 1, 1);
        assert!((120..=136).contains(&r), "red channel {}", r);
        assert_eq!((r, g), (g, b));
        assert_eq!(a, 255);
    }

    #[test]
    fn test_gradient_runs_between_stops() {
        let mut scene = Scene::new(100, 1);
        let gradient = Gradient {
            angle_deg: 90.0,
            from: Rgb(0, 0, 0),
            to: Rgb(200, 200, 200),
        };
        scene.background(Fill::Linear(gradient));
        let image = paint_scene(&scene, &AssetSet::new(), None).unwrap();
        assert!(rgba_at(&image, 0, 0)[0] < 10);
        assert!(rgba_at(&image, 99, 0)[0] > 190);
    }

    #[test]
    fn test_text_without_font_fails() {
        let mut scene = Scene::new(50, 50);
        scene.text(0, 0, 50, "O Hobbit", TextStyle::new(12.0, Rgb::INK.into(), Align::Left));
        assert_eq!(
            paint_scene(&scene, &AssetSet::new(), None).unwrap_err(),
            PaintError::MissingFont
        );
    }

    #[test]
    fn test_missing_asset_paints_placeholder() {
        let mut scene = Scene::new(40, 60);
        scene.image(
            Rect::new(0, 0, 40, 60),
            ImageSource::Url("https://covers.example.com/missing.jpg".to_string()),
        );
        let image = paint_scene(&scene, &AssetSet::new(), None).unwrap();
        let corner = rgba_at(&image, 0, 0);
        assert_eq!(&corner[..3], &[0x66, 0x7e, 0xea]);
    }

    #[test]
    fn test_loaded_asset_fills_rect() {
        let mut assets = AssetSet::new();
        let url = "https://covers.example.com/red.png";
        assets.insert(url, RgbaImage::from_pixel(8, 12, image::Rgba([200, 0, 0, 255])));

        let mut scene = Scene::new(30, 30);
        scene.image(Rect::new(5, 5, 10, 20), ImageSource::Url(url.to_string()));
        let image = paint_scene(&scene, &assets, None).unwrap();
        assert_eq!(rgba_at(&image, 6, 6), [200, 0, 0, 255]);
        assert_eq!(rgba_at(&image, 14, 24), [200, 0, 0, 255]);
        assert_eq!(rgba_at(&image, 16, 6), [255, 255, 255, 255]);
    }

    #[test]
    fn test_stars_without_font_draw_dots() {
        let mut scene = Scene::new(100, 20);
        let lit = Rgb(250, 200, 0).into();
        let dim = Rgb(200, 200, 200).into();
        scene.stars(0, 0, 100, 15.0, StarRow::new(2.0, 5), lit, dim, Align::Left);
        let image = paint_scene(&scene, &AssetSet::new(), None).unwrap();
        // Centers of the first (lit) and last (dim) dot
        assert_eq!(rgba_at(&image, 8, 7), [250, 200, 0, 255]);
        assert_eq!(rgba_at(&image, 77, 7), [200, 200, 200, 255]);
    }
}
