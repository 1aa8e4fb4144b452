//! Module implementing the compositing of captions onto an image.

use image::{DynamicImage, GenericImageView};
use itertools::Itertools;

use model::{Caption, pixel_point, Point};
use model::constants::MAX_PIXEL_OFFSET;
use text::{Canvas, FaceFactory, OutlineRenderer, OutlineStyle};
use text::check_size;
use super::engine::Config;
use super::error::CaptionError;


/// Draws the top & bottom captions onto a copy of the source image.
pub struct Compositor<'f> {
    faces: &'f dyn FaceFactory,
    config: Config,
}

impl<'f> Compositor<'f> {
    #[inline]
    pub fn new(faces: &'f dyn FaceFactory, config: Config) -> Self {
        Compositor{faces, config}
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<'f> Compositor<'f> {
    /// Render the captions onto a copy of the source image.
    ///
    /// The source itself is never modified.
    pub fn render(&self, source: &DynamicImage,
                  top: &str, bottom: &str) -> Result<Canvas, CaptionError> {
        let (width, height) = source.dimensions();
        let size = self.font_size(height)?;
        debug!("Captioning {}x{} image with {}px text", width, height, size);

        let mut canvas = source.to_rgba8();
        let (top_anchor, bottom_anchor) = self.anchors(width, height, size);
        let renderer = OutlineRenderer::new(self.faces, self.outline_style());

        let captions = [Caption::new(top, top_anchor), Caption::new(bottom, bottom_anchor)];
        for caption in captions.iter() {
            if caption.is_empty() {
                debug!("Empty caption text at {:?}, skipping.", caption.anchor);
                continue;
            }
            self.check_glyphs(caption);
            let origin = renderer.render(&mut canvas, caption, size)?;
            trace!("Rendered {:?} from ({}, {})", caption, origin.x, origin.y);
        }
        Ok(canvas)
    }

    /// Font size (in pixels) of captions on an image of given height.
    pub fn font_size(&self, height: u32) -> Result<f32, CaptionError> {
        let size = height as f32 / self.config.size_divisor;
        check_size(size).map_err(|e| {
            warn!("Cannot caption image of height {} with size divisor {}",
                height, self.config.size_divisor);
            e
        })
    }

    /// Anchor points of the top & bottom captions.
    ///
    /// Coordinates are clamped to the range representable by `Point`.
    pub fn anchors(&self, width: u32, height: u32, size: f32) -> (Point, Point) {
        let x = (width / 2) as i64;
        let half_size = (size / 2.0) as i64;
        let margin = self.config.edge_margin as i64;
        (clamped_point(x, half_size + margin),
         clamped_point(x, height as i64 - half_size - margin))
    }

    fn outline_style(&self) -> OutlineStyle {
        OutlineStyle{
            strategy: self.config.outline_strategy,
            thickness: self.config.outline_thickness,
            proportion: self.config.outline_proportion,
            outline_color: self.config.outline_color,
            fill_color: self.config.fill_color,
        }
    }

    fn check_glyphs(&self, caption: &Caption) {
        let missing = self.faces.missing_glyphs(&caption.text);
        if !missing.is_empty() {
            warn!("Font is missing glyphs for {} character(s) of {:?}: {}",
                missing.len(), caption.text,
                missing.iter().map(|c| format!("{:?}", c)).join(", "));
        }
    }
}

/// Point at given whole pixel coordinates, clamped to what `Fixed` can represent.
fn clamped_point(x: i64, y: i64) -> Point {
    let limit = MAX_PIXEL_OFFSET as i64;
    let clamp = |v: i64| v.max(-limit).min(limit) as i32;
    pixel_point(clamp(x), clamp(y))
}


#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgba, RgbaImage};
    use spectral::prelude::*;

    use caption::{CaptionError, Config};
    use model::{Fixed, OutlineStrategy};
    use model::constants::MAX_PIXEL_OFFSET;
    use text::testing::BoxFactory;
    use super::Compositor;

    const BACKGROUND: Rgba<u8> = Rgba([0x10, 0x20, 0x30, 0xff]);

    fn source(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, BACKGROUND))
    }

    fn stamp_config() -> Config {
        Config{outline_strategy: OutlineStrategy::EightDirectionStamp, ..Config::default()}
    }

    #[test]
    fn font_size_and_anchors() {
        let faces = BoxFactory::new();
        let compositor = Compositor::new(&faces, Config::default());
        let size = compositor.font_size(160).unwrap();
        assert_eq!(10.0, size);

        let (top, bottom) = compositor.anchors(200, 160, size);
        assert_eq!(Fixed::from_int(100), top.x);
        assert_eq!(Fixed::from_int(15), top.y);
        assert_eq!(Fixed::from_int(100), bottom.x);
        assert_eq!(Fixed::from_int(160 - 15), bottom.y);
    }

    #[test]
    fn fractional_size_truncates_anchor_offset() {
        let faces = BoxFactory::new();
        let compositor = Compositor::new(&faces, Config::default());
        let size = compositor.font_size(100).unwrap();  // 6.25px
        let (top, bottom) = compositor.anchors(101, 100, size);
        assert_eq!(Fixed::from_int(50), top.x);
        assert_eq!(Fixed::from_int(13), top.y);
        assert_eq!(Fixed::from_int(87), bottom.y);
    }

    #[test]
    fn huge_margin_anchors_are_clamped() {
        let faces = BoxFactory::new();
        let config = Config{edge_margin: ::std::i32::MAX as u32, ..Config::default()};
        let compositor = Compositor::new(&faces, config);
        let (top, bottom) = compositor.anchors(200, 160, 10.0);
        assert_eq!(Fixed::from_int(100), top.x);
        assert_eq!(Fixed::from_int(MAX_PIXEL_OFFSET as i32), top.y);
        assert_eq!(Fixed::from_int(-(MAX_PIXEL_OFFSET as i32)), bottom.y);
    }

    #[test]
    fn zero_height_image() {
        let faces = BoxFactory::new();
        let compositor = Compositor::new(&faces, Config::default());
        match compositor.render(&source(100, 0), "top", "bottom") {
            Err(CaptionError::InvalidSize(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_that!(faces.sizes()).is_empty();
    }

    #[test]
    fn invalid_divisor() {
        let faces = BoxFactory::new();
        let config = Config{size_divisor: 0.0, ..Config::default()};
        let compositor = Compositor::new(&faces, config);
        assert_that!(compositor.render(&source(100, 100), "top", "")).is_err();
        assert_that!(faces.calls()).is_empty();
    }

    #[test]
    fn empty_captions_leave_image_intact() {
        let faces = BoxFactory::new();
        let compositor = Compositor::new(&faces, Config::default());
        let source = source(120, 160);
        let canvas = compositor.render(&source, "", "").unwrap();
        assert_eq!(source.to_rgba8(), canvas);
        assert_that!(faces.sizes()).is_empty();
    }

    #[test]
    fn canvas_matches_source_dimensions() {
        let faces = BoxFactory::new();
        let compositor = Compositor::new(&faces, stamp_config());
        let canvas = compositor.render(&source(120, 160), "top", "bottom").unwrap();
        assert_eq!((120, 160), canvas.dimensions());
        assert!(canvas.pixels().any(|p| *p != BACKGROUND));
    }

    #[test]
    fn top_caption_doesnt_affect_bottom() {
        let source = source(200, 160);

        let alone = BoxFactory::new();
        Compositor::new(&alone, stamp_config()).render(&source, "", "bottom").unwrap();
        let alone_calls = alone.calls();

        let both = BoxFactory::new();
        Compositor::new(&both, stamp_config()).render(&source, "top text", "bottom").unwrap();
        let both_calls = both.calls();

        // 8 outline stamps + 1 fill for each glyph.
        assert_eq!(9 * "BOTTOM".len(), alone_calls.len());
        assert_eq!(9 * "TOP TEXT".len(), both_calls.len() - alone_calls.len());
        assert_eq!(&alone_calls[..], &both_calls[both_calls.len() - alone_calls.len()..]);
    }

    #[test]
    fn captions_are_uppercased() {
        let faces = BoxFactory::new();
        let config = Config{
            outline_strategy: OutlineStrategy::SizeDifferentialShadow, ..Config::default()
        };
        Compositor::new(&faces, config).render(&source(200, 160), "lulz", "on demand").unwrap();
        let texts: Vec<_> = faces.calls().into_iter().map(|c| c.text).collect();
        assert_eq!(vec!["LULZ".to_owned(), "ON DEMAND".to_owned()], texts);
    }

    #[test]
    fn render_failure() {
        let faces = BoxFactory::failing_on("B");
        let compositor = Compositor::new(&faces, Config::default());
        match compositor.render(&source(200, 160), "a", "b") {
            Err(CaptionError::Render(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
