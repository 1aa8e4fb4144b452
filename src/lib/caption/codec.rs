//! Module handling the decoding & encoding of captioned images.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use image::{self, DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat};

use text::Canvas;
use super::error::CaptionError;


lazy_static! {
    /// Map of supported image formats to their file extensions.
    /// The first extension on every list is the preferred one.
    static ref FORMAT_EXTENSIONS: HashMap<ImageFormat, &'static [&'static str]> = hashmap!{
        ImageFormat::Gif => &["gif"][..],
        ImageFormat::Jpeg => &["jpg", "jpeg"][..],
        ImageFormat::Png => &["png"][..],
    };
}


/// Whether captioned images can be written back in given format.
#[inline]
pub fn is_supported(format: ImageFormat) -> bool {
    FORMAT_EXTENSIONS.contains_key(&format)
}

/// File extensions of given image format.
/// Empty if the format isn't supported.
pub fn extensions(format: ImageFormat) -> &'static [&'static str] {
    FORMAT_EXTENSIONS.get(&format).cloned().unwrap_or(&[])
}

/// Determine the supported image format from the extension of a file path.
pub fn format_for_path<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
    let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
    FORMAT_EXTENSIONS.iter()
        .find(|&(_, exts)| exts.contains(&ext.as_str()))
        .map(|(&format, _)| format)
}


/// Decode an image, detecting its format from the content.
///
/// Formats that cannot be encoded back are rejected before any decoding happens.
pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), CaptionError> {
    let format = image::guess_format(bytes).map_err(CaptionError::Decode)?;
    if !is_supported(format) {
        return Err(CaptionError::UnsupportedFormat(format));
    }
    trace!("Decoding {} byte(s) of {:?} image", bytes.len(), format);
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(CaptionError::Decode)?;
    Ok((img, format))
}

/// Encode the canvas as an image of given format.
pub fn encode(canvas: Canvas, format: ImageFormat,
              jpeg_quality: u8) -> Result<Vec<u8>, CaptionError> {
    let (img, output_format) = match format {
        ImageFormat::Png => (DynamicImage::ImageRgba8(canvas), ImageOutputFormat::Png),
        ImageFormat::Gif => (DynamicImage::ImageRgba8(canvas), ImageOutputFormat::Gif),
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
            (DynamicImage::ImageRgb8(rgb), ImageOutputFormat::Jpeg(jpeg_quality))
        }
        f => return Err(CaptionError::UnsupportedFormat(f)),
    };
    debug!("Encoding final {}x{} image as {:?}...", img.width(), img.height(), format);

    let mut bytes = vec![];
    img.write_to(&mut Cursor::new(&mut bytes), output_format)
        .map_err(CaptionError::Encode)?;
    trace!("Encoded image takes {} byte(s)", bytes.len());
    Ok(bytes)
}
