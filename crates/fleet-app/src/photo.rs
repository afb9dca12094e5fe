//! Vehicle photos, stored inline as base64 `data:` URLs

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use fleet_types::{Error, Result};
use image::{DynamicImage, ImageFormat};

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Load an image, shrink it to fit `max_dimension`, and encode it as a JPEG data URL
pub fn encode_photo(path: &Path, max_dimension: u32) -> Result<String> {
    if max_dimension == 0 {
        return Err(Error::Photo("maximum photo dimension must be positive".to_string()));
    }
    if !path.exists() {
        return Err(Error::Photo(format!("file not found: {}", path.display())));
    }

    let img = image::open(path)?;
    let img = if img.width() > max_dimension || img.height() > max_dimension {
        img.thumbnail(max_dimension, max_dimension)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)?;

    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(buffer.into_inner())))
}

/// Decode the image bytes from a data URL produced by [`encode_photo`]
pub fn decode_photo(data_url: &str) -> Result<Vec<u8>> {
    let payload = data_url
        .split_once(";base64,")
        .map(|(_, data)| data)
        .ok_or_else(|| Error::Photo("not a base64 data URL".to_string()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| Error::Photo(e.to_string()))
}
