use eframe::egui::ColorImage;
use tracing::debug;

/// Downloads and decodes a thumbnail image. Returns None on any failure.
pub fn fetch_thumbnail(url: &str) -> Option<ColorImage> {
    // Perform a blocking HTTP GET request
    let bytes = match reqwest::blocking::get(url).and_then(|r| r.error_for_status()?.bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(url, error = %e, "thumbnail fetch failed");
            return None;
        }
    };
    decode_thumbnail(&bytes)
}

/// Decodes any format `image` understands into an egui image
pub fn decode_thumbnail(bytes: &[u8]) -> Option<ColorImage> {
    let img = match image::load_from_memory(bytes) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            debug!(error = %e, "thumbnail decode failed");
            return None;
        }
    };
    let size = [img.width() as usize, img.height() as usize];
    // egui expects straight (non-premultiplied) RGBA here
    Some(ColorImage::from_rgba_unmultiplied(size, &img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_png() {
        let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .unwrap();

        let decoded = decode_thumbnail(&buf).unwrap();
        assert_eq!(decoded.size, [4, 3]);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_thumbnail(b"definitely not an image").is_none());
    }
}
