//! Serialize a bitmap to an uncompressed 24-bit BMP file.

use crate::bitmap::Bitmap;

// BITMAPFILEHEADER plus BITMAPINFOHEADER
const HEADER_SIZE: usize = 14 + 40;

/// Encode the bitmap as a Windows BMP: 24 bits per pixel, BGR channel order,
/// rows padded to 4 bytes and written bottom-up. The alpha channel is
/// dropped.
pub fn export(bitmap: &Bitmap) -> Vec<u8> {
    let width = bitmap.width() as usize;
    let height = bitmap.height() as usize;

    let row_size = (width * 3 + 3) / 4 * 4;
    let data_size = row_size * height;
    let file_size = HEADER_SIZE + data_size;

    let mut out = Vec::with_capacity(file_size);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes()); // reserved
    out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes()); // pixel data offset

    // BITMAPINFOHEADER
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&(bitmap.width() as i32).to_le_bytes());
    out.extend_from_slice(&(bitmap.height() as i32).to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes()); // color planes
    out.extend_from_slice(&24_u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0_u32.to_le_bytes()); // no compression
    out.extend_from_slice(&(data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835_i32.to_le_bytes()); // x pixels per meter
    out.extend_from_slice(&2835_i32.to_le_bytes()); // y pixels per meter
    out.extend_from_slice(&0_u32.to_le_bytes()); // palette size
    out.extend_from_slice(&0_u32.to_le_bytes()); // important colors

    for y in (0..bitmap.height()).rev() {
        for x in 0..bitmap.width() {
            let px = bitmap.pixel(x, y);
            out.push(px.b);
            out.push(px.g);
            out.push(px.r);
        }

        for _ in width * 3..row_size {
            out.push(0);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::bitmap::Rgba;

    #[test]
    fn test_header_and_padding() {
        let bitmap = Bitmap::new(3, 2, Rgba::new(0, 0, 0, 255));

        let bytes = export(&bitmap);

        assert_eq!(&bytes[0..2], b"BM");
        // 3 * 3 bytes per row padded to 12
        assert_eq!(bytes.len(), HEADER_SIZE + 12 * 2);
        assert_eq!(bytes.len(), u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]) as usize);
    }

    #[test]
    fn test_round_trip_preserves_rgb() {
        let mut bitmap = Bitmap::new(3, 2, Rgba::new(0, 0, 0, 255));
        bitmap.set_pixel(0, 0, Rgba::new(10, 20, 30, 255));
        bitmap.set_pixel(2, 0, Rgba::new(200, 100, 50, 128));
        bitmap.set_pixel(1, 1, Rgba::new(255, 0, 255, 0));

        let bytes = export(&bitmap);

        let decoded = image::load_from_memory(&bytes)
            .expect("the exported bmp must decode")
            .to_rgb8();

        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);

        for y in 0..2 {
            for x in 0..3 {
                let expected = bitmap.pixel(x, y);
                let got = decoded.get_pixel(x, y);

                assert_eq!(
                    (got[0], got[1], got[2]),
                    (expected.r, expected.g, expected.b),
                    "pixel ({}, {})",
                    x,
                    y
                );
            }
        }
    }
}
