use crate::palette::Palette;
use crate::Error;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Rgba, RgbaImage};
use std::borrow::Cow;

/// Pack a color as `0xAARRGGBB`.
#[inline(always)]
pub fn pack_rgba(color: Rgba<u8>) -> u32 {
    let [r, g, b, a] = color.0;
    u32::from_be_bytes([a, r, g, b])
}

/// Unpack a `0xAARRGGBB` value.
#[inline(always)]
pub fn unpack_rgba(packed: u32) -> Rgba<u8> {
    let [a, r, g, b] = packed.to_be_bytes();
    Rgba([r, g, b, a])
}

/// Look up every pixel of an index `mask` in `palette`, producing a row-major
/// packed color buffer of `width * height` values.
pub fn color_buffer(mask: &GrayImage, palette: &Palette) -> Result<Vec<u32>, Error> {
    let lut: Vec<u32> = palette.entries().iter().map(|e| pack_rgba(e.color)).collect();
    let mut pixels = Vec::with_capacity(mask.width() as usize * mask.height() as usize);
    for (x, y, p) in mask.enumerate_pixels() {
        let index = p[0] as usize;
        let color = lut.get(index).ok_or_else(|| {
            Error::ArgumentError(format!(
                "Mask index `{}` at ({}, {}) out of palette range `{}`",
                index,
                x,
                y,
                lut.len()
            ))
        })?;
        pixels.push(*color);
    }
    Ok(pixels)
}

/// Construct an RGBA image from a row-major list of packed `0xAARRGGBB` pixels.
/// Pixel (col, row) of the output is `pixels[row * width + col]`.
pub fn render_image(pixels: &[u32], width: u32, height: u32) -> Result<RgbaImage, Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidPixelData(format!(
            "Image size must be positive, but got `{}x{}`",
            width, height
        )));
    }
    let expect = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| {
            Error::InvalidPixelData(format!("Image size `{}x{}` overflows", width, height))
        })?;
    if pixels.len() != expect {
        return Err(Error::InvalidPixelData(format!(
            "Expect `{}` pixels for image size `{}x{}`, but got `{}`",
            expect,
            width,
            height,
            pixels.len()
        )));
    }

    let mut buf = Vec::with_capacity(expect * 4);
    for p in pixels {
        buf.extend_from_slice(&unpack_rgba(*p).0);
    }
    RgbaImage::from_raw(width, height, buf).ok_or_else(|| {
        Error::InvalidPixelData(format!(
            "Cannot build `{}x{}` image from pixel buffer",
            width, height
        ))
    })
}

/// Draw `mask` over `base` with a uniform `alpha` in `[0, 1]`, scaling the mask
/// to the size of `base`. Inputs are left untouched.
pub fn overlay(base: &DynamicImage, mask: &RgbaImage, alpha: f32) -> Result<RgbaImage, Error> {
    if !(0. ..=1.).contains(&alpha) {
        return Err(Error::ArgumentError(format!(
            "Overlay alpha must in range [0, 1], but got `{}`",
            alpha
        )));
    }
    let (width, height) = (base.width(), base.height());
    if width == 0 || height == 0 {
        return Err(Error::InvalidPixelData(format!(
            "Base image size must be positive, but got `{}x{}`",
            width, height
        )));
    }
    if mask.width() == 0 || mask.height() == 0 {
        return Err(Error::InvalidPixelData(format!(
            "Mask image size must be positive, but got `{}x{}`",
            mask.width(),
            mask.height()
        )));
    }

    // nearest keeps label colors exact
    let mask: Cow<RgbaImage> = if mask.dimensions() == (width, height) {
        Cow::Borrowed(mask)
    } else {
        Cow::Owned(imageops::resize(mask, width, height, FilterType::Nearest))
    };

    let mut out = base.to_rgba8();
    for (o, m) in out.pixels_mut().zip(mask.pixels()) {
        let a = alpha * m[3] as f32 / 255.;
        for c in 0..3 {
            o[c] = (m[c] as f32 * a + o[c] as f32 * (1. - a)).round() as u8;
        }
        o[3] = (255. * a + o[3] as f32 * (1. - a)).round() as u8;
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pack_round_trip() {
        let c = Rgba([0x1E, 0x49, 0x28, 0xFF]);
        assert_eq!(pack_rgba(c), 0xFF1E_4928);
        assert_eq!(unpack_rgba(0xFF1E_4928), c);
        assert_eq!(unpack_rgba(pack_rgba(Rgba([1, 2, 3, 4]))), Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn test_render_image() {
        let pixels = [0xFF00_00FF, 0x80FF_0000, 0xFF00_FF00, 0x0000_0000, 0xFFFF_FFFF, 0xFF12_3456];
        let img = render_image(&pixels, 3, 2).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0xFF, 0xFF]));
        assert_eq!(*img.get_pixel(1, 0), Rgba([0xFF, 0, 0, 0x80]));
        assert_eq!(*img.get_pixel(2, 1), Rgba([0x12, 0x34, 0x56, 0xFF]));
        for (x, y, p) in img.enumerate_pixels() {
            assert_eq!(pack_rgba(*p), pixels[(y * 3 + x) as usize]);
        }

        // deterministic
        assert_eq!(render_image(&pixels, 3, 2).unwrap(), img);
    }

    #[test]
    fn test_render_image_invalid() {
        let pixels = [0u32; 6];
        assert!(matches!(
            render_image(&pixels[..5], 3, 2),
            Err(Error::InvalidPixelData(_))
        ));
        assert!(matches!(
            render_image(&pixels, 6, 0),
            Err(Error::InvalidPixelData(_))
        ));
        assert!(matches!(
            render_image(&[], 0, 0),
            Err(Error::InvalidPixelData(_))
        ));
        assert!(matches!(
            render_image(&pixels, 2, 2),
            Err(Error::InvalidPixelData(_))
        ));
    }

    #[test]
    fn test_color_buffer() {
        let mask = GrayImage::from_raw(2, 1, vec![6, 0]).unwrap();
        let pixels = color_buffer(&mask, &Palette::TISSUE).unwrap();
        assert_eq!(pixels, vec![0xFFFF_FF00, 0xFF1E_4928]);

        let mask = GrayImage::from_raw(1, 1, vec![10]).unwrap();
        assert!(color_buffer(&mask, &Palette::CONFIDENCE).is_err());
    }

    #[test]
    fn test_overlay() {
        let base = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        let mask = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));

        let out = overlay(&base, &mask, 0.5).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        for p in out.pixels() {
            assert_eq!(*p, Rgba([128, 128, 128, 255]));
        }

        let out = overlay(&base, &mask, 0.).unwrap();
        assert_eq!(out, base.to_rgba8());
        let out = overlay(&base, &mask, 1.).unwrap();
        assert_eq!(out, RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255])));

        // transparent mask pixels leave the base untouched
        let clear = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 0]));
        assert_eq!(overlay(&base, &clear, 1.).unwrap(), base.to_rgba8());
    }

    #[test]
    fn test_overlay_scales_mask() {
        let base = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255])));
        let mask = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let out = overlay(&base, &mask, 1.).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(2, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(*out.get_pixel(3, 1), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_overlay_invalid() {
        let base = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));
        let mask = RgbaImage::new(2, 2);
        assert!(matches!(
            overlay(&base, &mask, 1.5),
            Err(Error::ArgumentError(_))
        ));
        assert!(matches!(
            overlay(&base, &mask, f32::NAN),
            Err(Error::ArgumentError(_))
        ));
        assert!(matches!(
            overlay(&DynamicImage::ImageRgba8(RgbaImage::new(0, 0)), &mask, 0.5),
            Err(Error::InvalidPixelData(_))
        ));
        assert!(matches!(
            overlay(&base, &RgbaImage::new(0, 2), 0.5),
            Err(Error::InvalidPixelData(_))
        ));
    }
}
