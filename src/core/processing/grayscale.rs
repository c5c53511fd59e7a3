use ndarray::Array2;

use crate::core::composite::CompositeImage;

// ITU-R BT.601 luma weights (0.299, 0.587, 0.114) in 14-bit fixed point
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Reduce an RGB composite to a single luma plane indexed `[[row, col]]`.
pub fn to_luma(image: &CompositeImage) -> Array2<u8> {
    let (cols, rows) = (image.width() as usize, image.height() as usize);
    let mut luma = Array2::<u8>::zeros((rows, cols));
    for (x, y, px) in image.as_rgb().enumerate_pixels() {
        luma[[y as usize, x as usize]] = luma_of(px.0);
    }
    luma
}

#[inline]
pub fn luma_of([r, g, b]: [u8; 3]) -> u8 {
    let weighted = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
    ((weighted + (1 << (SHIFT - 1))) >> SHIFT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn weights_sum_to_unity() {
        assert_eq!(R_WEIGHT + G_WEIGHT + B_WEIGHT, 1 << SHIFT);
        assert_eq!(luma_of([255, 255, 255]), 255);
        assert_eq!(luma_of([0, 0, 0]), 0);
        assert_eq!(luma_of([77, 77, 77]), 77);
    }

    #[test]
    fn green_dominates_blue() {
        assert!(luma_of([0, 200, 0]) > luma_of([200, 0, 0]));
        assert!(luma_of([200, 0, 0]) > luma_of([0, 0, 200]));
        assert_eq!(luma_of([255, 0, 0]), 76);
    }

    #[test]
    fn plane_is_rows_by_cols() {
        let rgb = RgbImage::from_fn(5, 3, |x, _| Rgb([x as u8 * 10; 3]));
        let luma = to_luma(&CompositeImage::from_rgb(rgb));
        assert_eq!(luma.dim(), (3, 5));
        assert_eq!(luma[[2, 4]], 40);
    }
}
