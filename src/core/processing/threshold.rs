use ndarray::Array2;
use tracing::debug;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

fn histogram(plane: &Array2<u8>) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in plane.iter() {
        hist[v as usize] += 1;
    }
    hist
}

/// Global threshold by Otsu's method.
///
/// Picks the level `t` that maximises the between-class variance of the
/// `<= t` and `> t` classes, which is the same as minimising the weighted
/// intra-class variance. Ties keep the lowest level. A plane with a single
/// populated bin returns that bin's level.
pub fn otsu_level(plane: &Array2<u8>) -> u8 {
    let hist = histogram(plane);
    let total = plane.len() as f64;
    if total == 0.0 {
        return 0;
    }

    let mean: f64 = hist
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum::<f64>()
        / total;

    let mut best_level = 0u8;
    let mut best_sigma = 0.0f64;
    let mut weight_low = 0.0f64;
    let mut mean_low = 0.0f64;

    for (level, &count) in hist.iter().enumerate() {
        let p = count as f64 / total;
        let prev_weight = weight_low;
        weight_low += p;
        if weight_low > 0.0 {
            mean_low = (mean_low * prev_weight + level as f64 * p) / weight_low;
        }
        let weight_high = 1.0 - weight_low;
        if weight_low.min(weight_high) < f64::from(f32::EPSILON)
            || weight_low.max(weight_high) > 1.0 - f64::from(f32::EPSILON)
        {
            continue;
        }
        let mean_high = (mean - weight_low * mean_low) / weight_high;
        let diff = mean_low - mean_high;
        let sigma = weight_low * weight_high * diff * diff;
        if sigma > best_sigma {
            best_sigma = sigma;
            best_level = level as u8;
        }
    }

    if best_sigma == 0.0 {
        // no split exists: one populated bin
        if let Some(level) = hist.iter().position(|&c| c > 0) {
            best_level = level as u8;
        }
    }
    debug!(level = best_level, sigma = best_sigma, "Otsu threshold");
    best_level
}

/// Number of distinct intensity levels present.
pub fn populated_levels(plane: &Array2<u8>) -> usize {
    histogram(plane).iter().filter(|&&c| c > 0).count()
}

/// Inverted binarization: pixels at or below `level` become foreground.
///
/// Photocards are assumed darker than the template background. Light cards on
/// a dark mat come out as background and are not found.
pub fn binarize_inv(plane: &Array2<u8>, level: u8) -> Array2<u8> {
    plane.mapv(|v| if v <= level { FOREGROUND } else { BACKGROUND })
}

/// Otsu level plus inverted binarization. Planes without contrast yield an
/// all-background mask.
pub fn otsu_binarize_inv(plane: &Array2<u8>) -> (u8, Array2<u8>) {
    let level = otsu_level(plane);
    if populated_levels(plane) < 2 {
        return (level, Array2::from_elem(plane.dim(), BACKGROUND));
    }
    (level, binarize_inv(plane, level))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_plane(dark: u8, light: u8) -> Array2<u8> {
        Array2::from_shape_fn((10, 10), |(r, _)| if r < 4 { dark } else { light })
    }

    #[test]
    fn otsu_splits_bimodal_plane() {
        let plane = two_level_plane(30, 220);
        let level = otsu_level(&plane);
        assert!((30..220).contains(&level), "level={level}");
        let mask = binarize_inv(&plane, level);
        assert_eq!(mask[[0, 0]], FOREGROUND);
        assert_eq!(mask[[9, 9]], BACKGROUND);
    }

    #[test]
    fn otsu_first_maximum_is_the_low_class_edge() {
        // Between-class variance is flat between two spikes; lowest level wins.
        let plane = two_level_plane(50, 200);
        assert_eq!(otsu_level(&plane), 50);
    }

    #[test]
    fn uniform_plane_has_no_foreground() {
        for value in [0u8, 128, 255] {
            let plane = Array2::from_elem((8, 8), value);
            let (_, mask) = otsu_binarize_inv(&plane);
            assert!(mask.iter().all(|&v| v == BACKGROUND), "value={value}");
        }
    }

    #[test]
    fn otsu_is_deterministic() {
        let plane = Array2::from_shape_fn((32, 32), |(r, c)| ((r * 7 + c * 13) % 256) as u8);
        assert_eq!(otsu_level(&plane), otsu_level(&plane));
    }
}
