use ndarray::Array2;

/// Integer taps of the 5x5 Gaussian, `[1, 4, 6, 4, 1] / 16` per axis.
///
/// This is the kernel a 5-tap Gaussian resolves to when sigma is derived from
/// the kernel size (`0.3 * ((5 - 1) * 0.5 - 1) + 0.8 = 1.1`).
pub const GAUSSIAN_5TAP: [u32; 5] = [1, 4, 6, 4, 1];
const RADIUS: isize = 2;

/// Mirror an out-of-range index back into `0..len` without repeating the edge
/// sample (`dcb|abcd|cba`).
#[inline]
fn reflect101(mut i: isize, len: usize) -> usize {
    let n = len as isize;
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

/// Smooth a luma plane with a separable 5x5 Gaussian.
///
/// Integer arithmetic end to end; the vertical pass rounds the 1/256 scaled
/// sum to nearest.
pub fn gaussian_5x5(src: &Array2<u8>) -> Array2<u8> {
    let (rows, cols) = src.dim();
    if rows == 0 || cols == 0 {
        return src.clone();
    }

    // Horizontal pass, kept at 16x scale
    let mut horizontal = Array2::<u32>::zeros((rows, cols));
    for r in 0..rows {
        for c in 0..cols {
            let mut acc = 0u32;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                let cc = reflect101(c as isize + k as isize - RADIUS, cols);
                acc += tap * src[[r, cc]] as u32;
            }
            horizontal[[r, c]] = acc;
        }
    }

    // Vertical pass, back to 1x with rounding
    let mut out = Array2::<u8>::zeros((rows, cols));
    for r in 0..rows {
        for c in 0..cols {
            let mut acc = 0u32;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                let rr = reflect101(r as isize + k as isize - RADIUS, rows);
                acc += tap * horizontal[[rr, c]];
            }
            out[[r, c]] = ((acc + 128) >> 8) as u8;
        }
    }
    out
}
