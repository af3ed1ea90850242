//! Dequantization and inverse wavelet transform.

use crate::biometric_pipeline::wsq::tables::{QuantizationTable, TransformTable};
use crate::biometric_pipeline::wsq::tree::{CODED_SUBBANDS, SubbandTree, WaveletTree};
use crate::biometric_pipeline::wsq::{zeroed, WsqError};

/// Places the sequentially coded coefficients into their subbands and maps
/// each quantized index back to a bin value.
pub fn unquantize(
    coefficients: &[i32],
    table: &QuantizationTable,
    bands: &SubbandTree,
    width: usize,
    height: usize,
) -> Result<Vec<f32>, WsqError> {
    let mut pixels = zeroed::<f32>(width * height)?;
    let center = table.bin_center;
    let mut next = coefficients.iter();

    for (index, band) in bands.iter().take(CODED_SUBBANDS).enumerate() {
        let q = table.q_bin[index];
        if q == 0.0 {
            continue;
        }
        let half_zero = table.z_bin[index] / 2.0;

        for row in band.y..band.y + band.leny {
            for col in band.x..band.x + band.lenx {
                let &value = next.next().ok_or(WsqError::CoefficientOverflow {
                    expected: coefficients.len(),
                })?;
                pixels[row * width + col] = match value {
                    0 => 0.0,
                    v if v > 0 => q * (v as f32 - center) + half_zero,
                    v => q * (v as f32 + center) - half_zero,
                };
            }
        }
    }

    Ok(pixels)
}

/// Whole-sample symmetric reflection of `position` into `0..len`.
fn reflect(position: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let period = 2 * last;
    let folded = position.rem_euclid(period);
    (if folded > last { period - folded } else { folded }) as usize
}

/// Rebuilds `out` from its lowpass (even positions) and highpass (odd
/// positions) coefficients with symmetric extension at both ends.
pub fn synthesize_line(lowpass: &[f32], highpass: &[f32], filters: &TransformTable, out: &mut [f32]) {
    let len = out.len();
    let lo_centre = (filters.lowpass.len() / 2) as isize;
    let hi_centre = (filters.highpass.len() / 2) as isize;

    for (n, sample) in out.iter_mut().enumerate() {
        let n = n as isize;
        let mut acc = 0.0f32;

        for (i, &tap) in filters.lowpass.iter().enumerate() {
            let t = n - (i as isize - lo_centre);
            if t.rem_euclid(2) == 0 {
                acc += tap * lowpass[reflect(t, len) / 2];
            }
        }
        if !highpass.is_empty() {
            for (i, &tap) in filters.highpass.iter().enumerate() {
                let t = n - (i as isize - hi_centre);
                if t.rem_euclid(2) == 1 {
                    acc += tap * highpass[(reflect(t, len) - 1) / 2];
                }
            }
        }

        *sample = acc;
    }
}

/// Synthesizes one line whose low and high halves are stored side by side
/// (highpass first when `inverted`).
fn join_line(line: &[f32], inverted: bool, filters: &TransformTable, out: &mut [f32]) {
    let low_len = line.len().div_ceil(2);
    let high_len = line.len() / 2;
    let (lowpass, highpass) = if inverted {
        let (high, low) = line.split_at(high_len);
        (low, high)
    } else {
        line.split_at(low_len)
    };
    synthesize_line(lowpass, highpass, filters, out);
}

/// Runs the inverse transform from the innermost node outwards: columns
/// first, then rows, for each region.
pub fn reconstruct(pixels: &mut [f32], width: usize, nodes: &WaveletTree, filters: &TransformTable) {
    let mut line = Vec::new();
    let mut out = Vec::new();

    for node in nodes.iter().rev() {
        if node.lenx == 0 || node.leny == 0 {
            continue;
        }

        line.resize(node.leny, 0.0);
        out.resize(node.leny, 0.0);
        for col in node.x..node.x + node.lenx {
            for (i, row) in (node.y..node.y + node.leny).enumerate() {
                line[i] = pixels[row * width + col];
            }
            join_line(&line, node.inv_cl, filters, &mut out);
            for (i, row) in (node.y..node.y + node.leny).enumerate() {
                pixels[row * width + col] = out[i];
            }
        }

        line.resize(node.lenx, 0.0);
        out.resize(node.lenx, 0.0);
        for row in node.y..node.y + node.leny {
            let start = row * width + node.x;
            let span = &mut pixels[start..start + node.lenx];
            line.copy_from_slice(span);
            join_line(&line, node.inv_rw, filters, &mut out);
            span.copy_from_slice(&out);
        }
    }
}

/// Rescales reconstructed samples to 8-bit grey levels.
pub fn to_gray(pixels: &[f32], m_shift: f32, r_scale: f32) -> Result<Vec<u8>, WsqError> {
    let mut gray = Vec::new();
    gray.try_reserve_exact(pixels.len())
        .map_err(|_| WsqError::OutOfMemory {
            elements: pixels.len(),
        })?;
    gray.extend(pixels.iter().map(|&sample| {
        let value = sample * r_scale + m_shift + 0.5;
        if value < 0.0 {
            0
        } else if value > 255.0 {
            255
        } else {
            value as u8
        }
    }));
    Ok(gray)
}
