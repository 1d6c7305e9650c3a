use crate::config::DenoiseParams;
use image::{GrayImage, Luma};

/// Apply an edge-preserving bilateral filter
/// Smooths flat regions while keeping strong intensity steps sharp, so the
/// plate border survives for the edge detector
pub fn apply(image: &GrayImage, params: DenoiseParams) -> GrayImage {
    let radius = (params.diameter / 2) as i32;
    if radius == 0 {
        return image.clone();
    }

    let spatial = spatial_weights(radius, params.sigma_space);
    let range = range_weights(params.sigma_color);
    let (width, height) = image.dimensions();
    let (w, h) = (width as i32, height as i32);
    let side = (2 * radius + 1) as usize;

    GrayImage::from_fn(width, height, |x, y| {
        let center = image.get_pixel(x, y).0[0];
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;

        for ky in -radius..=radius {
            let ny = y as i32 + ky;
            if ny < 0 || ny >= h {
                continue;
            }
            for kx in -radius..=radius {
                let nx = x as i32 + kx;
                if nx < 0 || nx >= w {
                    continue;
                }
                let spatial_weight = spatial[(ky + radius) as usize * side + (kx + radius) as usize];
                if spatial_weight == 0.0 {
                    continue;
                }

                let value = image.get_pixel(nx as u32, ny as u32).0[0];
                let weight = spatial_weight * range[center.abs_diff(value) as usize];
                sum += value as f32 * weight;
                weight_sum += weight;
            }
        }

        if weight_sum > 0.0 {
            Luma([(sum / weight_sum).round().clamp(0.0, 255.0) as u8])
        } else {
            Luma([center])
        }
    })
}

/// Gaussian weights over the circular window, row-major
fn spatial_weights(radius: i32, sigma_space: f32) -> Vec<f32> {
    let denom = 2.0 * sigma_space * sigma_space;
    let mut weights = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for ky in -radius..=radius {
        for kx in -radius..=radius {
            let dist_sq = (kx * kx + ky * ky) as f32;
            if dist_sq > (radius * radius) as f32 {
                weights.push(0.0);
            } else {
                weights.push((-dist_sq / denom).exp());
            }
        }
    }
    weights
}

/// Gaussian weight for every possible intensity difference
fn range_weights(sigma_color: f32) -> [f32; 256] {
    let denom = 2.0 * sigma_color * sigma_color;
    let mut weights = [0.0f32; 256];
    for (diff, weight) in weights.iter_mut().enumerate() {
        let d = diff as f32;
        *weight = (-d * d / denom).exp();
    }
    weights
}
