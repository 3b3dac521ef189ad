//! Procedural orb shader
//!
//! Every pixel is shaded independently from its integer coordinates and the
//! raster size. The final color is built by folding a fixed list of layers
//! over an accumulated RGB value:
//!
//! background → aurora ribbons → orb body → glow halo → specular highlights → access ring
//!
//! The squircle mask is evaluated first; pixels outside it never reach the
//! layers. All tuning constants are empirical and must stay as they are, the
//! output is compared byte for byte across runs.

use crate::pixel::Pixel;
use std::f64::consts::PI;

/// Superellipse exponent of the outer mask
const MASK_EXPONENT: f64 = 4.8;

/// Half-extent of the mask, as a fraction of the raster size
const MASK_EXTENT: f64 = 0.44;

/// Orb radius, as a fraction of the raster size
const ORB_RADIUS: f64 = 0.34;

/// Ribbon tints, innermost band first
const AURORA_TINTS: [Rgb; 5] = [
    [0.0, 200.0, 240.0],
    [30.0, 160.0, 200.0],
    [100.0, 60.0, 200.0],
    [180.0, 40.0, 160.0],
    [220.0, 20.0, 90.0],
];

/// Number of arcs the access ring is cut into
const RING_SEGMENTS: f64 = 6.0;

type Rgb = [f64; 3];

/// A color layer: takes the color accumulated so far and returns the new one.
type Layer = fn(Rgb, &Sample) -> Rgb;

/// Layers applied on top of the background, in order
const LAYERS: [Layer; 5] = [aurora, orb_body, glow_halo, specular, access_ring];

/// Geometry of one pixel relative to the orb
#[derive(Debug, Clone, Copy)]
struct Sample {
    size: f64,
    /// Offset from the center
    dx: f64,
    dy: f64,
    y: f64,
    radius: f64,
    dist: f64,
    /// `dist` as a fraction of the orb radius
    norm: f64,
    angle: f64,
}

/// Render a `size` x `size` orb, row-major, top to bottom.
pub fn render(size: u32) -> Vec<Pixel> {
    let capacity = size as usize * size as usize;
    let mut pixels = Vec::with_capacity(capacity);
    for y in 0..size {
        for x in 0..size {
            pixels.push(shade(x, y, size));
        }
    }
    pixels
}

/// Shade the pixel at `(x, y)` of a `size` x `size` raster.
pub fn shade(x: u32, y: u32, size: u32) -> Pixel {
    let size = f64::from(size);
    let (x, y) = (f64::from(x), f64::from(y));
    let (cx, cy) = (size / 2.0, size / 2.0);

    let sq = mask_metric(x, y, cx, cy, size);
    if sq > 1.0 {
        return Pixel::TRANSPARENT;
    }
    let edge_aa = smoothstep(1.0, 0.96, sq);

    let (dx, dy) = (x - cx, y - cy);
    let dist = (dx * dx + dy * dy).sqrt();
    let radius = size * ORB_RADIUS;
    let sample = Sample {
        size,
        dx,
        dy,
        y,
        radius,
        dist,
        norm: dist / radius,
        angle: dy.atan2(dx),
    };

    let [r, g, b] = LAYERS
        .iter()
        .fold(background(&sample), |color, layer| layer(color, &sample));

    Pixel::new(
        clamp_channel(r),
        clamp_channel(g),
        clamp_channel(b),
        clamp_channel(255.0 * edge_aa),
    )
}

/// Superellipse metric `|nx|^n + |ny|^n`; the pixel is inside the icon when it is <= 1
fn mask_metric(x: f64, y: f64, cx: f64, cy: f64, size: f64) -> f64 {
    let nx = (x - cx) / (size * MASK_EXTENT);
    let ny = (y - cy) / (size * MASK_EXTENT);
    nx.abs().powf(MASK_EXPONENT) + ny.abs().powf(MASK_EXPONENT)
}

fn background(s: &Sample) -> Rgb {
    let bg_grad = s.y / s.size;
    let cg = (1.0 - s.norm * 0.6).max(0.0).powi(2);
    [
        lerp(16.0, 8.0, bg_grad) + cg * 6.0,
        lerp(16.0, 10.0, bg_grad) + cg * 12.0,
        lerp(22.0, 14.0, bg_grad) + cg * 18.0,
    ]
}

fn aurora(mut color: Rgb, s: &Sample) -> Rgb {
    for (i, tint) in AURORA_TINTS.iter().enumerate() {
        let i = i as f64;
        let wave = (s.angle * (2.2 + i * 0.6) + i * 1.257 + 0.5).sin() * 0.5 + 0.5;
        let band = 1.0 - (s.norm - (0.55 + i * 0.15)).abs() / (0.18 + i * 0.04);
        let inten = band.max(0.0) * wave * 0.3;
        if inten > 0.0 {
            for (c, t) in color.iter_mut().zip(tint) {
                *c += t * inten;
            }
        }
    }
    color
}

fn orb_body(color: Rgb, s: &Sample) -> Rgb {
    if s.norm >= 1.0 {
        return color;
    }
    let t = s.norm;
    let fo = smoothstep(1.0, 0.0, t);
    let inn = (1.0 - s.norm * 3.0).max(0.0).powi(2);
    let orb = [
        lerp(20.0, 110.0, t) * fo + inn * 60.0,
        lerp(230.0, 70.0, t) * fo + inn * 80.0,
        lerp(255.0, 210.0, t) * fo + inn * 40.0,
    ];
    blend(color, orb, fo * 0.88)
}

fn glow_halo(color: Rgb, s: &Sample) -> Rgb {
    if !(1.0..1.35).contains(&s.norm) {
        return color;
    }
    let fade = 1.0 - (s.norm - 1.0) / 0.35;
    let glow = [0.0, 160.0 * fade * fade, 210.0 * fade * fade];
    blend(color, glow, fade * fade * 0.25)
}

fn specular(color: Rgb, s: &Sample) -> Rgb {
    let r = s.radius;

    let hd = ((s.dx + r * 0.3).powi(2) + (s.dy + r * 0.35).powi(2)).sqrt() / (r * 0.45);
    let sp = (1.0 - hd).max(0.0).powf(3.5);

    let hd2 = ((s.dx - r * 0.22).powi(2) + (s.dy - r * 0.28).powi(2)).sqrt() / (r * 0.6);
    let sp2 = (1.0 - hd2).max(0.0).powf(4.0);

    [
        color[0] + sp * 180.0 + sp2 * 100.0,
        color[1] + sp * 230.0 + sp2 * 30.0,
        color[2] + sp * 255.0 + sp2 * 140.0,
    ]
}

fn access_ring(color: Rgb, s: &Sample) -> Rgb {
    let (ri, ro) = (s.radius * 1.05, s.radius * 1.16);
    if !(ri < s.dist && s.dist < ro) {
        return color;
    }
    let rt = (s.dist - ri) / (ro - ri);
    let seg = ((s.angle + PI) / (2.0 * PI)) * RING_SEGMENTS;
    let sf = seg.rem_euclid(1.0);
    let ra = (rt * PI).sin() * 0.55 * (smoothstep(0.0, 0.06, sf) * smoothstep(1.0, 0.94, sf));
    blend(color, [0.0, 220.0, 255.0], ra)
}

fn blend(base: Rgb, over: Rgb, alpha: f64) -> Rgb {
    [
        lerp(base[0], over[0], alpha),
        lerp(base[1], over[1], alpha),
        lerp(base[2], over[2], alpha),
    ]
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic Hermite ease between `e0` and `e1`. Edges may be given in
/// descending order to get a falling edge.
fn smoothstep(e0: f64, e1: f64, x: f64) -> f64 {
    let t = if e1 != e0 {
        ((x - e0) / (e1 - e0)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    t * t * (3.0 - 2.0 * t)
}

/// Truncate toward zero, then clamp into a channel value
fn clamp_channel(v: f64) -> u8 {
    (v as i64).clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_length() {
        for size in [1, 2, 3, 16, 17, 64] {
            assert_eq!(render(size).len(), (size * size) as usize, "size {size}");
        }
        assert!(render(0).is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(render(32), render(32));
    }

    #[test]
    fn test_corners_are_transparent() {
        for size in [16, 64, 128] {
            let pixels = render(size);
            let last = size as usize - 1;
            for idx in [0, last, last * size as usize, pixels.len() - 1] {
                assert_eq!(pixels[idx], Pixel::TRANSPARENT, "size {size} idx {idx}");
            }
        }
    }

    #[test]
    fn test_outside_mask_is_transparent_black() {
        let size: u32 = 64;
        let s = f64::from(size);
        let pixels = render(size);
        for y in 0..size {
            for x in 0..size {
                let sq = mask_metric(f64::from(x), f64::from(y), s / 2.0, s / 2.0, s);
                let p = pixels[(y * size + x) as usize];
                if sq > 1.0 {
                    assert_eq!(p, Pixel::TRANSPARENT, "({x}, {y})");
                } else if sq < 0.96 {
                    assert_eq!(p.a, 255, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_single_pixel_falls_outside_mask() {
        // (0, 0) sits half a pixel from the center of a 1x1 raster, which is
        // about 1.14 mask half-extents away on both axes.
        assert_eq!(render(1), vec![Pixel::TRANSPARENT]);
    }

    #[test]
    fn test_center_pixel() {
        // The center is independent of the raster size once it lands on an
        // integer coordinate: bright cyan core, fully opaque.
        for size in [2, 16, 256] {
            assert_eq!(shade(size / 2, size / 2, size), Pixel::new(75, 255, 255, 255));
        }
    }

    #[test]
    fn test_reference_pixels() {
        // Samples covering every layer of a 64px render
        let expected = [
            ((20, 14), [114, 38, 108, 255]), // upper-left highlight
            ((44, 40), [20, 49, 71, 255]),
            ((10, 32), [48, 54, 92, 255]),
            ((32, 9), [13, 54, 70, 255]),
            ((55, 32), [21, 34, 52, 255]),
            ((32, 56), [18, 131, 159, 255]), // ring arc
            ((4, 32), [49, 16, 34, 191]),    // mask edge
            ((3, 20), [0, 0, 0, 0]),
            ((50, 50), [67, 22, 53, 255]),
            ((12, 12), [48, 18, 35, 255]),
            ((31, 54), [37, 51, 84, 255]),
            ((8, 31), [12, 102, 123, 255]),
        ];
        let pixels = render(64);
        for ((x, y), rgba) in expected {
            assert_eq!(pixels[y * 64 + x], Pixel::from(rgba), "({x}, {y})");
        }
    }

    #[test]
    fn test_reference_field_checksums() {
        // CRC-32 of the packed RGBA bytes of whole renders, odd and even sizes
        for (size, expected) in [(17, 0xe4e5_dd4d), (64, 0x807f_ba91), (256, 0x44c8_89df)] {
            let mut crc = flate2::Crc::new();
            crc.update(&crate::pixel::as_rgba_bytes(&render(size)));
            assert_eq!(crc.sum(), expected, "size {size}");
        }
    }

    #[test]
    fn test_mask_edge_fades_alpha() {
        let size: u32 = 1024;
        let row = size / 2;
        let pixels = render(size);
        let alphas: Vec<u8> = (0..size / 2)
            .map(|x| pixels[(row * size + x) as usize].a)
            .collect();
        // Alpha never decreases walking from the left edge toward the center
        assert!(alphas.windows(2).all(|w| w[0] <= w[1]));
        assert!(alphas.iter().any(|&a| a > 0 && a < 255));
        assert_eq!(*alphas.last().unwrap(), 255);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(1.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(1.0, 0.96, 0.0), 1.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.7), 0.0);
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-3.7), 0);
        assert_eq!(clamp_channel(-0.5), 0);
        assert_eq!(clamp_channel(75.9), 75);
        assert_eq!(clamp_channel(310.0), 255);
    }

    #[test]
    fn test_ring_draws_segmented_arcs() {
        let size = 512u32;
        let s = f64::from(size);
        let radius = s * ORB_RADIUS;
        let c = s / 2.0;
        let mid = radius * 1.105;

        // Middle of an arc versus the notch between two arcs, same radius
        let at = |angle: f64| {
            let x = (c + mid * angle.cos()).round() as u32;
            let y = (c + mid * angle.sin()).round() as u32;
            shade(x, y, size)
        };
        let arc = at(-PI + PI / 6.0);
        let notch = at(-PI + PI / 3.0);
        assert!(arc.g > notch.g, "arc {arc:?} notch {notch:?}");
    }
}
