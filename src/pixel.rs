//! RGBA pixel value shared by the orb shader and the PNG encoder.

/// A single 8-bit RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black, used for everything outside the icon mask
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in R, G, B, A order, as they appear on a PNG scanline
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Flatten a pixel field into packed RGBA bytes
pub fn as_rgba_bytes(pixels: &[Pixel]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order() {
        let p = Pixel::new(1, 2, 3, 4);
        assert_eq!(p.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(Pixel::from([1, 2, 3, 4]), p);
    }

    #[test]
    fn test_flatten() {
        let field = [Pixel::new(9, 8, 7, 6), Pixel::TRANSPARENT];
        assert_eq!(as_rgba_bytes(&field), vec![9, 8, 7, 6, 0, 0, 0, 0]);
    }
}
