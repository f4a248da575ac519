//! HSL colors used when rendering entities.

/// Saturation used for entity discs
pub const ENTITY_SATURATION: f32 = 0.55;
/// Lightness used for entity discs
pub const ENTITY_LIGHTNESS: f32 = 0.70;

/// A color in the HSL model. `hue` is in degrees `[0, 360)`,
/// saturation and lightness are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 1.0),
            lightness: lightness.clamp(0.0, 1.0),
        }
    }

    /// The color an entity with `phase` is drawn with when the scene is
    /// `age` frames old.
    pub fn for_entity(age: u64, phase: f32) -> Self {
        // Reduce the integer age first so large ages keep f32 precision.
        let hue = (age % 360) as f32 + phase;
        Self::new(hue, ENTITY_SATURATION, ENTITY_LIGHTNESS)
    }

    /// Convert to 8-bit RGB
    pub fn to_rgb(self) -> [u8; 3] {
        let c = (1.0 - (2.0 * self.lightness - 1.0).abs()) * self.saturation;
        let h = self.hue / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = self.lightness - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_hue_wraps() {
        assert_eq!(Hsl::for_entity(0, 10.0).hue, 10.0);
        assert_eq!(Hsl::for_entity(350, 20.0).hue, 10.0);
        assert_eq!(Hsl::for_entity(720, 0.0).hue, 0.0);
        assert_eq!(Hsl::for_entity(u64::MAX, 0.0).hue, (u64::MAX % 360) as f32);
    }

    #[test]
    fn test_entity_color_fixed_saturation_lightness() {
        let color = Hsl::for_entity(42, 3.0);
        assert_eq!(color.saturation, 0.55);
        assert_eq!(color.lightness, 0.70);
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(Hsl::new(0.0, 0.55, 0.70).to_rgb(), [221, 136, 136]);
        assert_eq!(Hsl::new(120.0, 1.0, 0.5).to_rgb(), [0, 255, 0]);
        assert_eq!(Hsl::new(240.0, 0.0, 1.0).to_rgb(), [255, 255, 255]);
    }
}
