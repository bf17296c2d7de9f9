use std::fmt;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const INK: Rgb = Rgb(45, 42, 50);

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let normalized = hex.trim().trim_start_matches('#');
        if normalized.len() != 6 || !normalized.is_ascii() {
            return None;
        }
        let channel = |range| u8::from_str_radix(&normalized[range], 16).ok();
        Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Linear blend towards `other`, `t` in 0..=1
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba(self.0, self.1, self.2, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(255)
    }
}

/// Two-stop linear gradient, angle in CSS degrees (0 = bottom to top, 90 = left to right)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub angle_deg: f32,
    pub from: Rgb,
    pub to: Rgb,
}

impl Gradient {
    pub const fn diagonal(from: Rgb, to: Rgb) -> Self {
        Self {
            angle_deg: 135.0,
            from,
            to,
        }
    }

    /// Color at normalized position `(u, v)` inside the filled box
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        let rad = self.angle_deg.to_radians();
        let (dx, dy) = (rad.sin(), -rad.cos());
        // Project onto the gradient line, centered on the box
        let half = (dx.abs() + dy.abs()) / 2.0;
        let t = ((u - 0.5) * dx + (v - 0.5) * dy + half) / (2.0 * half).max(f32::EPSILON);
        self.from.mix(self.to, t)
    }

    /// CSS form, e.g. `linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)`
    pub fn css(&self) -> String {
        format!(
            "linear-gradient({}deg, {} 0%, {} 100%)",
            self.angle_deg, self.from, self.to
        )
    }
}
