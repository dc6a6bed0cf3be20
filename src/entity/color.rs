use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Light gray, used whenever a stored color cannot be parsed.
pub const FALLBACK_COLOR: Color = Color::rgb(0xCC, 0xCC, 0xCC);

/// An ARGB color parsed from `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 0xFF,
            red,
            green,
            blue,
        }
    }

    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidColor(s.to_string());

        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let [a, r, g, b] = value.to_be_bytes();

        match digits.len() {
            6 => Ok(Color::rgb(r, g, b)),
            8 => Ok(Color::argb(a, r, g, b)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.alpha, self.red, self.green, self.blue
            )
        }
    }
}

/// True if `hex` would be accepted as a note color on submit.
pub fn is_valid_hex(hex: &str) -> bool {
    hex.parse::<Color>().is_ok()
}
