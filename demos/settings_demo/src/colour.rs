//! A colour setting with no built-in conversion.
//!
//! [`Rgb`] deliberately leaves [`Setting::parse_setting`] unimplemented; the
//! demo registers [`parse_colour`] as its converter, which accepts
//! `#RRGGBB` or a name from a small palette.

use std::fmt;

use app_settings::{ConvertError, Setting, SettingKind};

/// 24-bit colour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Setting for Rgb {
    const KIND: SettingKind = SettingKind::Custom("colour");

    fn render_setting(&self) -> String {
        self.to_string()
    }
}

const PALETTE: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("white", Rgb::new(0xFF, 0xFF, 0xFF)),
    ("red", Rgb::new(0xFF, 0x00, 0x00)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("blue", Rgb::new(0x00, 0x00, 0xFF)),
    ("orange", Rgb::new(0xFF, 0xA5, 0x00)),
    ("indigo", Rgb::new(0x4B, 0x00, 0x82)),
    ("gray", Rgb::new(0x80, 0x80, 0x80)),
];

/// Parses `#RRGGBB` or a palette name, ignoring case.
///
/// # Errors
///
/// Returns [`ConvertError::Invalid`] for malformed hex or unknown names.
///
/// # Examples
///
/// ```
/// use settings_demo::colour::{Rgb, parse_colour};
///
/// assert_eq!(parse_colour("#4b0082").ok(), Some(Rgb::new(0x4B, 0x00, 0x82)));
/// assert_eq!(parse_colour("Indigo").ok(), Some(Rgb::new(0x4B, 0x00, 0x82)));
/// ```
pub fn parse_colour(raw: &str) -> Result<Rgb, ConvertError> {
    let text = raw.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    PALETTE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(text))
        .map(|(_, colour)| *colour)
        .ok_or_else(|| ConvertError::invalid(Rgb::KIND, format!("unknown colour name '{text}'")))
}

fn parse_hex(hex: &str) -> Result<Rgb, ConvertError> {
    let invalid = || ConvertError::invalid(Rgb::KIND, "expected #RRGGBB");
    if hex.len() != 6 {
        return Err(invalid());
    }
    let channel = |start: usize| {
        hex.get(start..start + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(invalid)
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
