//! Built-in conversions for primitive, text and path settings.

use std::path::PathBuf;

use camino::Utf8PathBuf;

use super::{ConvertError, Setting, SettingKind};

macro_rules! numeric_setting {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Setting for $ty {
                const KIND: SettingKind = SettingKind::$kind;

                fn parse_setting(raw: &str) -> Result<Self, ConvertError> {
                    raw.trim()
                        .parse::<$ty>()
                        .map_err(|e| ConvertError::invalid(Self::KIND, e))
                }

                fn render_setting(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_setting! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl Setting for bool {
    const KIND: SettingKind = SettingKind::Bool;

    fn parse_setting(raw: &str) -> Result<Self, ConvertError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConvertError::invalid(
                Self::KIND,
                "expected 'true' or 'false'",
            ))
        }
    }

    fn render_setting(&self) -> String {
        self.to_string()
    }
}

impl Setting for char {
    const KIND: SettingKind = SettingKind::Char;

    fn parse_setting(raw: &str) -> Result<Self, ConvertError> {
        raw.parse::<char>()
            .map_err(|e| ConvertError::invalid(Self::KIND, e))
    }

    fn render_setting(&self) -> String {
        self.to_string()
    }
}

impl Setting for String {
    const KIND: SettingKind = SettingKind::Text;

    fn parse_setting(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.to_owned())
    }

    fn render_setting(&self) -> String {
        self.clone()
    }
}

impl Setting for PathBuf {
    const KIND: SettingKind = SettingKind::Path;

    fn parse_setting(raw: &str) -> Result<Self, ConvertError> {
        Ok(Self::from(raw))
    }

    fn render_setting(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl Setting for Utf8PathBuf {
    const KIND: SettingKind = SettingKind::Utf8Path;

    fn parse_setting(raw: &str) -> Result<Self, ConvertError> {
        Ok(Self::from(raw))
    }

    fn render_setting(&self) -> String {
        self.to_string()
    }
}
