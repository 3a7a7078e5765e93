//! Unit tests for built-in conversions and the converter registry.

use std::path::PathBuf;

use rstest::rstest;

use super::{ConvertError, ConverterRegistry, Setting, SettingKind};

#[derive(Debug, Default, PartialEq)]
struct Opaque(u32);

impl Setting for Opaque {
    const KIND: SettingKind = SettingKind::Custom("opaque");

    fn render_setting(&self) -> String {
        format!("opaque:{}", self.0)
    }
}

#[derive(Debug, Default, PartialEq)]
struct Impostor(String);

impl Setting for Impostor {
    const KIND: SettingKind = SettingKind::Custom("opaque");

    fn render_setting(&self) -> String {
        self.0.clone()
    }
}

#[rstest]
#[case(" 42 ", 42)]
#[case("+7", 7)]
#[case("-13", -13)]
fn integers_ignore_surrounding_whitespace(#[case] raw: &str, #[case] expected: i32) {
    assert_eq!(i32::parse_setting(raw).ok(), Some(expected));
}

#[rstest]
#[case("1,5")]
#[case("12abc")]
#[case("")]
fn integers_reject_non_decimal_text(#[case] raw: &str) {
    let err = i32::parse_setting(raw).expect_err("value should be rejected");
    assert!(matches!(
        err,
        ConvertError::Invalid {
            kind: SettingKind::I32,
            ..
        }
    ));
}

#[test]
fn integers_reject_values_out_of_range() {
    assert!(u8::parse_setting("256").is_err());
}

#[rstest]
#[case("3.5", 3.5)]
#[case(" 1e3", 1000.0)]
#[case("-0.25", -0.25)]
fn floats_use_invariant_decimal_point(#[case] raw: &str, #[case] expected: f64) {
    let parsed = f64::parse_setting(raw).expect("float should parse");
    assert!((parsed - expected).abs() < f64::EPSILON);
}

#[test]
fn floats_reject_comma_decimal_separator() {
    assert!(f64::parse_setting("3,5").is_err());
}

#[rstest]
#[case("true", true)]
#[case("True", true)]
#[case(" FALSE ", false)]
fn booleans_are_case_insensitive(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(bool::parse_setting(raw).ok(), Some(expected));
}

#[rstest]
#[case("yes")]
#[case("1")]
fn booleans_reject_other_words(#[case] raw: &str) {
    assert!(bool::parse_setting(raw).is_err());
}

#[test]
fn char_requires_exactly_one_character() {
    assert_eq!(char::parse_setting("x").ok(), Some('x'));
    assert!(char::parse_setting("xy").is_err());
}

#[test]
fn text_and_paths_are_verbatim() {
    assert_eq!(
        String::parse_setting("  padded ").ok().as_deref(),
        Some("  padded ")
    );
    assert_eq!(
        PathBuf::parse_setting("logs/app.log").ok(),
        Some(PathBuf::from("logs/app.log"))
    );
}

#[rstest]
#[case(-1_i64)]
#[case(i64::MAX)]
fn rendered_integers_parse_back(#[case] value: i64) {
    assert_eq!(i64::parse_setting(&value.render_setting()).ok(), Some(value));
}

#[test]
fn rendered_floats_parse_back() {
    let value = 0.1_f64 + 0.2;
    let parsed = f64::parse_setting(&value.render_setting()).expect("float should parse");
    assert_eq!(parsed.to_bits(), value.to_bits());
}

#[test]
fn custom_kind_without_converter_is_unsupported() {
    let registry = ConverterRegistry::default();
    let err = registry
        .convert::<Opaque>("anything")
        .expect_err("no conversion exists");
    assert!(matches!(
        err,
        ConvertError::Unsupported {
            kind: SettingKind::Custom("opaque")
        }
    ));
}

#[test]
fn registered_converter_handles_custom_kind() {
    let mut registry = ConverterRegistry::default();
    registry.register::<Opaque, _, _>(|raw: &str| -> Result<Opaque, String> {
        raw.strip_prefix("opaque:")
            .ok_or("missing prefix")?
            .parse::<u32>()
            .map(Opaque)
            .map_err(|e| e.to_string())
    });

    assert_eq!(registry.convert::<Opaque>("opaque:9").ok(), Some(Opaque(9)));
    let err = registry
        .convert::<Opaque>("9")
        .expect_err("prefix is required");
    assert!(matches!(err, ConvertError::Custom(_)));
    assert_eq!(err.to_string(), "missing prefix");
}

#[test]
fn registered_converter_replaces_builtin_conversion() {
    let mut registry = ConverterRegistry::default();
    registry.register::<i32, _, _>(|_raw: &str| Ok::<_, ConvertError>(-99));

    assert_eq!(registry.convert::<i32>("5").ok(), Some(-99));
    assert_eq!(registry.convert::<i64>("5").ok(), Some(5));
}

#[test]
fn last_registration_wins() {
    let mut registry = ConverterRegistry::default();
    registry.register::<u8, _, _>(|_raw: &str| Ok::<_, ConvertError>(1));
    registry.register::<u8, _, _>(|_raw: &str| Ok::<_, ConvertError>(2));

    assert_eq!(registry.convert::<u8>("0").ok(), Some(2));
    assert!(registry.contains(SettingKind::U8));
}

#[test]
fn lookup_returns_only_matching_types() {
    let mut registry = ConverterRegistry::default();
    assert!(registry.lookup::<Opaque>().is_none());

    registry.register::<Opaque, _, _>(|_raw: &str| Ok::<_, ConvertError>(Opaque(1)));

    let converter = registry.lookup::<Opaque>().expect("converter registered");
    assert_eq!(converter("ignored").ok(), Some(Opaque(1)));
    assert!(registry.lookup::<Impostor>().is_none());
}

#[test]
fn shared_custom_kind_reports_mismatch() {
    let mut registry = ConverterRegistry::default();
    registry.register::<Opaque, _, _>(|_raw: &str| Ok::<_, ConvertError>(Opaque(1)));

    let err = registry
        .convert::<Impostor>("x")
        .expect_err("converter produces Opaque");
    assert!(matches!(err, ConvertError::MismatchedConverter { .. }));
}
