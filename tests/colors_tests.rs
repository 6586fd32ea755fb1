//! Integration tests for colors module

use palette::Srgb;
use wled_segments::{Rgbw, colors};

#[test]
fn hsv_creates_primary_colors() {
    // Red (hue = 0)
    assert_eq!(colors::hsv(0.0, 1.0, 1.0), Rgbw::rgb(255, 0, 0));

    // Green (hue = 120)
    assert_eq!(colors::hsv(120.0, 1.0, 1.0), Rgbw::rgb(0, 255, 0));

    // Blue (hue = 240)
    assert_eq!(colors::hsv(240.0, 1.0, 1.0), Rgbw::rgb(0, 0, 255));
}

#[test]
fn hsv_handles_saturation_and_value() {
    // Zero saturation (gray)
    let gray = colors::hsv(0.0, 0.0, 0.5);
    assert_eq!(gray.r, gray.g);
    assert_eq!(gray.g, gray.b);
    assert!(gray.r >= 127 && gray.r <= 128);

    // Zero value (black)
    assert_eq!(colors::hsv(0.0, 1.0, 0.0), colors::BLACK);
}

#[test]
fn hue_wraps_around_360() {
    assert_eq!(colors::hue(0.0), colors::hue(360.0));
    assert_eq!(colors::hue(60.0), Rgbw::rgb(255, 255, 0));
}

#[test]
fn hsv_leaves_white_channel_off() {
    for hue in [0.0, 90.0, 180.0, 270.0] {
        assert_eq!(colors::hue(hue).w, 0);
    }
}

#[test]
fn srgb_conversions() {
    assert_eq!(Rgbw::from(Srgb::new(10u8, 20, 30)), Rgbw::rgb(10, 20, 30));
    assert_eq!(Rgbw::from_srgb(Srgb::new(1.0, 0.0, 1.0)), Rgbw::rgb(255, 0, 255));
}

#[test]
fn serializes_as_channel_array() {
    let color = Rgbw::new(1, 2, 3, 4);
    assert_eq!(serde_json::to_string(&color).unwrap(), "[1,2,3,4]");
    assert_eq!(serde_json::from_str::<Rgbw>("[1,2,3,4]").unwrap(), color);
    assert_eq!(serde_json::Value::from(color), serde_json::json!([1, 2, 3, 4]));
}
