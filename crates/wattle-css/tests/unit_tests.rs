//! Integration tests for unit classification and length resolution.

use strum::{EnumCount, IntoEnumIterator};
use wattle_css::units::{UnitCategory, UnitType};
use wattle_css::values::{LengthResolver, Size};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn test_every_unit_has_a_category() {
    assert!(UnitType::COUNT > 60);
    for unit in UnitType::iter() {
        let category = unit.category();
        match unit {
            UnitType::Unknown => assert_eq!(category, UnitCategory::Other),
            _ => assert_ne!(category, UnitCategory::Other, "{unit:?}"),
        }
    }
}

#[test]
fn test_categories() {
    assert_eq!(UnitType::Ems.category(), UnitCategory::Length);
    assert_eq!(UnitType::ContainerMax.category(), UnitCategory::Length);
    assert_eq!(UnitType::Turns.category(), UnitCategory::Angle);
    assert_eq!(UnitType::Milliseconds.category(), UnitCategory::Time);
    assert_eq!(UnitType::Kilohertz.category(), UnitCategory::Frequency);
    assert_eq!(UnitType::X.category(), UnitCategory::Resolution);
    assert_eq!(UnitType::Fraction.category(), UnitCategory::Flex);
    assert_eq!(UnitType::Percentage.category(), UnitCategory::Percent);
    assert_eq!(UnitType::Integer.category(), UnitCategory::Number);
}

#[test]
fn test_relative_and_absolute() {
    assert!(UnitType::Centimeters.is_absolute());
    assert!(UnitType::Degrees.is_absolute());
    assert!(!UnitType::Ems.is_absolute());
    assert!(UnitType::Rems.is_font_relative());
    assert!(UnitType::SmallViewportMin.is_static_viewport_unit());
    assert!(UnitType::DynamicViewportWidth.is_dynamic_viewport_unit());
    assert!(UnitType::ViewportWidth.is_viewport_percentage_length());
    assert!(UnitType::ContainerInlineSize.is_container_percentage_length());
    assert!(UnitType::Percentage.is_relative_unit());
    assert!(!UnitType::Percentage.is_length());
}

#[test]
fn test_canonical_units() {
    assert_eq!(UnitType::Inches.canonical_unit(), UnitType::Pixels);
    assert_eq!(UnitType::Turns.canonical_unit(), UnitType::Degrees);
    assert_eq!(UnitType::Milliseconds.canonical_unit(), UnitType::Seconds);
    assert_eq!(UnitType::DotsPerInch.canonical_unit(), UnitType::DotsPerPixel);
    assert_eq!(UnitType::Integer.canonical_unit(), UnitType::Number);
    assert!(close(UnitType::Inches.conversion_to_canonical(), 96.0));
    assert!(close(UnitType::Points.conversion_to_canonical(), 96.0 / 72.0));
    assert!(close(UnitType::Turns.conversion_to_canonical(), 360.0));
}

#[test]
fn test_display_is_the_unit_string() {
    assert_eq!(UnitType::Kilohertz.to_string(), "khz");
    assert_eq!(UnitType::Percentage.to_string(), "%");
    assert_eq!(UnitType::Number.to_string(), "");
}

#[test]
fn test_absolute_lengths_scale_with_zoom() {
    let resolver = LengthResolver::default().with_zoom(2.0);
    assert_eq!(resolver.length_to_px(1.0, UnitType::Inches), Some(192.0));
    assert_eq!(resolver.length_to_px(10.0, UnitType::Percentage), None);
}

#[test]
fn test_font_relative_lengths() {
    let resolver = LengthResolver::default().with_font_size(20.0);
    assert_eq!(resolver.length_to_px(2.0, UnitType::Ems), Some(40.0));
    assert_eq!(resolver.length_to_px(1.0, UnitType::Exs), Some(10.0));
    assert_eq!(resolver.length_to_px(1.0, UnitType::Chs), Some(10.0));
}

#[test]
fn test_viewport_lengths() {
    let resolver = LengthResolver::default().with_viewport(1000.0, 500.0);
    assert_eq!(resolver.length_to_px(10.0, UnitType::ViewportWidth), Some(100.0));
    assert_eq!(resolver.length_to_px(10.0, UnitType::ViewportHeight), Some(50.0));
    assert_eq!(resolver.length_to_px(10.0, UnitType::ViewportMax), Some(100.0));
    assert_eq!(resolver.length_to_px(10.0, UnitType::DynamicViewportMin), Some(50.0));
}

#[test]
fn test_container_units_fall_back_to_the_small_viewport() {
    let mut resolver = LengthResolver::default().with_viewport(400.0, 200.0);
    assert_eq!(resolver.length_to_px(50.0, UnitType::ContainerWidth), Some(200.0));
    resolver.container = Some(Size::new(100.0, 100.0));
    assert_eq!(resolver.length_to_px(50.0, UnitType::ContainerWidth), Some(50.0));
}
