#![allow(clippy::float_cmp)]

use super::*;

// --- ViewBox::parse ---

#[test]
fn parse_space_separated() {
    let vb = ViewBox::parse("0 0 800 600").unwrap();
    assert_eq!(vb, ViewBox { min_x: 0.0, min_y: 0.0, width: 800.0, height: 600.0 });
}

#[test]
fn parse_comma_and_mixed_whitespace() {
    let vb = ViewBox::parse("-8,-8,  216.5\t100").unwrap();
    assert_eq!(vb.min_x, -8.0);
    assert_eq!(vb.width, 216.5);
    assert_eq!(vb.height, 100.0);
}

#[test]
fn parse_rejects_wrong_arity() {
    assert!(ViewBox::parse("0 0 800").is_none());
    assert!(ViewBox::parse("0 0 800 600 1").is_none());
    assert!(ViewBox::parse("").is_none());
}

#[test]
fn parse_rejects_garbage_and_non_positive_size() {
    assert!(ViewBox::parse("0 0 wide 600").is_none());
    assert!(ViewBox::parse("0 0 0 600").is_none());
    assert!(ViewBox::parse("0 0 800 -1").is_none());
    assert!(ViewBox::parse("0 0 inf 600").is_none());
}

// --- fit_scale ---

#[test]
fn landscape_into_square_box() {
    let intrinsic = Size::new(800.0, 600.0);
    let available = Size::new(400.0, 400.0);
    assert_eq!(fit_scale(intrinsic, available), 0.5);
    assert_eq!(fitted_size(intrinsic, available), Size::new(400.0, 300.0));
}

#[test]
fn height_bound_when_taller() {
    let scale = fit_scale(Size::new(100.0, 1000.0), Size::new(500.0, 500.0));
    assert_eq!(scale, 0.5);
}

#[test]
fn never_upscales_small_content() {
    let intrinsic = Size::new(200.0, 100.0);
    let available = Size::new(900.0, 700.0);
    assert_eq!(fit_scale(intrinsic, available), 1.0);
    assert_eq!(fitted_size(intrinsic, available), intrinsic);
}

#[test]
fn zero_available_box_scales_to_zero() {
    assert_eq!(fit_scale(Size::new(10.0, 10.0), Size::new(0.0, 0.0)), 0.0);
}

#[test]
fn empty_intrinsic_is_identity() {
    assert_eq!(fit_scale(Size::new(0.0, 0.0), Size::new(100.0, 100.0)), 1.0);
}

// --- available_box ---

#[test]
fn available_box_subtracts_padding_on_both_sides() {
    let avail = available_box(Size::new(1000.0, 800.0), 0.9, 20.0);
    assert_eq!(avail, Size::new(860.0, 680.0));
}

#[test]
fn available_box_never_negative() {
    let avail = available_box(Size::new(30.0, 30.0), 0.9, 20.0);
    assert_eq!(avail, Size::new(0.0, 0.0));
}
