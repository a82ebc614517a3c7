use tstp::geometry::{isqrt, Coordinates, Region};
use tstp::units::{quantity, Exponents, Modifier, NumericFormat, Unit};

#[test]
fn isqrt_floors_perfect_and_imperfect_squares() {
    assert_eq!(isqrt(0), 0);
    assert_eq!(isqrt(1), 1);
    assert_eq!(isqrt(100), 10);
    assert_eq!(isqrt(99), 9);
    assert_eq!(isqrt(101), 10);
}

#[test]
fn coordinates_distance_is_euclidean_floor() {
    let a = Coordinates::new(0i32, 0, 0);
    let b = Coordinates::new(3i32, 4, 0);
    assert_eq!(a - b, 5);
    assert_eq!(b - a, 5);
}

#[test]
fn region_contains_checks_radius_and_time_window() {
    let region = Region::new(Coordinates::new(0i32, 0, 0), 500, 10, 20);
    assert!(region.contains(Coordinates::new(300, 400, 0), 15));
    assert!(!region.contains(Coordinates::new(300, 400, 0), 25));
    assert!(!region.contains(Coordinates::new(600, 0, 0), 15));
}

#[test]
fn si_unit_exponents_round_trip() {
    let unit = quantity::acceleration();
    assert!(unit.is_si());
    assert_eq!(unit.numeric_format(), Some(NumericFormat::F32));
    assert_eq!(unit.modifier(), Some(Modifier::Direct));
    let e = unit.exponents().unwrap();
    assert_eq!(e.m, 1);
    assert_eq!(e.s, -2);
    assert_eq!(e.kg, 0);
}

#[test]
fn si_unit_exponents_handle_negative_bias() {
    let mut e = Exponents::new();
    e.m = -3;
    e.s = 3;
    e.cd = -4;
    let unit = Unit::si(NumericFormat::I64, Modifier::Ratio, e);
    assert_eq!(unit.exponents().unwrap(), e);
    assert_eq!(unit.modifier(), Some(Modifier::Ratio));
}

#[test]
fn digital_unit_is_not_si() {
    let unit = Unit::digital(42);
    assert!(!unit.is_si());
    assert_eq!(unit.numeric_format(), None);
    assert_eq!(unit.exponents(), None);
}
