use super::*;

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!(Rgb8::parse_hex("#FF0000").unwrap(), Rgb8::new(255, 0, 0));
    assert_eq!(Rgb8::parse_hex("0a0b0c").unwrap(), Rgb8::new(10, 11, 12));
    assert!(Rgb8::parse_hex("#fff").is_err());
    assert!(Rgb8::parse_hex("#gg0000").is_err());
}

#[test]
fn deserializes_hex_and_array_forms() {
    let a: Rgb8 = serde_json::from_str("\"#0000ff\"").unwrap();
    let b: Rgb8 = serde_json::from_str("[0, 0, 255]").unwrap();
    assert_eq!(a, b);
    assert!(serde_json::from_str::<Rgb8>("[0, 0]").is_err());
}

#[test]
fn serializes_as_lower_hex() {
    let s = serde_json::to_string(&Rgb8::new(0xAB, 0xCD, 0xEF)).unwrap();
    assert_eq!(s, "\"#abcdef\"");
}
