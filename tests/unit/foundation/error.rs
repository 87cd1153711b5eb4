use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(CrtError::config("x").to_string().contains("config error:"));
    assert!(
        CrtError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(CrtError::decode("x").to_string().starts_with("decode failure: "));
    assert!(
        CrtError::encode_write("out.ppm", "x")
            .to_string()
            .contains("encode/write failure for 'out.ppm'")
    );
}

#[test]
fn decode_frame_names_the_index() {
    let err = CrtError::decode_frame(17, "missing file");
    assert_eq!(err.to_string(), "decode failure at frame 17: missing file");
    assert_eq!(err.failed_frame(), Some(17));
    assert_eq!(CrtError::decode("x").failed_frame(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CrtError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
