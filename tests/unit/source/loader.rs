use super::*;

#[test]
fn pattern_substitutes_plain_and_padded_indices() {
    let p = SequencePattern::parse("frames/shot{}.png").unwrap();
    assert_eq!(p.path_for(FrameIndex(7)), PathBuf::from("frames/shot7.png"));

    let p = SequencePattern::parse("in/{:04}.ppm").unwrap();
    assert_eq!(p.path_for(FrameIndex(42)), PathBuf::from("in/0042.ppm"));
    assert_eq!(p.path_for(FrameIndex(12345)), PathBuf::from("in/12345.ppm"));
}

#[test]
fn pattern_rejects_missing_bad_or_repeated_placeholders() {
    assert!(SequencePattern::parse("frame.png").is_err());
    assert!(SequencePattern::parse("frame{.png").is_err());
    assert!(SequencePattern::parse("frame{:x}.png").is_err());
    assert!(SequencePattern::parse("{}_{}.png").is_err());
}

#[test]
fn missing_sequence_frame_reports_its_index() {
    let dir = PathBuf::from("target").join("loader_missing");
    std::fs::create_dir_all(&dir).unwrap();
    let pattern = format!("{}/does_not_exist_{{}}.png", dir.display());
    let mut seq = FileSequence::new(SequencePattern::parse(&pattern).unwrap());

    let err = seq.load(FrameIndex(9)).unwrap_err();
    assert_eq!(err.failed_frame(), Some(9));
}

#[test]
fn load_image_reads_ppm() {
    let dir = PathBuf::from("target").join("loader_ppm");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("in.ppm");
    image::save_buffer_with_format(
        &path,
        &[255, 0, 0, 0, 0, 255],
        2,
        1,
        image::ColorType::Rgb8,
        image::ImageFormat::Pnm,
    )
    .unwrap();

    let src = load_image(&path).unwrap();
    assert_eq!(src.pixels(), &[0x00ff_0000, 0x0000_00ff]);
}
