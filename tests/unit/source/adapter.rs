use super::*;

#[test]
fn rgb_and_bgr_sources_pack_to_the_same_pixel() {
    let rgb = [10u8, 20, 30];
    let bgr = [30u8, 20, 10];
    let a = adapt(&DecodedImage::packed(1, 1, ChannelOrder::Rgb, &rgb)).unwrap();
    let b = adapt(&DecodedImage::packed(1, 1, ChannelOrder::Bgr, &bgr)).unwrap();
    assert_eq!(a.pixels(), &[0x000a_141e]);
    assert_eq!(a, b);
}

#[test]
fn alpha_channel_is_dropped() {
    let rgba = [1u8, 2, 3, 200, 4, 5, 6, 0];
    let img = adapt(&DecodedImage::packed(2, 1, ChannelOrder::Rgba, &rgba)).unwrap();
    assert_eq!(img.pixels(), &[0x0001_0203, 0x0004_0506]);

    let bgra = [3u8, 2, 1, 255];
    let img = adapt(&DecodedImage::packed(1, 1, ChannelOrder::Bgra, &bgra)).unwrap();
    assert_eq!(img.pixels(), &[0x0001_0203]);
}

#[test]
fn row_padding_is_skipped() {
    // 1x2 RGB with 2 padding bytes per row.
    let data = [9u8, 9, 9, 0xee, 0xee, 7, 7, 7];
    let img = adapt(&DecodedImage {
        width: 1,
        height: 2,
        stride: 5,
        order: ChannelOrder::Rgb,
        data: &data,
    })
    .unwrap();
    assert_eq!(img.pixels(), &[0x0009_0909, 0x0007_0707]);
}

#[test]
fn empty_or_zero_sized_sources_are_decode_failures() {
    let err = adapt(&DecodedImage::packed(2, 2, ChannelOrder::Rgb, &[])).unwrap_err();
    assert!(matches!(err, CrtError::Decode { .. }));

    let err = adapt(&DecodedImage::packed(0, 2, ChannelOrder::Rgb, &[1, 2, 3])).unwrap_err();
    assert!(matches!(err, CrtError::Decode { .. }));

    let short = [1u8, 2, 3];
    let err = adapt(&DecodedImage::packed(2, 1, ChannelOrder::Rgb, &short)).unwrap_err();
    assert!(matches!(err, CrtError::Decode { .. }));
}

#[test]
fn dynamic_image_rgba_is_adapted() {
    let img = image::RgbaImage::from_raw(1, 1, vec![255, 0, 0, 128]).unwrap();
    let src = adapt_dynamic(&image::DynamicImage::ImageRgba8(img)).unwrap();
    assert_eq!((src.width(), src.height()), (1, 1));
    assert_eq!(src.pixel(0, 0), 0x00ff_0000);
}

#[test]
fn overflowing_stride_is_a_decode_failure() {
    let data = [0u8; 6];
    let err = adapt(&DecodedImage {
        width: 1,
        height: 3,
        stride: usize::MAX,
        order: ChannelOrder::Rgb,
        data: &data,
    })
    .unwrap_err();
    assert!(matches!(err, CrtError::Decode { .. }));
}
