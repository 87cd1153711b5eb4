use super::*;
use crate::foundation::core::{pack_rgb, unpack_rgb};

#[test]
fn top_byte_is_discarded() {
    assert_eq!(fade_pixel(0xff00_0000), 0);
    assert_eq!(fade_pixel(0xff00_0010), fade_pixel(0x0000_0010));
}

#[test]
fn full_white_keeps_fifteen_sixteenths() {
    // 127 + 63 + 31 + 15
    assert_eq!(fade_pixel(0x00ff_ffff), pack_rgb(236, 236, 236));
}

#[test]
fn channels_do_not_bleed_into_each_other() {
    assert_eq!(fade_pixel(pack_rgb(0, 255, 0)), pack_rgb(0, 236, 0));
    assert_eq!(fade_pixel(pack_rgb(1, 1, 1)), 0);
}

#[test]
fn decay_is_monotonic_and_reaches_zero() {
    for start in 0..=255u8 {
        let mut px = pack_rgb(start, start / 2, 255 - start);
        let mut steps = 0;
        while px != 0 {
            let next = fade_pixel(px);
            let (a, b) = (unpack_rgb(px), unpack_rgb(next));
            for ch in 0..3 {
                assert!(b[ch] < a[ch] || a[ch] == 0, "channel {ch} did not decay");
            }
            px = next;
            steps += 1;
            assert!(steps <= 64, "start {start} did not converge");
        }
    }
}

#[test]
fn fade_phosphors_touches_every_pixel() {
    let mut fb = vec![0x00ff_ffff; 6];
    fade_phosphors(&mut fb);
    assert!(fb.iter().all(|&p| p == pack_rgb(236, 236, 236)));
}
