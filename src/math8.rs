//! 8-bit fixed point helpers (ported from `FastLED` `lib8tion`)
//!
//! All functions operate on the 0-255 range, where 255 stands for 1.0.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale an 8-bit value, guaranteeing a non-zero result for non-zero inputs
///
/// Used where dimmed pixels must stay visibly lit.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8_video(value: u8, scale: u8) -> u8 {
    if value == 0 || scale == 0 {
        return 0;
    }
    (((value as u16 * scale as u16) >> 8) + 1) as u8
}

/// Triangle wave: 0 -> 254 -> 0 over one input period
#[inline]
pub const fn triwave8(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    j << 1
}

/// Cubic ease in/out
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn ease8_in_out_cubic(i: u8) -> u8 {
    let ii = scale8(i, i);
    let iii = scale8(ii, i);
    let r1 = (3 * ii as u16).saturating_sub(2 * iii as u16);
    if r1 & 0x100 != 0 { 255 } else { r1 as u8 }
}

/// Cubic wave: a triangle wave smoothed by [`ease8_in_out_cubic`]
///
/// Peaks in the middle of the input range and tapers at both ends.
#[inline]
pub const fn cubicwave8(i: u8) -> u8 {
    ease8_in_out_cubic(triwave8(i))
}

/// Piecewise linear approximation of an ease in/out curve
#[inline]
pub const fn ease8_in_out_approx(i: u8) -> u8 {
    if i < 64 {
        i / 2
    } else if i > 255 - 64 {
        255 - (255 - i) / 2
    } else {
        let j = i - 64;
        j + j / 2 + 32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_ease_is_monotonic() {
        let mut prev = 0;
        for i in 0..=255u8 {
            let v = ease8_in_out_approx(i);
            assert!(v >= prev, "dropped at {i}");
            prev = v;
        }
        assert_eq!(ease8_in_out_approx(255), 255);
    }

    #[test]
    fn cubic_ease_endpoints() {
        assert_eq!(ease8_in_out_cubic(0), 0);
        assert_eq!(ease8_in_out_cubic(255), 255);
    }
}
