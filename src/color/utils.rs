pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::Rgb,
    math8::{scale8, scale8_video},
};

/// Scale every channel of a color by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Scale a color so that lit channels never drop to zero
#[inline]
pub const fn scale_color_video(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8_video(color.r, scale),
        g: scale8_video(color.g, scale),
        b: scale8_video(color.b, scale),
    }
}
