mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{hsv2rgb, scale_color, scale_color_video};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Black (all channels off)
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
