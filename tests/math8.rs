mod tests {
    use rgb_lamp_engine::math8::{
        cubicwave8, ease8_in_out_approx, scale8, scale8_video, triwave8,
    };

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_scale8_video_keeps_lit_channels() {
        assert_eq!(scale8_video(1, 1), 1);
        assert_eq!(scale8_video(128, 255), 128);
        assert_eq!(scale8_video(0, 200), 0);
        assert_eq!(scale8_video(200, 0), 0);
    }

    #[test]
    fn test_triwave8() {
        assert_eq!(triwave8(0), 0);
        assert_eq!(triwave8(64), 128);
        assert_eq!(triwave8(127), 254);
        assert_eq!(triwave8(128), 254);
        assert_eq!(triwave8(255), 0);
    }

    #[test]
    fn test_cubicwave8_peaks_in_the_middle() {
        assert_eq!(cubicwave8(0), 0);
        assert_eq!(cubicwave8(128), 255);
        assert!(cubicwave8(64) < cubicwave8(100));
    }

    #[test]
    fn test_ease8_in_out_approx() {
        assert_eq!(ease8_in_out_approx(0), 0);
        assert_eq!(ease8_in_out_approx(63), 31);
        assert_eq!(ease8_in_out_approx(64), 32);
        assert_eq!(ease8_in_out_approx(128), 128);
        assert_eq!(ease8_in_out_approx(255), 255);
    }
}
