mod tests {
    use rgb_lamp_engine::pattern::{ParamKey, PatternId};

    #[test]
    fn test_pattern_names() {
        for id in PatternId::ALL {
            assert_eq!(PatternId::parse_from_str(id.as_str()), Some(id));
        }
        assert_eq!(PatternId::BellCurve.as_str(), "Bell Curve");
        assert_eq!(PatternId::NightRider.as_str(), "Night Rider");
        assert_eq!(PatternId::parse_from_str("bell curve"), None);
        assert_eq!(PatternId::parse_from_str("Disco"), None);
    }

    #[test]
    fn test_raw_ids() {
        assert_eq!(PatternId::from_raw(0), Some(PatternId::Colour));
        assert_eq!(PatternId::from_raw(2), Some(PatternId::Clock));
        assert_eq!(PatternId::from_raw(5), Some(PatternId::Fireflies));
        assert_eq!(PatternId::from_raw(6), None);
        for id in PatternId::ALL {
            assert_eq!(PatternId::from_raw(id as u8), Some(id));
        }
    }

    #[test]
    fn test_param_keys() {
        assert_eq!(ParamKey::parse_from_str("startHue"), Some(ParamKey::StartHue));
        assert_eq!(ParamKey::parse_from_str("flashLength"), Some(ParamKey::FlashLength));
        assert_eq!(ParamKey::parse_from_str("minuteBlue"), Some(ParamKey::MinuteBlue));
        assert_eq!(ParamKey::parse_from_str("StartHue"), None);
        assert_eq!(ParamKey::PausedBrightness.as_str(), "pausedBrightness");
    }
}
