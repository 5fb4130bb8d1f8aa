mod tests {
    use embassy_time::Instant;
    use rgb_lamp_engine::{
        buffer::PixelBuffer,
        color::{Hsv, Rgb, hsv2rgb},
        pattern::{
            BellCurvePattern, ClockPattern, FirefliesPattern, NightRiderPattern, ParamError,
            ParamKey, Pattern, PatternId, RainbowPattern, RenderContext, Scanner, flash_level,
            hand_levels,
        },
        topology::{Topology, Zone},
    };

    const LEDS: usize = 66;

    fn context(topology: &Topology, now_ms: u64, wall_clock: Option<u64>) -> RenderContext<'_> {
        RenderContext {
            now: Instant::from_millis(now_ms),
            wall_clock,
            topology,
        }
    }

    #[test]
    fn test_rainbow_hue_formula() {
        let rainbow = RainbowPattern::default().with_start_hue(100);
        assert_eq!(rainbow.hue_at(0, 66), 100);
        // 100 + 33 * 255 / 66 = 227.5
        assert_eq!(rainbow.hue_at(33, 66), 227);
        // wraps past the end of the hue circle
        assert_eq!(rainbow.hue_at(65, 66), 96);
    }

    #[test]
    fn test_rainbow_offset_wraps() {
        let mut rainbow = RainbowPattern::default().with_speed(1);
        assert!((rainbow.hue_step() - 12.75).abs() < 1e-3);
        rainbow.advance();
        assert_eq!(rainbow.hue_at(0, 66), 12);
        // one full turn takes 20 steps
        for _ in 1..21 {
            rainbow.advance();
            assert!(rainbow.offset() < 255.0);
        }
        assert!((rainbow.offset() - 12.75).abs() < 1e-2);
    }

    #[test]
    fn test_rainbow_catches_up_one_step_per_frame() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut rainbow = RainbowPattern::default().with_speed(1);

        rainbow.render(&context(&topology, 0, None), &mut leds);
        // four steps are due, only one is taken per frame
        rainbow.render(&context(&topology, 200, None), &mut leds);
        assert!((rainbow.offset() - 12.75).abs() < 1e-3);
        rainbow.render(&context(&topology, 200, None), &mut leds);
        assert!((rainbow.offset() - 12.75).abs() < 1e-3);
        rainbow.render(&context(&topology, 210, None), &mut leds);
        assert!((rainbow.offset() - 25.5).abs() < 1e-3);
        rainbow.render(&context(&topology, 220, None), &mut leds);
        rainbow.render(&context(&topology, 230, None), &mut leds);
        assert!((rainbow.offset() - 51.0).abs() < 1e-3);
        rainbow.render(&context(&topology, 240, None), &mut leds);
        assert!((rainbow.offset() - 51.0).abs() < 1e-3);
    }

    #[test]
    fn test_rainbow_steps_on_its_own_grid() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut rainbow = RainbowPattern::default().with_speed(1);

        rainbow.render(&context(&topology, 0, None), &mut leds);
        assert!(rainbow.offset() < f32::EPSILON);
        rainbow.render(&context(&topology, 50, None), &mut leds);
        assert!((rainbow.offset() - 12.75).abs() < 1e-3);
        rainbow.render(&context(&topology, 50, None), &mut leds);
        rainbow.render(&context(&topology, 60, None), &mut leds);
        assert!((rainbow.offset() - 12.75).abs() < 1e-3);

        let expected = hsv2rgb(Hsv {
            hue: 12,
            sat: 255,
            val: 255,
        });
        assert_eq!(leds.get(0), Some(expected));
        assert_eq!(rainbow.output_brightness(), 100);
    }

    #[test]
    fn test_rainbow_speed_zero_stands_still() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut rainbow = RainbowPattern::default().with_speed(0);
        for t in [0, 50, 100, 1000] {
            rainbow.render(&context(&topology, t, None), &mut leds);
        }
        assert!(rainbow.offset() < f32::EPSILON);
    }

    #[test]
    fn test_scanner_bounces() {
        let mut scanner = Scanner::default();
        for expected in 1..=4 {
            scanner.advance(5);
            assert_eq!(scanner.position, expected);
        }
        assert_eq!(scanner.direction, -1);
        scanner.advance(5);
        assert_eq!(scanner.position, 3);

        for _ in 0..1000 {
            scanner.advance(30);
            assert!(scanner.position < 30);
        }
    }

    #[test]
    fn test_scanner_single_led_zone() {
        let mut scanner = Scanner {
            position: 7,
            direction: 1,
        };
        scanner.advance(1);
        assert_eq!(scanner.position, 0);
        scanner.advance(0);
        assert_eq!(scanner.position, 0);
    }

    #[test]
    fn test_scanner_pulled_back_into_shrunk_zone() {
        let mut scanner = Scanner {
            position: 20,
            direction: 1,
        };
        scanner.advance(10);
        assert_eq!(scanner.position, 8);
        assert_eq!(scanner.direction, -1);
    }

    #[test]
    fn test_night_rider_leaves_trail() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut night_rider = NightRiderPattern::default();

        night_rider.render(&context(&topology, 0, None), &mut leds);
        assert!(leds.as_slice().iter().all(|c| *c == Rgb::new(0, 0, 0)));

        // 30 LEDs per sweep of 500 ms: one step every 16 ms
        night_rider.render(&context(&topology, 16, None), &mut leds);
        assert_eq!(leds.get(18), Some(Rgb::new(245, 0, 0)));
        assert_eq!(leds.get(14), Some(Rgb::new(245, 0, 0)));
        assert_eq!(night_rider.top().position, 1);
        assert_eq!(night_rider.bottom().position, 1);

        night_rider.render(&context(&topology, 32, None), &mut leds);
        assert_eq!(leds.get(19), Some(Rgb::new(245, 0, 0)));
        assert_eq!(leds.get(18), Some(Rgb::new(235, 0, 0)));
        // side zones stay dark
        assert_eq!(leds.get(48), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_night_rider_has_no_params() {
        let mut night_rider = NightRiderPattern::default();
        assert_eq!(
            night_rider.set_param(ParamKey::Speed, 3),
            Err(ParamError::NotApplicable {
                pattern: PatternId::NightRider,
                key: ParamKey::Speed
            })
        );
    }

    #[test]
    fn test_flash_level() {
        assert_eq!(flash_level(0, 2500), 0);
        assert_eq!(flash_level(625, 2500), 126);
        assert_eq!(flash_level(1250, 2500), 255);
        assert_eq!(flash_level(2500, 2500), 0);
        assert_eq!(flash_level(2501, 2500), 0);
        assert_eq!(flash_level(0, 1), 0);
    }

    #[test]
    fn test_fireflies_flash_cycle() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut fireflies = FirefliesPattern::<LEDS>::new(7)
            .with_delays(1000, 1000)
            .with_flash_length(2000);

        fireflies.render(&context(&topology, 0, None), &mut leds);
        assert_eq!(fireflies.scheduled(), 66);
        assert_eq!(fireflies.next_flash(0), Some(Instant::from_millis(1000)));
        assert!(leds.as_slice().iter().all(|c| *c == Rgb::new(0, 0, 0)));

        fireflies.render(&context(&topology, 2000, None), &mut leds);
        let peak = hsv2rgb(Hsv {
            hue: 160,
            sat: 255,
            val: 255,
        });
        assert!(leds.as_slice().iter().all(|c| *c == peak));

        fireflies.render(&context(&topology, 3000, None), &mut leds);
        assert_eq!(leds.get(0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(fireflies.next_flash(0), Some(Instant::from_millis(1000)));

        fireflies.render(&context(&topology, 3001, None), &mut leds);
        assert_eq!(leds.get(0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(fireflies.next_flash(0), Some(Instant::from_millis(4001)));
    }

    #[test]
    fn test_fireflies_delays_stay_in_range() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut fireflies = FirefliesPattern::<LEDS>::new(42);
        fireflies.render(&context(&topology, 0, None), &mut leds);
        for i in 0..fireflies.scheduled() {
            let at = fireflies.next_flash(i).unwrap().as_millis();
            assert!((1000..5000).contains(&at));
        }
    }

    #[test]
    fn test_fireflies_reschedule_on_timing_change() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut fireflies = FirefliesPattern::<LEDS>::new(3).with_delays(1000, 1000);
        fireflies.render(&context(&topology, 0, None), &mut leds);

        fireflies.set_param(ParamKey::Hue, 20).unwrap();
        fireflies.render(&context(&topology, 100, None), &mut leds);
        assert_eq!(fireflies.next_flash(0), Some(Instant::from_millis(1000)));

        fireflies.set_param(ParamKey::MinDelay, 500).unwrap();
        fireflies.set_param(ParamKey::MaxDelay, 500).unwrap();
        fireflies.render(&context(&topology, 100, None), &mut leds);
        assert_eq!(fireflies.next_flash(0), Some(Instant::from_millis(600)));

        fireflies.set_param(ParamKey::FlashLength, 100_000).unwrap();
        assert_eq!(fireflies.flash_length().as_millis(), 32_767);
    }

    #[test]
    fn test_hand_levels() {
        let hand = hand_levels(0, 3600, 30).unwrap();
        assert_eq!((hand.current, hand.current_level), (0, 255));
        assert_eq!((hand.next, hand.next_level), (1, 0));

        let hand = hand_levels(60, 3600, 30).unwrap();
        assert_eq!((hand.current, hand.current_level), (0, 127));
        assert_eq!((hand.next, hand.next_level), (1, 127));

        let hand = hand_levels(120, 3600, 30).unwrap();
        assert_eq!((hand.current, hand.current_level), (1, 255));

        let hand = hand_levels(3599, 3600, 30).unwrap();
        assert_eq!((hand.current, hand.current_level), (29, 2));
        assert_eq!((hand.next, hand.next_level), (0, 252));

        assert_eq!(hand_levels(10, 3600, 0), None);
    }

    #[test]
    fn test_clock_synced() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut clock = ClockPattern::default();

        clock.render(&context(&topology, 0, Some(60)), &mut leds);
        // minute hand halfway between the first two bottom LEDs
        assert_eq!(leds.get(14), Some(Rgb::new(64, 64, 64)));
        assert_eq!(leds.get(13), Some(Rgb::new(64, 64, 64)));
        // hour hand just past the first top LED
        assert_eq!(leds.get(18), Some(Rgb::new(122, 122, 122)));
        assert_eq!(leds.get(19), Some(Rgb::new(5, 5, 5)));
        assert_eq!(leds.get(20), Some(Rgb::new(0, 0, 0)));
        assert_eq!(leds.get(48), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_clock_waiting_for_time() {
        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut clock = ClockPattern::default();
        clock.set_param(ParamKey::PausedBrightness, 64).unwrap();

        clock.render(&context(&topology, 0, None), &mut leds);
        assert_eq!(clock.pause_counter(), 64);
        for zone in [Zone::Top, Zone::Bottom] {
            for &led in topology.zone(zone) {
                assert_eq!(leds.get(usize::from(led)), Some(Rgb::new(64, 64, 64)));
            }
        }
        assert_eq!(leds.get(15), Some(Rgb::new(0, 0, 0)));

        clock.render(&context(&topology, 8, None), &mut leds);
        assert_eq!(clock.pause_counter(), 65);
        clock.render(&context(&topology, 8, None), &mut leds);
        assert_eq!(clock.pause_counter(), 65);
    }

    #[test]
    fn test_bell_curve_profile() {
        assert_eq!(BellCurvePattern::level(0, 30), 0);
        assert_eq!(BellCurvePattern::level(15, 30), 255);
        assert!(BellCurvePattern::level(5, 30) < BellCurvePattern::level(10, 30));

        let topology = Topology::lamp();
        let mut leds = PixelBuffer::<LEDS>::new(topology.led_count());
        let mut bell = BellCurvePattern::default();
        bell.render(&context(&topology, 0, None), &mut leds);
        assert_eq!(leds.get(18), Some(Rgb::new(0, 0, 0)));
        assert_eq!(leds.get(33), Some(Rgb::new(128, 128, 128)));
        // side zones get their own curve
        let middle_left = leds.get(49).unwrap();
        assert!(middle_left.r > 0);
    }
}
