//! Frame pacing for the lamp control loop.
//!
//! Nothing here sleeps. The caller waits for the returned duration and
//! calls `tick` again.

use embassy_time::{Duration, Instant};

use crate::{OutputDriver, Renderer, WallClock};

/// Default target frame rate
pub const DEFAULT_FPS: u64 = 50;

/// Default frame duration based on target FPS
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS);

/// Result of a frame tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// Deadline for the next frame
    pub next_deadline: Instant,
    /// How long to wait until the next frame, zero when behind schedule
    pub sleep_duration: Duration,
}

/// Ties the renderer to an output driver and a wall clock
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, driver, sntp_clock);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: OutputDriver,
    C: WallClock,
    const MAX_LEDS: usize,
    const INTENT_CHANNEL_SIZE: usize,
> {
    output: O,
    clock: C,
    renderer: Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE>,
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, C: WallClock, const MAX_LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
    FrameScheduler<'a, O, C, MAX_LEDS, INTENT_CHANNEL_SIZE>
{
    pub fn new(renderer: Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE>, output: O, clock: C) -> Self {
        Self::with_frame_duration(renderer, output, clock, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(
        renderer: Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE>,
        output: O,
        clock: C,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output,
            clock,
            renderer,
            next_frame: None,
            frame_duration,
        }
    }

    /// Render one frame, hand it to the driver and compute the next deadline
    ///
    /// After a stall longer than two frames the schedule restarts at `now`
    /// instead of rendering the backlog.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        let scheduled = match self.next_frame {
            Some(next) if now <= next + max_drift => next,
            _ => now,
        };

        let frame = self.renderer.render(now, self.clock.local_seconds());
        self.output.write(frame.pixels, frame.brightness);

        let next_deadline = scheduled + self.frame_duration;
        self.next_frame = Some(next_deadline);

        FrameResult {
            next_deadline,
            sleep_duration: next_deadline
                .checked_duration_since(now)
                .unwrap_or(Duration::from_ticks(0)),
        }
    }

    pub fn renderer(&self) -> &Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE> {
        &mut self.renderer
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
