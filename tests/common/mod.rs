//! Shared test infrastructure for pwm-dimmer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use pwm_dimmer::{
    BrightnessController, ChannelBank, DimmerConfig, DutyChange, PwmChannel, SwitchLine,
    Switches, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Switches
// ============================================================================

/// Switch whose level is driven by the test through a shared cell
pub struct MockSwitch<'a> {
    down: &'a Cell<bool>,
}

impl SwitchLine for MockSwitch<'_> {
    fn is_down(&mut self) -> bool {
        self.down.get()
    }
}

/// The three button levels, owned by the test
pub struct Lines {
    pub toggle: Cell<bool>,
    pub increase: Cell<bool>,
    pub decrease: Cell<bool>,
}

impl Lines {
    pub fn new() -> Self {
        Self {
            toggle: Cell::new(false),
            increase: Cell::new(false),
            decrease: Cell::new(false),
        }
    }

    pub fn switches(&self) -> Switches<MockSwitch<'_>> {
        Switches::new(
            MockSwitch { down: &self.toggle },
            MockSwitch {
                down: &self.increase,
            },
            MockSwitch {
                down: &self.decrease,
            },
        )
    }
}

// ============================================================================
// Mock PWM Channel
// ============================================================================

/// Channel that records every compare level written to it
pub struct MockChannel {
    level: u16,
    history: heapless::Vec<u16, 256>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            level: 0,
            history: heapless::Vec::new(),
        }
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn history(&self) -> &[u16] {
        &self.history
    }
}

impl PwmChannel for MockChannel {
    fn set_compare_level(&mut self, level: u16) {
        self.level = level;
        let _ = self.history.push(level);
    }
}

// ============================================================================
// Test Bench
// ============================================================================

pub type TestController<'a> =
    BrightnessController<'a, TestInstant, MockTimeSource, MockSwitch<'a>, MockChannel, 3>;

/// Controller with the default configuration wired to mocks
pub fn controller<'a>(timer: &'a MockTimeSource, lines: &'a Lines) -> TestController<'a> {
    BrightnessController::new(
        DimmerConfig::default(),
        timer,
        lines.switches(),
        ChannelBank::new([MockChannel::new(), MockChannel::new(), MockChannel::new()]),
    )
    .unwrap()
}

/// Services the controller until at least `millis` have passed, sleeping as
/// requested between calls. Returns the changes made on the way.
pub fn run_for(
    controller: &mut TestController<'_>,
    timer: &MockTimeSource,
    millis: u64,
) -> heapless::Vec<DutyChange, 128> {
    let mut changes = heapless::Vec::new();
    let mut elapsed = 0;

    while elapsed < millis {
        let report = controller.service();
        if let Some(change) = report.change {
            changes.push(change).unwrap();
        }
        let step = report.next_service.as_millis();
        assert!(step > 0, "controller asked to be serviced without delay");
        timer.advance(TestDuration(step));
        elapsed += step;
    }

    changes
}

/// All channels carry the same level right now
pub fn channels_match(controller: &TestController<'_>) -> bool {
    let channels = controller.outputs().channels();
    channels.iter().all(|c| c.level() == channels[0].level())
}
