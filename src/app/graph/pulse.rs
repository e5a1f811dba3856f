const PULSE_INTERVAL_SECS: f32 = 0.1;
const PULSE_PHASE_STEP: f32 = 0.1;
const PULSE_AMPLITUDE: f32 = 0.1;

/// Slow oscillation of the center force that keeps the layout breathing.
#[derive(Clone, Copy, Debug, Default)]
pub(in crate::app) struct CenterPulse {
    phase: f32,
    elapsed_secs: f32,
}

impl CenterPulse {
    /// Accumulates frame time and reports whether at least one beat elapsed.
    pub(in crate::app) fn advance(&mut self, delta_secs: f32) -> bool {
        self.elapsed_secs += delta_secs.clamp(0.0, 1.0);

        let mut beat = false;
        while self.elapsed_secs >= PULSE_INTERVAL_SECS {
            self.elapsed_secs -= PULSE_INTERVAL_SECS;
            self.phase += PULSE_PHASE_STEP;
            beat = true;
        }
        beat
    }

    pub(in crate::app) fn strength(&self, base: f32) -> f32 {
        base * (1.0 + PULSE_AMPLITUDE * self.phase.sin())
    }
}
