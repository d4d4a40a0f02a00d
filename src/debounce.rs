//! Turns the noisy per-frame touching flag into one edge per held gesture.
//!
//! A run of `touch_frame_required` consecutive touching frames confirms the
//! gesture and fires once. Holding it fires nothing more; the first
//! non-touching frame re-arms (unless a release tolerance is configured).

/// Where the debouncer currently is. Derived from [`TouchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Idle,
    Accumulating,
    Confirmed,
}

/// Debounce memory carried from one frame to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchState {
    pub consecutive_frame_count: u32,
    pub is_confirmed: bool,
    /// Non-touching frames swallowed by the release tolerance in the current run.
    pub missed_frames: u32,
}

impl TouchState {
    pub const IDLE: TouchState = TouchState {
        consecutive_frame_count: 0,
        is_confirmed: false,
        missed_frames: 0,
    };

    pub fn phase(&self) -> TouchPhase {
        if self.is_confirmed {
            TouchPhase::Confirmed
        } else if self.consecutive_frame_count > 0 {
            TouchPhase::Accumulating
        } else {
            TouchPhase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    pub touch_frame_required: u32,
    pub release_tolerance_frames: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            touch_frame_required: 3,
            release_tolerance_frames: 0,
        }
    }
}

/// Result of feeding one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: TouchState,
    /// True on exactly the frame that confirmed the gesture.
    pub fired: bool,
}

/// Advances the debouncer by one frame.
pub fn step(state: TouchState, touching: bool, config: &DebounceConfig) -> Step {
    if !touching {
        let in_run = state.consecutive_frame_count > 0 || state.is_confirmed;
        if in_run && state.missed_frames < config.release_tolerance_frames {
            return Step {
                state: TouchState {
                    missed_frames: state.missed_frames + 1,
                    ..state
                },
                fired: false,
            };
        }
        return Step {
            state: TouchState::IDLE,
            fired: false,
        };
    }

    if state.is_confirmed {
        return Step {
            state: TouchState {
                missed_frames: 0,
                ..state
            },
            fired: false,
        };
    }

    let count = state.consecutive_frame_count + 1;
    let required = config.touch_frame_required.max(1);
    let fired = count >= required;
    Step {
        state: TouchState {
            consecutive_frame_count: count,
            is_confirmed: fired,
            missed_frames: 0,
        },
        fired,
    }
}

/// Runs a whole predicate sequence from idle and returns the indices that fired.
pub fn fired_frames<I>(frames: I, config: &DebounceConfig) -> Vec<usize>
where
    I: IntoIterator<Item = bool>,
{
    let mut state = TouchState::IDLE;
    let mut fired = Vec::new();
    for (i, touching) in frames.into_iter().enumerate() {
        let s = step(state, touching, config);
        if s.fired {
            fired.push(i);
        }
        state = s.state;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: bool = true;
    const F: bool = false;

    fn strict(n: u32) -> DebounceConfig {
        DebounceConfig {
            touch_frame_required: n,
            release_tolerance_frames: 0,
        }
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(TouchState::default(), TouchState::IDLE);
        assert_eq!(TouchState::IDLE.phase(), TouchPhase::Idle);
    }

    #[test]
    fn test_phases_along_a_run() {
        let config = DebounceConfig::default();
        let mut state = TouchState::IDLE;
        let mut phases = Vec::new();
        for p in [T, T, T, T, F] {
            state = step(state, p, &config).state;
            phases.push(state.phase());
        }
        assert_eq!(
            phases,
            vec![
                TouchPhase::Accumulating,
                TouchPhase::Accumulating,
                TouchPhase::Confirmed,
                TouchPhase::Confirmed,
                TouchPhase::Idle,
            ]
        );
    }

    #[test]
    fn test_short_run_never_fires() {
        for n in 1..6 {
            let mut frames = vec![T; (n - 1) as usize];
            frames.push(F);
            assert!(fired_frames(frames, &strict(n)).is_empty(), "n = {}", n);
        }
    }

    #[test]
    fn test_fires_once_at_threshold() {
        for n in 1..6u32 {
            let frames = vec![T; n as usize + 10];
            assert_eq!(fired_frames(frames, &strict(n)), vec![n as usize - 1], "n = {}", n);
        }
    }

    #[test]
    fn test_held_gesture_keeps_count() {
        let config = DebounceConfig::default();
        let mut state = TouchState::IDLE;
        for _ in 0..3 {
            state = step(state, T, &config).state;
        }
        let held = step(state, T, &config);
        assert!(!held.fired);
        assert_eq!(held.state, state);
    }

    #[test]
    fn test_rearms_after_single_release() {
        let frames = [T, T, T, T, F, T, T, T];
        assert_eq!(fired_frames(frames, &DebounceConfig::default()), vec![2, 7]);
    }

    #[test]
    fn test_default_scenario_fires_on_third_frame() {
        assert_eq!(fired_frames([T, T, T, T, F], &DebounceConfig::default()), vec![2]);
    }

    #[test]
    fn test_alternating_never_fires() {
        assert!(fired_frames([T, F, T, F, T], &DebounceConfig::default()).is_empty());
    }

    #[test]
    fn test_release_resets_from_any_phase() {
        let config = DebounceConfig::default();
        let accumulating = TouchState {
            consecutive_frame_count: 2,
            is_confirmed: false,
            missed_frames: 0,
        };
        let confirmed = TouchState {
            consecutive_frame_count: 3,
            is_confirmed: true,
            missed_frames: 0,
        };
        for state in [TouchState::IDLE, accumulating, confirmed] {
            assert_eq!(step(state, F, &config).state, TouchState::IDLE);
        }
    }

    #[test]
    fn test_tolerance_bridges_dropped_frame() {
        let config = DebounceConfig {
            touch_frame_required: 3,
            release_tolerance_frames: 1,
        };
        // One dropout inside the accumulating run still confirms on the third touching frame.
        assert_eq!(fired_frames([T, F, T, T], &config), vec![3]);
        // One dropout while held does not re-arm.
        assert_eq!(fired_frames([T, T, T, F, T, T, T], &config), vec![2]);
        // Two in a row do.
        assert_eq!(fired_frames([T, T, T, F, F, T, T, T], &config), vec![2, 7]);
    }

    #[test]
    fn test_tolerance_ignored_when_idle() {
        let config = DebounceConfig {
            touch_frame_required: 3,
            release_tolerance_frames: 2,
        };
        let s = step(TouchState::IDLE, F, &config);
        assert_eq!(s.state, TouchState::IDLE);
    }
}
