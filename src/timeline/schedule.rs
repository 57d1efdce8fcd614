use crate::animation::ease::Ease;
use crate::foundation::core::Timed;

/// The pair of resolved states bracketing the current playback time, with
/// normalized and eased local progress.
#[derive(Debug)]
pub(crate) struct Bracket<'a, S> {
    pub(crate) from: &'a Timed<S>,
    pub(crate) to: &'a Timed<S>,
    /// Linear progress through `[from.time, to.time)`, clamped to `[0, 1]`.
    ///
    /// Renderers consume only `eased`; this stays part of the bracket
    /// contract and is read by the scheduling tests.
    #[allow(dead_code)]
    pub(crate) progress: f64,
    /// `progress` run through the From state's easing selector.
    pub(crate) eased: f64,
}

/// Bracket locator with a monotonic-playback hint.
///
/// Playback time overwhelmingly moves forward one small step per frame, so
/// the cursor remembers the last matched index and gallops outward from it
/// before falling back to binary search. Correct for any jump in `t`
/// (retry, checkpoint, scrubbing), not just forward motion.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Cursor {
    hint: usize,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Locate the bracket for playback time `t`.
    ///
    /// Boundary semantics: past the last state the final pose holds with
    /// progress 1 (this also covers an all-equal-timestamp list, where the
    /// earlier keyframes read as instantaneous); before the first state the
    /// first pose holds with progress 0. A zero-width interior interval
    /// never divides by zero, and a non-finite `t` resolves to a boundary
    /// hold (NaN reads as before-the-first).
    pub(crate) fn locate<'a, S>(
        &mut self,
        states: &'a [Timed<S>],
        t: f64,
        ease_of: impl Fn(&S) -> Ease,
    ) -> Bracket<'a, S> {
        let last = states.len() - 1;
        // A NaN clock compares false against both boundaries; hold the first
        // pose instead of falling into the interior search.
        if t.is_nan() {
            let s = &states[0];
            self.hint = 0;
            return Bracket {
                from: s,
                to: s,
                progress: 0.0,
                eased: 0.0,
            };
        }
        if t >= states[last].time {
            let s = &states[last];
            self.hint = last.saturating_sub(1);
            return Bracket {
                from: s,
                to: s,
                progress: 1.0,
                eased: 1.0,
            };
        }
        if t <= states[0].time {
            let s = &states[0];
            self.hint = 0;
            return Bracket {
                from: s,
                to: s,
                progress: 0.0,
                eased: 0.0,
            };
        }

        let i = upper_bound_from(states, t, self.hint.min(last - 1)) - 1;
        self.hint = i;

        let from = &states[i];
        let to = &states[i + 1];
        let span = to.time - from.time;
        let progress = if span > 0.0 {
            ((t - from.time) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = ease_of(&from.value).apply(progress);
        Bracket {
            from,
            to,
            progress,
            eased,
        }
    }
}

/// Smallest index whose time is strictly greater than `t`, found by galloping
/// outward from hint `h` and binary-searching the bounded window.
///
/// Precondition: `states` is sorted non-descending and
/// `states[0].time <= t < states[len - 1].time`.
fn upper_bound_from<S>(states: &[Timed<S>], t: f64, h: usize) -> usize {
    if states[h].time <= t {
        // Upper bound lies in (prev, prev + step].
        let mut prev = h;
        let mut step = 1usize;
        loop {
            let cand = prev + step;
            if cand >= states.len() || states[cand].time > t {
                let end = cand.min(states.len());
                return prev + 1 + states[prev + 1..end].partition_point(|s| s.time <= t);
            }
            prev = cand;
            step *= 2;
        }
    } else {
        // states[end].time > t holds throughout; walk the bound backward.
        let mut end = h;
        let mut step = 1usize;
        loop {
            let cand = end.saturating_sub(step);
            if states[cand].time <= t {
                return cand + 1 + states[cand + 1..end].partition_point(|s| s.time <= t);
            }
            if cand == 0 {
                return states[..end].partition_point(|s| s.time <= t);
            }
            end = cand;
            step *= 2;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
