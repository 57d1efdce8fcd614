use crate::foundation::core::{Timed, Viewport};
use crate::foundation::error::{StageError, StageResult};
use crate::timeline::raw::RawKeyframeDef;
use crate::timeline::state::ResolveState;

/// Resolve an ordered raw keyframe list into fully-inherited states.
///
/// A single left-to-right pass: each produced state starts from the carry of
/// the previous one, then overwrites exactly the fields present in the raw
/// delta. Pure and deterministic; all unit conversion happens inside
/// `ResolveState::apply`, so nothing downstream re-interprets authored units.
///
/// Non-finite or descending keyframe times are a configuration error for the
/// object (equal timestamps are legal and read as an instantaneous keyframe).
pub(crate) fn resolve<S: ResolveState>(
    object_id: &str,
    keyframes: &[RawKeyframeDef],
    vp: Viewport,
) -> StageResult<Vec<Timed<S>>> {
    if keyframes.is_empty() {
        return Err(StageError::config(format!(
            "stage object \"{object_id}\" has no keyframes"
        )));
    }
    for kf in keyframes {
        if !kf.time.is_finite() {
            return Err(StageError::config(format!(
                "stage object \"{object_id}\" has a non-finite keyframe time"
            )));
        }
    }
    if keyframes.windows(2).any(|w| w[1].time < w[0].time) {
        return Err(StageError::config(format!(
            "stage object \"{object_id}\" keyframe times must be ascending"
        )));
    }

    let mut carry = S::default();
    let mut states = Vec::with_capacity(keyframes.len());
    for kf in keyframes {
        let mut next = carry.carried();
        next.apply(&kf.fields, vp);
        states.push(Timed::new(kf.time, next.clone()));
        carry = next;
    }
    Ok(states)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/resolve.rs"]
mod tests;
