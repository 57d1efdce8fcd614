use crate::foundation::core::{Rgba, Vec2, Vec3};

/// Tri-state value of one resolved-state field.
///
/// `Unset` means the field was never specified at or before this keyframe, so
/// the render default applies and renderers must not touch the property.
/// `Explicit` means this keyframe set it; `Inherited` means it was carried
/// forward from the nearest preceding keyframe that set it. Once a field has
/// been explicitly set it is never `Unset` again in later states of the same
/// object.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field<T> {
    /// Never specified; the render default applies.
    #[default]
    Unset,
    /// Carried forward from an earlier keyframe.
    Inherited(T),
    /// Set by this keyframe, overriding inheritance from here forward.
    Explicit(T),
}

impl<T> Field<T> {
    /// The field's value, if set (explicitly or by inheritance).
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Inherited(v) | Self::Explicit(v) => Some(v),
        }
    }

    /// `true` unless the field is [`Field::Unset`].
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Mark the field explicitly set to `v`.
    pub fn set(&mut self, v: T) {
        *self = Self::Explicit(v);
    }
}

impl<T: Clone> Field<T> {
    /// The carry of this field into the next keyframe's state.
    ///
    /// An explicit value demotes to inherited; inherited and unset carry
    /// through unchanged.
    pub fn carried(&self) -> Self {
        match self {
            Self::Unset => Self::Unset,
            Self::Inherited(v) | Self::Explicit(v) => Self::Inherited(v.clone()),
        }
    }

    /// The field's value, cloned, if set.
    pub fn cloned(&self) -> Option<T> {
        self.value().cloned()
    }
}

impl<T: Copy> Field<T> {
    /// The field's value, copied, if set.
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

/// Interpolation contract for eased field value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rgba {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl<T: Lerp + Copy> Field<T> {
    /// Eased value of this field against its counterpart in the next state.
    ///
    /// Returns `None` when the field is unset here. When `to` does not set
    /// the field, the value holds (no animation on this segment).
    pub fn eased_toward(&self, to: &Self, t: f64) -> Option<T> {
        let from = self.get()?;
        let to = to.get().unwrap_or(from);
        Some(T::lerp(&from, &to, t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/field.rs"]
mod tests;
