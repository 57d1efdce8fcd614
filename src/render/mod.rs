/// Gameplay-entity binding contracts.
pub mod binding;
pub(crate) mod easer;
pub(crate) mod renderer;
/// Host render-target contracts.
pub mod target;
