pub(crate) mod raw;
pub(crate) mod resolve;
pub(crate) mod schedule;
pub(crate) mod state;
