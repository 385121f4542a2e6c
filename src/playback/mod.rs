pub(crate) mod input;
pub(crate) mod pacing;
pub(crate) mod scheduler;
pub(crate) mod state;
