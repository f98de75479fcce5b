pub(super) mod gc;
pub(super) mod mark;
pub(super) mod merge;
pub(super) mod migrate;
pub(super) mod reset;
pub(super) mod show;
pub(super) mod stats;
pub(super) mod sync;
