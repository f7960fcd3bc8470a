//! Viewport windowing: which rows to materialize for a scroll offset, and
//! when that range has to be recomputed.

mod smart;

pub use smart::{buffer_hit_size, buffer_size, compute_range, should_refresh, SmartRenderer};
