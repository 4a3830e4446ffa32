//! Sample-rate filters: LPC synthesis and pre-emphasis

pub mod all_pole;
pub mod preemphasis;
pub mod stability;

pub use all_pole::AllPoleFilter;
pub use preemphasis::PreEmphasis;
pub use stability::check_filter;
