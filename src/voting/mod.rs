pub mod percent;

pub use percent::compute_percentages;
