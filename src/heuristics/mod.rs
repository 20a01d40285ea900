pub mod framework;
pub mod patterns;

pub use framework::{detect_framework, FrameworkLabel};
pub use patterns::PatternDetector;
