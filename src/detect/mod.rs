//! Language/toolchain detection from a repository's build descriptor

mod detector;
mod rules;
mod tag;

pub use detector::{detect, scan_descriptor, Detection, DetectionSource, BUILD_DESCRIPTOR};
pub use rules::{match_base_image_line, match_root_listing, Marker, BASE_IMAGE_RULES, ROOT_MARKER_RULES};
pub use tag::LanguageTag;
