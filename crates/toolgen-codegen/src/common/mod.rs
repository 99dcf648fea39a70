//! Output-language helpers and the artifact type shared by generators.

pub mod artifact;
pub mod python;
