//! The canonical, version independent cluster model.
pub mod consts;
mod helpers;
pub mod k8s_components;
mod types;

pub use types::*;
