//! Render errors

use cc_dom::DomError;
use thiserror::Error;

/// Errors reported by [`crate::Root::render`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The mount point was never found or is no longer attached
    #[error("mount target not found")]
    MountTargetMissing,

    /// Tree operation failed while building or mounting
    #[error(transparent)]
    Dom(#[from] DomError),
}
