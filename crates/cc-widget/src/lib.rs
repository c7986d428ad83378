//! cc-widget - Embeddable cookie consent banner
//!
//! Glues the construction runtime to the consent manager: [`mount`] renders
//! the banner into the configured mount point of a [`Document`].

pub mod banner;
pub mod components;
pub mod icons;

use cc_consent::ConsentManager;
use cc_dom::Document;
use cc_runtime::{component, create_element, create_root, Props, RenderError, Root};

pub use banner::{categories, cookie_banner, set_open, sync_checkboxes, toggle_checkbox, COOKIES};

/// Render the banner into the element whose id is the manager's
/// `mount_id`. Fails with [`RenderError::MountTargetMissing`] when the page
/// has no such element.
pub fn mount(doc: &mut Document, manager: &ConsentManager) -> Result<Root, RenderError> {
    let mount_id = &manager.config().mount_id;
    let root = create_root(doc.get_element_by_id(mount_id));

    let manager = manager.clone();
    let banner = component(move |doc, _| cookie_banner(doc, &manager));
    let tree = create_element(doc, banner, Props::new(), vec![])?;
    root.render(doc, tree)?;

    tracing::info!(mount_id = %mount_id, "banner mounted");
    Ok(root)
}
