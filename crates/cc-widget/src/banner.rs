//! The cookie banner: settings control plus the consent dialog

use cc_consent::{ConsentCategory, ConsentEvent, ConsentManager, ConsentPreferences};
use cc_dom::{Document, DomResult, Event};
use cc_runtime::{cn, component, create_element, Child, Fragment, Props};

use crate::components::{button, checkbox, popup};
use crate::icons::gear_icon;

/// A category as shown to the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieItem {
    pub id: &'static str,
    pub name: &'static str,
    pub required: bool,
}

pub const COOKIES: &[CookieItem] = &[
    CookieItem { id: "strictly-necessary", name: "Strictly necessary", required: true },
    CookieItem { id: "performance", name: "Performance", required: false },
    CookieItem { id: "targeting", name: "Targeting", required: false },
    CookieItem { id: "analytics", name: "Analytics", required: false },
    CookieItem { id: "unclassified", name: "Unclassified", required: false },
];

pub const TITLE: &str = "This website uses cookies";

/// Consent categories backing [`COOKIES`]
pub fn categories() -> Vec<ConsentCategory> {
    COOKIES
        .iter()
        .map(|item| {
            if item.required {
                ConsentCategory::required(item.id)
            } else {
                ConsentCategory::new(item.id)
            }
        })
        .collect()
}

/// Show or hide the dialog (and hide or show the settings control)
pub fn set_open(doc: &mut Document, open: bool) -> DomResult<()> {
    let value = if open { "true" } else { "false" };
    for class in ["cb-dialog", "cb-control"] {
        if let Some(node) = doc.query_class(class) {
            doc.tree.set_attribute(node, "data-open", value)?;
        }
    }
    Ok(())
}

/// Reflect a preference map onto the rendered checkboxes
pub fn sync_checkboxes(doc: &mut Document, preferences: &ConsentPreferences) -> DomResult<()> {
    for (id, granted) in preferences.iter() {
        if let Some(input) = doc.get_element_by_id(id) {
            doc.tree
                .set_attribute(input, "checked", if granted { "true" } else { "false" })?;
        }
    }
    Ok(())
}

/// Flip a checkbox the way a click on its label would and fire `change`.
/// Returns the new state, or `None` for a missing or disabled checkbox.
pub fn toggle_checkbox(doc: &mut Document, id: &str) -> DomResult<Option<bool>> {
    let Some(input) = doc.get_element_by_id(id) else {
        return Ok(None);
    };
    if doc.tree.get_attribute(input, "disabled") == Some("true") {
        return Ok(None);
    }

    let checked = doc.tree.get_attribute(input, "checked") != Some("true");
    doc.tree
        .set_attribute(input, "checked", if checked { "true" } else { "false" })?;
    doc.dispatch_event(input, Event::new("change"))?;
    Ok(Some(checked))
}

fn close_after(doc: &mut Document, preferences: &ConsentPreferences) {
    let result = sync_checkboxes(doc, preferences).and_then(|()| set_open(doc, false));
    if let Err(err) = result {
        tracing::warn!(%err, "banner not updated");
    }
}

fn description(doc: &mut Document) -> DomResult<Child> {
    let link = create_element(
        doc,
        "a",
        Props::new()
            .with("href", "/cookie-policy")
            .with("className", "text-accent ml-2"),
        vec!["Learn more".into()],
    )?;
    create_element(
        doc,
        Fragment(),
        Props::new(),
        vec![
            "This website uses cookies to improve user experience. By using our website \
             you consent to all cookies in accordance with our Cookie Policy."
                .into(),
            link,
        ],
    )
}

/// Build the banner for `manager`'s current preferences.
///
/// Checkboxes publish `CONSENT_UPDATED` on the manager's bus; the accept
/// and decline buttons go through the manager directly and close the
/// dialog.
pub fn cookie_banner(doc: &mut Document, manager: &ConsentManager) -> DomResult<Child> {
    let preferences = manager.preferences();

    let control = create_element(
        doc,
        "button",
        Props::new()
            .with("aria-label", "Cookie settings")
            .with("data-open", "false")
            .on("onClick", |doc, _| {
                if let Err(err) = set_open(doc, true) {
                    tracing::warn!(%err, "cannot open dialog");
                }
            })
            .with(
                "className",
                cn!(
                    "cb-control py-1 px-2 absolute bottom-3 left-3",
                    "bg-background text-foreground",
                    "rounded-lg font-medium cursor-pointer",
                    "ring-2 ring-transparent hover:ring-accent hover:ring-offset-2",
                    "data-[open=false]:inline-block data-[open=true]:hidden",
                    "transition-all duration-200",
                ),
            ),
        vec!["Cookie Settings".into()],
    )?;

    let mut boxes = Vec::with_capacity(COOKIES.len());
    for item in COOKIES {
        let bus = manager.event_bus().clone();
        let id = item.id;
        let mut props = Props::new()
            .with("id", id)
            .with("label", item.name)
            .with("checked", preferences.is_granted(id))
            .on("onChange", move |doc, event| {
                let checked = doc.tree.get_attribute(event.target, "checked") == Some("true");
                bus.publish(ConsentEvent::Updated, ConsentPreferences::from([(id, checked)]));
            });
        if item.required {
            props.insert("disabled", true);
        }
        boxes.push(create_element(doc, component(checkbox), props, vec![])?);
    }
    let list = create_element(
        doc,
        "div",
        Props::new().with("className", "flex flex-col gap-2 mb-4"),
        vec![Child::List(boxes)],
    )?;

    let accepting = manager.clone();
    let accept = create_element(
        doc,
        component(button),
        Props::new()
            .with("aria-label", "Accept all")
            .with("variant", "primary")
            .with("className", "cb-accept flex-1")
            .on("onClick", move |doc, _| {
                let all = accepting.accept_all(accepting.categories());
                close_after(doc, &all);
            }),
        vec!["Accept all".into()],
    )?;

    let declining = manager.clone();
    let decline = create_element(
        doc,
        component(button),
        Props::new()
            .with("aria-label", "Decline all")
            .with("variant", "secondary")
            .with("className", "cb-decline flex-1")
            .on("onClick", move |doc, _| {
                let rejected = declining.reject_all(declining.categories());
                close_after(doc, &rejected);
            }),
        vec!["Decline all".into()],
    )?;
    let actions = create_element(doc, "div", Props::new().with("className", "flex gap-2"), vec![accept, decline])?;

    let gear = create_element(
        doc,
        component(gear_icon),
        Props::new().with(
            "className",
            "w-4 h-4 group-hover:text-accent-dark transition-all duration-150",
        ),
        vec![],
    )?;
    let details = create_element(
        doc,
        "button",
        Props::new().with("aria-label", "Show details").with(
            "className",
            cn!(
                "py-2 px-1 font-medium",
                "text-sm uppercase inline-flex items-center gap-1",
                "text-foreground/80 cursor-pointer",
                "group hover:text-foreground",
                "transition-all duration-150",
            ),
        ),
        vec![gear, "Show Details".into()],
    )?;
    let details = create_element(doc, "div", Props::new().with("className", "text-center"), vec![details])?;
    let footer = create_element(doc, "div", Props::new().with("className", "flex flex-col gap-2"), vec![actions, details])?;

    let description = description(doc)?;
    let dialog = create_element(
        doc,
        component(popup),
        Props::new()
            .with("title", TITLE)
            .with("description", description)
            .on("onClose", |doc, _| {
                if let Err(err) = set_open(doc, false) {
                    tracing::warn!(%err, "cannot close dialog");
                }
            }),
        vec![list, footer],
    )?;

    create_element(doc, Fragment(), Props::new(), vec![control, dialog])
}
