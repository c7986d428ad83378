//! cc-widget - Main Entry Point
//!
//! Mounts the banner into a stand-in host page, replays a short visitor
//! session and prints the resulting markup, preferences and data layer.
//!
//! Usage: `cc-widget [config.json] [storage-file]`

use std::fs;

use anyhow::Context;
use cc_consent::{
    ConsentConfig, ConsentEvent, ConsentManager, ConsentManagerOptions, DataLayer, EventBus,
    Storage,
};
use cc_dom::{Document, HtmlSerializer};
use cc_widget::{categories, mount, toggle_checkbox};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            ConsentConfig::from_json(&json)?
        }
        None => ConsentConfig::default(),
    };
    let storage = match args.next() {
        Some(path) => Storage::local(&path).with_context(|| format!("opening storage {path}"))?,
        None => Storage::session(),
    };

    // Host page with the mount point
    let mut doc = Document::new();
    let app = doc.tree.create_element("div");
    doc.tree.set_attribute(app, "id", &config.mount_id)?;
    let body = doc.body();
    doc.tree.append_child(body, app)?;

    let bus = EventBus::new();
    let _accepted = bus.subscribe(ConsentEvent::AllAccepted, |payload| {
        tracing::info!(?payload, "visitor accepted all cookies");
    });
    let _rejected = bus.subscribe(ConsentEvent::AllRejected, |payload| {
        tracing::info!(?payload, "visitor declined optional cookies");
    });

    let data_layer = DataLayer::new();
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(categories(), bus)
            .with_storage(storage)
            .with_signaler(data_layer.clone())
            .with_config(config),
    );
    mount(&mut doc, &manager)?;

    // Visitor opens the settings, opts into performance, then accepts all
    let control = doc.query_class("cb-control").context("settings control not rendered")?;
    doc.click(control)?;
    toggle_checkbox(&mut doc, "performance")?;
    let accept = doc.query_class("cb-accept").context("accept button not rendered")?;
    doc.click(accept)?;

    println!("{}", HtmlSerializer::new().serialize_inner(&doc.tree, app));
    println!("{}", manager.preferences().to_json()?);
    println!("{}", serde_json::to_string_pretty(&data_layer.entries())?);
    Ok(())
}
