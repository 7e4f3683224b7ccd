//! Tabset demo
//!
//! Replays the availability-toggling and removal scenarios against one
//! widget instance and prints the rendered widget after each step.

use anyhow::{Context, Result};

use tabset_core::{RepeatItem, SharedTabset, TabsetConfig, TabsetSurface, TabsetTemplate};

const TEMPLATE: &str = include_str!("../tabset.json");

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            TabsetConfig::load(&path).with_context(|| format!("loading config {}", path))?
        }
        None => TabsetConfig::default(),
    };

    tabset_core::init_logging(&config.log_filter);

    let template = TabsetTemplate::from_json(TEMPLATE).context("parsing tabset template")?;
    let entries = template.entries.len();
    let mut surface = TabsetSurface::new(template, &config)?;

    for entry in 0..entries {
        surface.on_select(entry, move |tab_id| {
            tracing::info!(entry, tab_id = %tab_id, "Tab selected");
        });
    }

    let widget = SharedTabset::new(surface);

    widget.with(|s| {
        s.set_collection(
            "tabs",
            vec![
                RepeatItem::new("t1", "Title 1"),
                RepeatItem::new("t2", "Title 2"),
                RepeatItem::new("t3", "Title 3"),
            ],
        )
    })?;
    print_titles(&widget, "initial");

    for (index, available) in [(1, false), (0, false), (2, false), (0, true), (1, true), (2, true)] {
        widget.with(|s| {
            s.update_collection("tabs", |items| items[index].available = available)
        })?;
        print_titles(&widget, &format!("tabs[{}].available = {}", index, available));
    }

    // Select the last repeated tab, then drop it from the collection
    widget.click(7);
    widget.with(|s| s.update_collection("tabs", |items| items[2].available = false))?;
    print_titles(&widget, "active tab removed");

    let rendered = widget.render();
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    Ok(())
}

fn print_titles(widget: &SharedTabset, step: &str) {
    let (titles, active) = widget.with(|s| {
        let active = s.registry().active_tab().map(|t| t.title());
        (s.titles(), active)
    });
    println!(
        "{:<28} {:?} active={}",
        step,
        titles,
        active.as_deref().unwrap_or("-")
    );
}
