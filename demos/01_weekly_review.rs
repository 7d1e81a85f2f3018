//! Demo 01: Weekly Review
//!
//! Walks through a weekly PARA review: capture items, plan tasks on a
//! project, finish it and archive it.
//!
//! Run with: cargo run --example 01_weekly_review

use eyre::{Result, eyre};
use para::render::Renderer;
use para::{ArtifactKind, Category, ItemStatus, Store};

fn main() -> Result<()> {
    println!("PARA Weekly Review Demo");
    println!("=======================\n");

    let mut store = Store::new();

    // 1. CAPTURE
    println!("1. CAPTURE - Adding items...");
    let site = store
        .add_item("Launch personal site", Category::Projects)
        .ok_or_else(|| eyre!("title was blank"))?;
    store.add_item("Health", Category::Areas);
    store.add_item("Rust reading list", Category::Resources);
    let ignored = store.add_item("   ", Category::Projects);
    println!("   Blank title ignored: {}\n", ignored.is_none());

    // 2. PLAN
    println!("2. PLAN - Adding tasks and artifacts...");
    let mut draft = store.edit(&site).ok_or_else(|| eyre!("item vanished"))?;
    let domain = draft.add_task("Buy domain").ok_or_else(|| eyre!("blank task"))?;
    draft.add_task("Write about page");
    draft.add_artifact(ArtifactKind::Link, "https://example.com/hosting-guide");
    draft.add_artifact(ArtifactKind::Text, "Keep it to one page");
    draft.set_status(ItemStatus::InProgress);
    store.save(draft);
    println!("   Saved.\n");

    // 3. WORK
    println!("3. WORK - Completing a task...");
    let mut draft = store.edit(&site).ok_or_else(|| eyre!("item vanished"))?;
    draft.toggle_task(&domain);
    store.save(draft);

    let renderer = Renderer::default();
    if let Some(item) = store.get(&site) {
        print!("{}", renderer.item(item)?);
    }
    println!();

    // 4. ARCHIVE
    println!("4. ARCHIVE - Finishing and archiving the project...");
    let mut draft = store.edit(&site).ok_or_else(|| eyre!("item vanished"))?;
    draft.set_status(ItemStatus::Completed);
    draft.set_category(Category::Archives);
    store.save(draft);
    println!();

    print!("{}", renderer.board(store.state())?);
    println!("Demo complete!");
    Ok(())
}
