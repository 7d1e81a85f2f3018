//! Demo 02: Filtering
//!
//! Shows how to query a category with indexed-field filters.
//!
//! Run with: cargo run --example 02_filtering

use eyre::Result;
use para::{Category, Filter, FilterOp, IndexValue, ItemStatus, Store};

fn main() -> Result<()> {
    println!("PARA Filtering Demo");
    println!("===================\n");

    let mut store = Store::new();
    for (title, status, tasks) in [
        ("Garden redesign", ItemStatus::Ready, 3),
        ("Car service", ItemStatus::Backlog, 1),
        ("Conference talk", ItemStatus::InProgress, 4),
        ("Garden shed", ItemStatus::Backlog, 0),
    ] {
        let Some(mut draft) = store.add_item(title, Category::Projects).and_then(|id| store.edit(&id)) else {
            continue;
        };
        draft.set_status(status);
        for n in 1..=tasks {
            draft.add_task(&format!("step {}", n));
        }
        store.save(draft);
    }

    let queries: Vec<(&str, Vec<Filter>)> = vec![
        ("status = backlog", vec!["status=backlog".parse()?]),
        (
            "open_tasks >= 3",
            vec![Filter::new("open_tasks", FilterOp::Gte, IndexValue::Int(3))],
        ),
        ("title ~ garden, status != ready", vec!["title~garden".parse()?, "status!=ready".parse()?]),
    ];

    for (label, filters) in queries {
        println!("Query: {}", label);
        for item in store.list_filtered(Category::Projects, &filters) {
            println!("   - {} [{}] {} open tasks", item.title, item.status, item.open_tasks());
        }
        println!();
    }

    println!("Demo complete!");
    Ok(())
}
