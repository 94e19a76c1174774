//! Replays the portfolio fixture with debug logging and prints what each element ended up with.

use motionbind::{Script, Settings, replay};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/portfolio.json");
    let script = Script::from_path(&path)?;
    let report = replay(&script, Settings::default())?;

    for (element, props) in &report.final_props {
        let name = script
            .elements
            .iter()
            .find(|e| e.id == *element)
            .and_then(|e| e.name.as_deref())
            .unwrap_or("?");
        println!("{element} {name}: {}", serde_json::to_string(props)?);
    }
    for b in &report.bindings {
        println!(
            "binding {}: {:?}{}",
            b.id.0,
            b.state,
            b.error.as_deref().map(|e| format!(" ({e})")).unwrap_or_default()
        );
    }
    println!(
        "{} writes, {} subscriptions left",
        report.writes.len(),
        report.active_subscriptions
    );
    Ok(())
}
