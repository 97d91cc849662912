//! roster-bake — bake a members JSON file into an importable data module.
//!
//! Usage: roster-bake [members.json] [members_data.rs]

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "members.json".to_string());
    let output = args.next().unwrap_or_else(|| "members_data.rs".to_string());

    let json = std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
    let module =
        roster_core::bake::bake_module(&json).with_context(|| format!("baking {input}"))?;
    std::fs::write(&output, module).with_context(|| format!("writing {output}"))?;

    tracing::info!("baked {} into {}", input, output);
    println!("{output} created successfully");
    Ok(())
}
