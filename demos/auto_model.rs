//! Default Model Generation Example
//!
//! Builds a small two-task dataset in memory and prints the generated
//! stats models as JSON.
//!
//! Run with: RUST_LOG=debug cargo run --example auto_model

use bids_automodel::dataset::{MemoryDataset, RunNode};
use bids_automodel::AutoModel;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== bids-automodel: Default Stats Models ===\n");

    // -------------------------------------------------------------------------
    // 1. Index a dataset: 2 subjects x 2 sessions, tasks "stopsignal" and "nback"
    // -------------------------------------------------------------------------
    let mut dataset = MemoryDataset::new("ds000030");
    for subject in ["01", "02"] {
        for session in ["pre", "post"] {
            dataset.add_run(
                RunNode::builder("stopsignal")
                    .subject(subject)
                    .session(session)
                    .run("1")
                    .trial_types(&["go", "successful_stop", "unsuccessful_stop", "go"])
                    .build()?,
            );
            dataset.add_run(
                RunNode::builder("nback")
                    .subject(subject)
                    .session(session)
                    .run("1")
                    .duration(420.0)
                    .trial_types(&["0back", "2back"])
                    .build()?,
            );
        }
    }
    println!("Indexed {} runs\n", dataset.len());

    // -------------------------------------------------------------------------
    // 2. Generate models. Stop-signal runs carry no duration, so fall back to
    //    an explicit scan length.
    // -------------------------------------------------------------------------
    let config = AutoModel::builder()
        .scan_length(360.0)
        .one_vs_rest(true)
        .build();
    let models = config.build_models(&dataset)?;

    for model in &models {
        let levels: Vec<_> = model.nodes().iter().map(|n| n.level().as_str()).collect();
        println!("{}: {}", model.name(), levels.join(" -> "));
    }

    // -------------------------------------------------------------------------
    // 3. Emit the documents
    // -------------------------------------------------------------------------
    for model in &models {
        println!("\n{}", model.to_json_pretty()?);
    }

    Ok(())
}
