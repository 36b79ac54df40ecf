// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use peer_cascade::config::{load_and_validate_config, RuntimeBuilder};
use peer_cascade::engine::{LifecycleOperation, LifecycleReport};
use peer_cascade::events::{parse_event, EmbeddingEvent, EventEnvelope, RegistrationEvent};
use peer_cascade::observability::init_tracing;

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <config.(yaml|toml)> <register|embed> <event.json>\n\
         Example: {program} configs/fleet.yaml register configs/events/register.json"
    )
}

fn parse_operation(name: &str) -> Result<LifecycleOperation> {
    match name {
        "register" | "register-yourself" => Ok(LifecycleOperation::Register),
        "embed" | "embed-yourself" => Ok(LifecycleOperation::Embed),
        other => bail!("Unknown operation '{other}', expected 'register' or 'embed'"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("{}", usage(&args[0]));
        std::process::exit(1);
    }
    let (config_file, operation, event_file) = (&args[1], parse_operation(&args[2])?, &args[3]);

    let start_time = Instant::now();
    let config = load_and_validate_config(config_file)?;
    let runtime = RuntimeBuilder::from_config(&config);

    let body = std::fs::read_to_string(event_file)
        .with_context(|| format!("Failed to read event file '{event_file}'"))?;

    println!("📋 Configuration: {config_file}");
    println!("🛡️  Settle Policy: {:?}", config.settle_policy);
    println!("📨 Event: {operation} ({event_file})");

    let report = match operation {
        LifecycleOperation::Register => {
            let EventEnvelope { correlation, event } = parse_event::<RegistrationEvent>(&body)?;
            println!("🔗 Correlation: {} / trace {}", correlation.correlation_id, correlation.trace_indicator);
            runtime.coordinator.register_yourself(&event, &correlation).await?
        }
        LifecycleOperation::Embed => {
            let EventEnvelope { correlation, event } = parse_event::<EmbeddingEvent>(&body)?;
            println!("🔗 Correlation: {} / trace {}", correlation.correlation_id, correlation.trace_indicator);
            runtime.coordinator.embed_yourself(&event, &correlation).await?
        }
    };

    print_report(&report);
    println!("\n🗄️  Store writes: {}", runtime.store.write_count());
    println!("⏱️  Total Time (including config load): {:?}", start_time.elapsed());

    Ok(())
}

fn print_report(report: &LifecycleReport) {
    println!("\n🔄 Reconciliation:");
    for outcome in &report.outcomes {
        if !outcome.is_resolved() {
            println!("  • {}: not configured, skipped", outcome.stack_name);
            continue;
        }
        println!(
            "  • {}: {} endpoint(s) changed, {} failure(s)",
            outcome.stack_name,
            outcome.change_set.len(),
            outcome.failures.len()
        );
        for (endpoint, changes) in outcome.change_set.iter() {
            for change in changes {
                println!("      {endpoint} {} → {}", change.attribute, change.current);
            }
        }
        for failure in &outcome.failures {
            println!("      ❌ {failure}");
        }
    }

    println!("\n📊 Plan: {} step(s)", report.plan.len());
    for (step, outcome) in report.plan.steps().iter().zip(&report.cascade.steps) {
        println!(
            "  {}. [{}] {} via {} ({:?})",
            outcome.position,
            outcome.trace_indicator,
            step.group,
            step.forwarding_name,
            outcome.status
        );
        for target in &outcome.targets {
            match &target.result {
                Ok(result) => println!("      → {}: {}", target.target, result.status),
                Err(e) => println!("      → {}: {e}", target.target),
            }
        }
        for error in &outcome.errors {
            println!("      ❌ {error}");
        }
    }

    println!("\n🎯 Cascade: {}", report.cascade.state);
}
