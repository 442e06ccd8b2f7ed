//! Rules command implementation.
//!
//! Lists the ordered weighting rules of each segment.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rwa_config::RwaConfig;
use rwa_core::types::Segment;
use rwa_engine::{RuleBook, RuleSet};

use crate::cli::OutputFormat;
use crate::commands::parse_segment;
use crate::output::{print_header, print_output};

/// Arguments for the rules command.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only show this segment (code or alias, e.g. `souverain`, `tpe`)
    #[arg(short, long, value_parser = parse_segment)]
    pub segment: Option<Segment>,
}

/// One rule line.
#[derive(Debug, Serialize, Tabled)]
struct RuleRow {
    #[tabled(rename = "#")]
    order: usize,
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "When")]
    condition: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

fn rows(set: &RuleSet) -> Vec<RuleRow> {
    set.rules()
        .enumerate()
        .map(|(i, r)| RuleRow {
            order: i + 1,
            rule: r.name.clone(),
            priority: r.priority.to_string(),
            condition: r.condition.to_string(),
            weight: r.weight.to_string(),
        })
        .collect()
}

/// Execute the rules command.
pub fn execute(args: &RulesArgs, config: &RwaConfig, format: OutputFormat) -> Result<()> {
    let book = RuleBook::from_config(config);
    let sets: Vec<&RuleSet> = book
        .iter()
        .filter(|set| args.segment.map_or(true, |s| s == set.segment()))
        .collect();

    match format {
        OutputFormat::Table => {
            for set in sets {
                let segment = set.segment();
                print_header(&format!("{} ({})", segment.name(), segment.code()));
                print_output(&rows(set), format)?;
            }
        }
        OutputFormat::Minimal => {
            for rule in sets.iter().flat_map(|set| set.rules()) {
                println!("{}", rule.name);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => {
            let all: Vec<RuleRow> = sets.into_iter().flat_map(rows).collect();
            print_output(&all, format)?;
        }
    }
    Ok(())
}
