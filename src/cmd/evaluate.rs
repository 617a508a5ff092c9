//! Evaluate command - eligibility determination and simplified tax due

use super::read_input;
use crate::core::{Determination, TaxCalculationResult, TraceEntry};
use crate::tax::evaluate;
use clap::Args;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct EvaluateCommand {
    /// JSON file containing the taxpayer input (use "-" for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Record every rule evaluated in an audit trace
    #[arg(short, long)]
    trace: bool,

    /// Output the full result as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output the audit trace as CSV (implies --trace)
    #[arg(long)]
    csv: bool,
}

impl EvaluateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_input(&self.input)?;
        let result = evaluate(&input, self.trace || self.csv);
        log::debug!(
            "{}: eligible = {}",
            self.input.display(),
            result.is_eligible()
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if self.csv {
            write_trace_csv(result.trace().entries().unwrap_or_default())?;
        } else {
            print_result(&result);
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct BasisRow {
    #[tabled(rename = "Article")]
    article: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled, Serialize)]
struct TraceRow {
    #[tabled(rename = "#")]
    step: usize,
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Article")]
    article: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl TraceRow {
    fn new(step: usize, entry: &TraceEntry) -> Self {
        TraceRow {
            step,
            rule: entry.rule.to_string(),
            result: if entry.passed { "pass" } else { "fail" }.to_string(),
            article: entry.article.to_string(),
            details: entry.details.clone(),
        }
    }
}

fn print_result(result: &TaxCalculationResult) {
    match result.determination() {
        Determination::Eligible(assessment) => {
            println!("SIMPLIFIED TAX: ELIGIBLE");
            println!("════════════════════════");
            println!();
            println!("Route:       {}", assessment.route);
            println!(
                "Tax base:    {}",
                format_amount(assessment.tax_base, result.currency())
            );
            if let Some(rate) = assessment.tax_rate {
                let label = if assessment.route.is_automatic() {
                    "Coefficient:"
                } else {
                    "Rate:       "
                };
                println!("{} {}", label, rate.normalize());
            }
            println!(
                "Tax due:     {}",
                format_amount(assessment.tax_amount, result.currency())
            );
            if !assessment.exemptions_applied.is_empty() {
                println!();
                println!("Exemptions applied:");
                for exemption in &assessment.exemptions_applied {
                    println!("  - {}", exemption);
                }
            }
        }
        Determination::Ineligible(disqualification) => {
            println!("SIMPLIFIED TAX: NOT ELIGIBLE");
            println!("════════════════════════════");
            println!();
            println!("Reason:      {}", disqualification.reason_code);
            println!("             {}", disqualification.reason_description);
        }
    }

    if !result.legal_basis().is_empty() {
        let rows: Vec<BasisRow> = result
            .legal_basis()
            .iter()
            .map(|lb| BasisRow {
                article: lb.article.clone(),
                description: lb.description.clone(),
            })
            .collect();
        println!();
        println!("Legal basis:");
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    if let Some(entries) = result.trace().entries() {
        let rows: Vec<TraceRow> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| TraceRow::new(i + 1, entry))
            .collect();
        println!();
        println!("Audit trace:");
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
            .to_string();
        println!("{}", table);
    }
}

fn format_amount(amount: Option<Decimal>, currency: &str) -> String {
    match amount {
        Some(amount) => format!(
            "{:.2} {}",
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            currency
        ),
        None => "not computed (more input required)".to_string(),
    }
}

fn write_trace_csv(entries: &[TraceEntry]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for (i, entry) in entries.iter().enumerate() {
        wtr.serialize(TraceRow::new(i + 1, entry))?;
    }
    wtr.flush()?;
    Ok(())
}
