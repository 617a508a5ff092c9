//! Schema command - print expected input and result formats

use crate::core::{
    InputField, PropertyTransferInput, TaxCalculationResult, TaxpayerInput, TurnoverInput,
};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, result-schema or fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the taxpayer input
    JsonSchema,
    /// JSON Schema for the evaluation result
    ResultSchema,
    /// Input field descriptions
    Fields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(TaxpayerInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::ResultSchema => {
                let schema = schema_for!(TaxCalculationResult);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Fields => self.print_fields(),
        }
        Ok(())
    }

    fn print_fields(&self) {
        println!("Taxpayer Input Format");
        println!("=====================");
        print_section(None, TaxpayerInput::field_catalog());
        print_section(Some("turnover"), TurnoverInput::field_catalog());
        print_section(Some("property_transfer"), PropertyTransferInput::field_catalog());
        println!();
        println!("Amounts are AZN and may be JSON numbers or strings.");
        println!("Ratios are fractions between 0 and 1 (0.30 = 30%).");
    }
}

fn print_section(prefix: Option<&str>, fields: &[InputField]) {
    println!();
    if let Some(prefix) = prefix {
        println!("{}:", prefix);
    }
    for field in fields {
        let req = if field.required { "required" } else { "optional" };
        let name = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field.name),
            None => field.name.to_string(),
        };
        println!("{:45} ({:8})  {}", name, req, field.description);
    }
}
