pub mod activities;
pub mod evaluate;
pub mod schema;

use crate::core::TaxpayerInput;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a taxpayer input (JSON) from a file, or stdin with "-", and
/// validate it before it reaches the engine
pub fn read_input(path: &Path) -> anyhow::Result<TaxpayerInput> {
    let input = if path.as_os_str() == "-" {
        read_from_stdin()?
    } else {
        read_from_file(path)?
    };
    input.validate()?;
    Ok(input)
}

fn read_from_file(path: &Path) -> anyhow::Result<TaxpayerInput> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let input = serde_json::from_reader(reader)?;
    Ok(input)
}

fn read_from_stdin() -> anyhow::Result<TaxpayerInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.iter().all(u8::is_ascii_whitespace) {
        anyhow::bail!("No input received. Provide a file or pipe taxpayer JSON to stdin.");
    }

    let input = serde_json::from_slice(&buffer)?;
    Ok(input)
}
