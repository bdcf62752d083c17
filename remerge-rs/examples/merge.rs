//! Example: merge user edits onto freshly regenerated content
//!
//! Takes three text files (baseline, observed, proposed) and prints the
//! merged result to stdout.
//!
//! Usage: cargo run --example merge <baseline> <observed> <proposed>

use std::env;
use std::fs;

use remerge::{merge, LineSequence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        eprintln!("Usage: {} <baseline> <observed> <proposed>", args[0]);
        std::process::exit(1);
    }

    let read = |path: &str| -> Result<LineSequence, Box<dyn std::error::Error>> {
        Ok(LineSequence::from_bytes(&fs::read(path)?)?)
    };

    eprintln!("Merging {} + {} onto {}", args[2], args[3], args[1]);
    let outcome = merge(Some(read(&args[1])?), Some(read(&args[2])?), read(&args[3])?)?;

    print!("{}", outcome.merged.to_text());
    eprintln!("Merge completed successfully!");
    Ok(())
}
