use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info};

use huffman_coding::{Artifact, HuffmanError, decode};

/// Restores a text file from a Huffman-compressed artifact.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Compressed artifact to read
    input: PathBuf,

    /// Where to write the decoded text
    output: PathBuf,
}

fn run(args: &Args) -> Result<(), HuffmanError> {
    info!("--- Start Decoding ---");
    let start_time = Instant::now();

    let content = fs::read(&args.input)?;
    debug!("Total file size: {} bytes", content.len());

    let artifact = Artifact::from_bytes(&content)?;
    let text = decode(&artifact)?;

    info!("Writing decoded output to file: {}", args.output.display());
    fs::write(&args.output, text.as_bytes())?;
    debug!("Decoding finished in {:.2?}.", start_time.elapsed());

    println!(
        "✅ Decoding successful.\n\
         📂  Input:  {} ({} bytes)\n\
         💾  Output: {} ({} characters, {} bytes)",
        args.input.display(),
        content.len(),
        args.output.display(),
        text.chars().count(),
        text.len()
    );
    info!("--- End ---");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Decoding failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
