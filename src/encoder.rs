use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info};

use huffman_coding::stats::code_listing;
use huffman_coding::{CompressionStats, HuffmanError, encode};

/// Compresses a UTF-8 text file with Huffman coding.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text file to compress
    input: PathBuf,

    /// Where to write the compressed artifact
    #[arg(default_value = "output.huff")]
    output: PathBuf,

    /// Print the code table (symbol -> code)
    #[arg(long)]
    show_codes: bool,
}

fn run(args: &Args) -> Result<(), HuffmanError> {
    info!("Encoding {}", args.input.display());
    let start_time = Instant::now();

    let text = String::from_utf8(fs::read(&args.input)?)?;
    let artifact = encode(&text)?;
    let bytes = artifact.to_bytes();
    fs::write(&args.output, &bytes)?;

    debug!("Encoding finished in {:.2?}.", start_time.elapsed());

    let stats = CompressionStats::new(&text, &artifact);
    println!(
        "✅ Encoding successful.\n\
         📂  Input:  {}\n\
         💾  Output: {}\n\
         {}",
        args.input.display(),
        args.output.display(),
        stats
    );

    if args.show_codes {
        println!("Code table (symbol -> code):");
        for (symbol, code) in code_listing(&artifact) {
            println!("{:?} -> {}", symbol, code);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Encoding failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
