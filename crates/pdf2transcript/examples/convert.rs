//! Convert a PDF into a numbered transcript and print it.
//!
//! Usage: cargo run --example convert -- path/to/interview.pdf

use pdf2transcript::{ExtractOptions, Pdf, TranscriptError};

fn main() -> Result<(), TranscriptError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "interview.pdf".to_string());

    let pdf = Pdf::open_file(&path)?;
    let transcript = pdf.to_transcript(&ExtractOptions::default())?;

    print!("{}", transcript.render());
    eprintln!(
        "{} blocks, {} lines, {} tagged",
        transcript.block_count(),
        transcript.line_count(),
        transcript.tagged_count()
    );
    Ok(())
}
