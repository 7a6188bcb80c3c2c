//! `convert` subcommand: PDF in, numbered transcript out.

use std::path::Path;

use pdf2transcript::ExtractOptions;

use crate::shared::open_pdf;

/// Run the convert subcommand.
///
/// Opens the PDF, runs the conversion pipeline, writes the rendered
/// transcript to `output`, and prints a one-line summary to stdout.
pub fn run(file: &Path, output: &Path) -> Result<(), i32> {
    let pdf = open_pdf(file)?;

    let transcript = pdf.to_transcript(&ExtractOptions::default()).map_err(|e| {
        eprintln!("Error: failed to convert PDF: {e}");
        1
    })?;

    std::fs::write(output, transcript.render()).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })?;

    println!(
        "Processed {} text blocks into {} lines ({} tagged 答/问), saved to: {}",
        transcript.block_count(),
        transcript.line_count(),
        transcript.tagged_count(),
        output.display()
    );
    Ok(())
}
