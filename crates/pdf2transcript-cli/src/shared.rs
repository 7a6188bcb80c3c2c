use std::path::Path;

use pdf2transcript::Pdf;

/// Check that an input file exists, with a user-friendly error message.
///
/// Returns `Err(1)` with the message and a short hint printed to stderr.
pub fn require_input(file: &Path) -> Result<(), i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        eprintln!("Check the path and try again.");
        return Err(1);
    }
    Ok(())
}

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not
/// found or cannot be parsed as a valid PDF.
pub fn open_pdf(file: &Path) -> Result<Pdf, i32> {
    require_input(file)?;
    Pdf::open_file(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}
