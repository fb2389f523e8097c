/// Output sinks for finished character grids.
///
/// The engine has no opinion on formatting; sinks consume a `Vec<Vec<char>>`
/// and write it somewhere.
pub mod console;
pub mod html;

pub use console::ConsoleSink;
pub use html::HtmlSink;

/// Consumes a finished character grid.
pub trait AsciiSink {
    /// Write the grid to the sink's target.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    fn emit(&mut self, art: &[Vec<char>]) -> anyhow::Result<()>;
}
