use std::io::{BufRead, Write};

use anyhow::Result;
use gg_core::charset::CharSpec;
use gg_core::config::OutputTarget;
use gg_core::error::EngineError;
use gg_core::rounding::RoundMethod;
use gg_render::{AsciiSink, ConsoleSink, HtmlSink};

use crate::engine::Engine;

const PROMPT: &str = ">>> ";
const INCORRECT_COMMAND: &str = "Did not execute due to incorrect command.";
const CHARSET_TOO_SMALL: &str = "Did not execute. Charset too small.";

/// Line-oriented command session driving an [`Engine`].
///
/// Commands: `chars`, `add <spec>`, `remove <spec>`, `res [up|down]`,
/// `round <lower|higher|abs>`, `output <console|html>`, `asciiArt`, `exit`.
/// Bad input reports and continues; the loop never panics.
pub struct Session<W: Write> {
    engine: Engine,
    output: OutputTarget,
    html_path: String,
    font_family: String,
    writer: W,
}

impl<W: Write> Session<W> {
    /// Creates a session writing prompts, replies, and console art to
    /// `writer`.
    pub fn new(
        engine: Engine,
        output: OutputTarget,
        html_path: String,
        font_family: String,
        writer: W,
    ) -> Self {
        Self {
            engine,
            output,
            html_path,
            font_family,
            writer,
        }
    }

    /// Reads commands from `input` until `exit` or end of input.
    ///
    /// # Errors
    /// Returns an error only on writer/reader I/O failure.
    pub fn run_loop(&mut self, input: impl BufRead) -> Result<()> {
        write!(self.writer, "{PROMPT}")?;
        self.writer.flush()?;
        for line in input.lines() {
            if !self.handle_line(&line?)? {
                return Ok(());
            }
            write!(self.writer, "{PROMPT}")?;
            self.writer.flush()?;
        }
        Ok(())
    }

    /// Handles one command line. Returns `false` when the session ends.
    ///
    /// # Errors
    /// Returns an error only on writer I/O failure.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        let mut parts = line.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let arg = parts.next().unwrap_or("");

        match command {
            "exit" => return Ok(false),
            "" => {}
            "chars" => self.print_chars()?,
            "add" => self.add_or_remove(arg, true)?,
            "remove" => self.add_or_remove(arg, false)?,
            "res" => self.change_resolution(arg)?,
            "round" => self.change_round(arg)?,
            "output" => self.change_output(arg)?,
            "asciiArt" => self.ascii_art()?,
            _ => writeln!(self.writer, "{INCORRECT_COMMAND}")?,
        }
        Ok(true)
    }

    fn print_chars(&mut self) -> Result<()> {
        let chars = self.engine.chars();
        let line: Vec<String> = chars.iter().map(char::to_string).collect();
        writeln!(self.writer, "{}", line.join(" "))?;
        Ok(())
    }

    fn add_or_remove(&mut self, arg: &str, add: bool) -> Result<()> {
        let verb = if add { "add" } else { "remove" };
        match arg.parse::<CharSpec>() {
            Ok(spec) => {
                for ch in spec.expand() {
                    if add {
                        self.engine.add_char(ch);
                    } else {
                        self.engine.remove_char(ch);
                    }
                }
            }
            Err(_) => writeln!(self.writer, "Did not {verb} due to incorrect format.")?,
        }
        Ok(())
    }

    fn change_resolution(&mut self, arg: &str) -> Result<()> {
        let target = match arg {
            "" => {
                writeln!(self.writer, "Resolution {}", self.engine.resolution())?;
                return Ok(());
            }
            "up" => self.engine.resolution() * 2,
            "down" => self.engine.resolution() / 2,
            _ => {
                writeln!(
                    self.writer,
                    "Did not change resolution due to incorrect format."
                )?;
                return Ok(());
            }
        };
        match self.engine.set_resolution(target) {
            Ok(()) => writeln!(self.writer, "Resolution set to {target}")?,
            Err(EngineError::ResolutionOutOfRange { .. }) => writeln!(
                self.writer,
                "Did not change resolution due to exceeding boundaries."
            )?,
            Err(err) => writeln!(self.writer, "{err}")?,
        }
        Ok(())
    }

    fn change_round(&mut self, arg: &str) -> Result<()> {
        match arg.parse::<RoundMethod>() {
            Ok(method) => self.engine.set_round_method(method),
            Err(_) => writeln!(
                self.writer,
                "Did not change rounding method due to incorrect format."
            )?,
        }
        Ok(())
    }

    fn change_output(&mut self, arg: &str) -> Result<()> {
        match arg {
            "console" => self.output = OutputTarget::Console,
            "html" => self.output = OutputTarget::Html,
            _ => writeln!(
                self.writer,
                "Did not change output method due to incorrect format."
            )?,
        }
        Ok(())
    }

    fn ascii_art(&mut self) -> Result<()> {
        let art = match self.engine.run() {
            Ok(art) => art,
            Err(EngineError::CharsetTooSmall { .. }) => {
                writeln!(self.writer, "{CHARSET_TOO_SMALL}")?;
                return Ok(());
            }
            Err(err) => {
                writeln!(self.writer, "{err}")?;
                return Ok(());
            }
        };
        match self.output {
            OutputTarget::Console => ConsoleSink::new(&mut self.writer).emit(&art)?,
            OutputTarget::Html => {
                let mut sink = HtmlSink::new(self.html_path.clone(), self.font_family.clone());
                match sink.emit(&art) {
                    Ok(()) => writeln!(self.writer, "Wrote {}", self.html_path)?,
                    Err(err) => writeln!(self.writer, "{err}")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_image::pixel::{PixelGrid, Rgb};
    use gg_match::matcher::CharMatcher;
    use gg_match::raster::BitmapRasterizer;
    use std::sync::Arc;

    fn session(charset: &str, width: u32, height: u32) -> Session<Vec<u8>> {
        let chars: Vec<char> = charset.chars().collect();
        let matcher = CharMatcher::new(&chars, Box::new(BitmapRasterizer)).unwrap();
        let image = Arc::new(PixelGrid::filled(width, height, Rgb::WHITE));
        let engine = Engine::new(image, matcher, 2, RoundMethod::Nearest).unwrap();
        Session::new(
            engine,
            OutputTarget::Console,
            "out.html".to_owned(),
            "Courier New".to_owned(),
            Vec::new(),
        )
    }

    fn replies(session: &mut Session<Vec<u8>>, lines: &[&str]) -> String {
        for line in lines {
            session.handle_line(line).unwrap();
        }
        String::from_utf8(std::mem::take(&mut session.writer)).unwrap()
    }

    #[test]
    fn chars_lists_sorted_set() {
        let mut s = session("91", 8, 8);
        assert_eq!(replies(&mut s, &["chars"]), "1 9\n");
    }

    #[test]
    fn add_range_then_remove_single() {
        let mut s = session("09", 8, 8);
        let out = replies(&mut s, &["add 2-4", "remove 3", "chars"]);
        assert_eq!(out, "0 2 4 9\n");
    }

    #[test]
    fn malformed_specs_report_and_continue() {
        let mut s = session("09", 8, 8);
        let out = replies(&mut s, &["add abc", "remove x--y"]);
        assert!(out.contains("Did not add due to incorrect format."));
        assert!(out.contains("Did not remove due to incorrect format."));
    }

    #[test]
    fn resolution_stepping_and_bounds() {
        // 8×8: min 1, max 8, starting at 2.
        let mut s = session("09", 8, 8);
        let out = replies(&mut s, &["res up", "res up", "res up", "res", "res down"]);
        assert!(out.contains("Resolution set to 4"));
        assert!(out.contains("Resolution set to 8"));
        assert!(out.contains("Did not change resolution due to exceeding boundaries."));
        assert!(out.contains("Resolution 8"));
        assert!(out.contains("Resolution set to 4"));
    }

    #[test]
    fn bad_round_and_output_arguments() {
        let mut s = session("09", 8, 8);
        let out = replies(&mut s, &["round sideways", "output printer"]);
        assert!(out.contains("Did not change rounding method due to incorrect format."));
        assert!(out.contains("Did not change output method due to incorrect format."));
    }

    #[test]
    fn ascii_art_with_tiny_charset_fails_without_output() {
        let mut s = session("09", 8, 8);
        let out = replies(&mut s, &["remove 0", "asciiArt", "chars"]);
        assert!(out.contains("Did not execute. Charset too small."));
        assert!(out.ends_with("9\n"));
    }

    #[test]
    fn ascii_art_prints_a_grid() {
        let mut s = session(" @", 8, 8);
        let out = replies(&mut s, &["asciiArt"]);
        // A white image is maximal brightness, which matches the char with
        // the highest ink fraction.
        assert_eq!(out, "@@\n@@\n");
    }

    #[test]
    fn unknown_command_reports() {
        let mut s = session("09", 8, 8);
        let out = replies(&mut s, &["frobnicate"]);
        assert_eq!(out, "Did not execute due to incorrect command.\n");
    }

    #[test]
    fn exit_stops_the_session() {
        let mut s = session("09", 8, 8);
        assert!(!s.handle_line("exit").unwrap());
        assert!(s.handle_line("chars").unwrap());
    }
}
