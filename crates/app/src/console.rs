use std::io;

use async_trait::async_trait;
use crossterm::style::{Color, Stylize};
use services::{Console, ConsoleError, Emphasis};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

/// `Console` over the process's stdin/stdout, with optional ANSI colors.
pub struct TerminalConsole<R = BufReader<Stdin>> {
    input: R,
    color: bool,
}

impl TerminalConsole {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self::with_input(BufReader::new(tokio::io::stdin()), color)
    }
}

impl<R> TerminalConsole<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    #[must_use]
    pub fn with_input(input: R, color: bool) -> Self {
        Self { input, color }
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = text.with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }
}

/// Read one line without its `\n` or `\r\n` terminator. `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced, so a garbled line is still a line.
async fn read_reply<R>(input: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

#[async_trait]
impl<R> Console for TerminalConsole<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        let painted = self.paint(prompt, Color::Red, false);
        let mut stdout = tokio::io::stdout();
        stdout.write_all(painted.as_bytes()).await?;
        stdout.flush().await?;

        read_reply(&mut self.input).await?.ok_or(ConsoleError::Closed)
    }

    fn report_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn report_emphasized(&mut self, text: &str, emphasis: Emphasis) {
        let color = match emphasis {
            Emphasis::Success => Color::Green,
            Emphasis::Failure => Color::Red,
            Emphasis::Score => Color::Magenta,
        };
        let banner = format!("  >>> {} <<<", text.to_uppercase());
        println!("{}", self.paint(&banner, color, true));
    }

    fn report_error(&mut self, text: &str) {
        eprintln!("{} {}", self.paint("Error:", Color::Red, true), text);
    }
}
