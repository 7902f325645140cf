use crate::error::{console_error, AppResult};
use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Line-oriented terminal the workflow talks to
#[async_trait]
pub trait Console: Send {
    /// Print one line for the user
    async fn say(&mut self, line: &str) -> AppResult<()>;

    /// Show `prompt` and read one line of input, without the line ending
    async fn read_line(&mut self, prompt: &str) -> AppResult<String>;
}

/// Console backed by the process stdin/stdout
pub struct StdConsole {
    stdin: BufReader<Stdin>,
    stdout: Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(io::stdin()),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn say(&mut self, line: &str) -> AppResult<()> {
        self.stdout.write_all(line.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        self.stdout.write_all(prompt.as_bytes()).await?;
        self.stdout.flush().await?;

        let mut line = String::new();
        let read = self.stdin.read_line(&mut line).await?;
        if read == 0 {
            return Err(console_error("Standard input closed while waiting for an answer"));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Empty input or `y`/`Y` counts as yes; anything else declines
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case("y")
}

/// Ask once whether `count` events may be removed
pub async fn confirm<C: Console + ?Sized>(console: &mut C, count: usize) -> AppResult<bool> {
    let prompt = format!(
        "{} events will be removed. Do you want to continue (Y/n)? ",
        count
    );
    let answer = console.read_line(&prompt).await?;
    Ok(is_affirmative(&answer))
}
