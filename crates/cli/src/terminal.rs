use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use manualqa_index::{IndexMeta, ScoredChunk};
use manualqa_rag::Transcript;

use crate::status::SourceChanges;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const USER_PROMPT: Color = Color::Green;
    const ASSISTANT_TEXT: Color = Color::Cyan;
    const SOURCE: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
    const HEADER: Color = Color::Magenta;
}

/// Manages terminal I/O for the interactive REPL.
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }

    /// Print the startup banner.
    pub fn print_banner(&self, chunks: usize, model: &str, k: usize) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print("manualqa"),
            ResetColor,
            Print(" - Ask your service manuals\n"),
            SetForegroundColor(Colors::DIM),
            Print(format!("Index: {} chunks | Model: {} | k = {}\n", chunks, model, k)),
            Print("Commands: ':k N' sets passages per question, ':history' shows the transcript, 'exit' quits.\n"),
            Print("---\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Read a line of user input with prompt. Returns None at end of input.
    pub fn read_input(&self) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Colors::USER_PROMPT),
            Print("you> "),
            ResetColor,
        )?;
        stdout.flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input))
    }

    /// Print an answer followed by the passages it drew on.
    pub fn print_answer(&self, text: &str, sources: &[ScoredChunk]) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::ASSISTANT_TEXT),
            Print(format!("{}\n", text)),
            ResetColor,
        )?;
        if !sources.is_empty() {
            let cited: Vec<String> = sources
                .iter()
                .map(|s| format!("{} ({:.2})", s.chunk.citation(), s.score))
                .collect();
            execute!(
                stdout,
                SetForegroundColor(Colors::SOURCE),
                Print(format!("  sources: {}\n", cited.join(", "))),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Print every turn, oldest first.
    pub fn print_transcript(&self, transcript: &Transcript) -> Result<()> {
        let mut stdout = io::stdout();
        if transcript.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print("No questions asked yet.\n"),
                ResetColor,
            )?;
            return Ok(());
        }

        for (i, turn) in transcript.turns().iter().enumerate() {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!(
                    "[{}] {} k={}\n",
                    i + 1,
                    turn.asked_at.format("%H:%M:%S"),
                    turn.k
                )),
                SetForegroundColor(Colors::USER_PROMPT),
                Print(format!("You: {}\n", turn.question)),
                SetForegroundColor(Colors::ASSISTANT_TEXT),
                Print(format!("Assistant: {}\n", turn.answer)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Print index metadata and drift of the manual directory.
    pub fn print_status(&self, meta: &IndexMeta, changes: &SourceChanges) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print("Index\n"),
            ResetColor,
            Print(format!(
                "  built:      {}\n  model:      {} ({} dims)\n  chunks:     {} (size {}, overlap {})\n",
                meta.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                meta.model,
                meta.dimensions,
                meta.entry_count,
                meta.chunk_size,
                meta.chunk_overlap
            )),
            SetForegroundColor(Colors::HEADER),
            Print("Manuals\n"),
            ResetColor,
        )?;
        for m in &meta.manuals {
            execute!(
                stdout,
                Print(format!(
                    "  {:<40} {:>4} pages {:>5} chunks  {}\n",
                    m.path.display(),
                    m.pages,
                    m.chunks,
                    short_hash(&m.sha256)
                )),
            )?;
        }

        if changes.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print("Manual directory unchanged since the index was built.\n"),
                ResetColor,
            )?;
        } else {
            let lines = changes
                .added
                .iter()
                .map(|p| format!("  added:    {}\n", p.display()))
                .chain(changes.removed.iter().map(|p| format!("  removed:  {}\n", p.display())))
                .chain(changes.changed.iter().map(|p| format!("  changed:  {}\n", p.display())));
            execute!(
                stdout,
                SetForegroundColor(Colors::SOURCE),
                Print("Manual directory changed since the index was built (delete the index directory to rebuild):\n"),
                ResetColor,
            )?;
            for line in lines {
                execute!(stdout, Print(line))?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    /// Show a spinner/waiting indicator. Returns a handle to stop it.
    pub fn start_spinner(&self, message: &str) -> Result<SpinnerHandle> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{} ", message)),
            ResetColor,
        )?;
        stdout.flush()?;

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = std::thread::spawn(move || {
            let frames = ['|', '/', '-', '\\'];
            let mut i = 0;
            while running_clone.load(Ordering::SeqCst) {
                let mut stdout = io::stdout();
                execute!(
                    stdout,
                    SetForegroundColor(Colors::DIM),
                    Print(format!("\r{} ", frames[i % frames.len()])),
                    ResetColor,
                )
                .ok();
                stdout.flush().ok();
                i += 1;
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            let mut stdout = io::stdout();
            execute!(stdout, Print("\r  \r")).ok();
            stdout.flush().ok();
        });

        Ok(SpinnerHandle {
            running,
            thread: Some(handle),
        })
    }

    /// Print an error message.
    pub fn print_error(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::ERROR),
            Print(format!("Error: {}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print an info message.
    pub fn print_info(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// First 12 characters of a digest for display.
fn short_hash(hash: &str) -> String {
    hash.chars().take(12).collect()
}

/// Handle to a running spinner. Drop or call stop() to terminate it.
pub struct SpinnerHandle {
    running: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl SpinnerHandle {
    /// Stop the spinner and wait until its line is cleared.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        self.halt();
    }
}
