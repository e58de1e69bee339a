//! Embedded shell panel
//!
//! Each run action spawns one external process and streams its combined
//! stdout/stderr into a growing in-memory log. The command string goes to
//! the platform shell verbatim: no quoting, no sanitization, no sandbox.
//! Anything typed here runs with the full privileges of this process.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// The shell panel: input line, output log, and the running child
pub struct ShellPanel {
    /// Accumulated output lines; grows without bound
    log: Vec<String>,
    /// Current input line
    input: String,
    /// Receives merged output lines from the reader threads
    rx: Option<Receiver<String>>,
    /// The child of the most recent run, while it lives
    child: Option<Child>,
}

impl ShellPanel {
    /// Create an empty panel
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            input: String::new(),
            rx: None,
            child: None,
        }
    }

    /// The output log
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The current input line
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Append a character to the input line
    pub fn input_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Delete the last character of the input line
    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Check whether a child from a previous run is still alive
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(Some(_)) => {
                    self.child = None;
                    false
                }
                Ok(None) => true,
                Err(_) => false,
            },
            None => false,
        }
    }

    /// Run the current input line
    ///
    /// The command is echoed to the log and handed verbatim to the
    /// platform shell. While a previous command is still running the
    /// input is echoed but no second process starts. Spawn failure is
    /// not surfaced.
    pub fn run(&mut self) {
        let command = std::mem::take(&mut self.input);
        if command.is_empty() {
            return;
        }
        self.log.push(format!("\u{279c} {}", command));

        if self.is_running() {
            return;
        }
        // Flush anything still queued from the previous command before its
        // receiver is replaced
        self.poll_output();
        self.spawn(&command);
    }

    fn spawn(&mut self, command: &str) {
        #[cfg(windows)]
        let spawned = Command::new("cmd")
            .args(["/C", command])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        #[cfg(not(windows))]
        let spawned = Command::new("sh")
            .args(["-c", command])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(_) => return,
        };

        let (tx, rx) = mpsc::channel();

        if let Some(stdout) = child.stdout.take() {
            let tx = tx.clone();
            thread::spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            });
        }

        if let Some(stderr) = child.stderr.take() {
            thread::spawn(move || {
                for line in BufReader::new(stderr).lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            });
        }

        self.rx = Some(rx);
        self.child = Some(child);
    }

    /// Drain any output that has arrived since the last poll
    ///
    /// Appends unconditionally to the log. Returns true if new lines
    /// arrived.
    pub fn poll_output(&mut self) -> bool {
        let mut got_any = false;
        let mut finished = false;

        if let Some(rx) = &self.rx {
            loop {
                match rx.try_recv() {
                    Ok(line) => {
                        self.log.push(line);
                        got_any = true;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        finished = true;
                        break;
                    }
                }
            }
        }

        if finished {
            self.rx = None;
            self.is_running();
        }

        got_any
    }
}

impl Default for ShellPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ShellPanel {
    fn drop(&mut self) {
        // Best-effort terminate at shutdown; no escalation, no wait
        if let Some(child) = self.child.as_mut() {
            let _ = child.kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn drain_until(panel: &mut ShellPanel, needle: &str) -> bool {
        for _ in 0..100 {
            panel.poll_output();
            if panel.log().iter().any(|l| l.contains(needle)) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }

    #[test]
    fn test_input_editing() {
        let mut panel = ShellPanel::new();
        panel.input_char('l');
        panel.input_char('s');
        assert_eq!(panel.input(), "ls");
        panel.input_backspace();
        assert_eq!(panel.input(), "l");
    }

    #[test]
    fn test_empty_input_runs_nothing() {
        let mut panel = ShellPanel::new();
        panel.run();
        assert!(panel.log().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_echoes_and_streams_output() {
        let mut panel = ShellPanel::new();
        for ch in "printf 'out\\n'".chars() {
            panel.input_char(ch);
        }
        panel.run();
        assert_eq!(panel.input(), "");
        assert!(panel.log()[0].starts_with('\u{279c}'));
        assert!(drain_until(&mut panel, "out"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_is_merged() {
        let mut panel = ShellPanel::new();
        for ch in "printf 'oops\\n' 1>&2".chars() {
            panel.input_char(ch);
        }
        panel.run();
        assert!(drain_until(&mut panel, "oops"));
    }

    #[cfg(unix)]
    #[test]
    fn test_second_run_while_busy_only_echoes() {
        let mut panel = ShellPanel::new();
        for ch in "sleep 5".chars() {
            panel.input_char(ch);
        }
        panel.run();
        assert!(panel.is_running());

        for ch in "echo nope".chars() {
            panel.input_char(ch);
        }
        panel.run();
        // Echoed but never executed
        assert_eq!(panel.log().len(), 2);
        panel.poll_output();
        assert!(panel.log().iter().all(|l| !l.contains("nope") || l.starts_with('\u{279c}')));
        // Drop kills the sleeping child
    }

    #[test]
    fn test_spawn_failure_is_silent() {
        let mut panel = ShellPanel::new();
        // Force the run path with a command; even if the shell itself is
        // missing the panel must not panic or log an error line
        for ch in "true".chars() {
            panel.input_char(ch);
        }
        panel.run();
        assert_eq!(panel.log().len(), 1);
    }
}
