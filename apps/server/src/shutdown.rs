// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process shutdown signals.
//!
//! The server stops as soon as its [`ShutdownSignal`] resolves. In-flight
//! requests are dropped, not drained.

use async_trait::async_trait;
use std::io::{BufRead, BufReader, Stdin, Stdout, Write};
use tokio::sync::oneshot;

/// Console prompt written before every command read.
pub const PROMPT: &str = "Stop to shutdown the server: ";

/// Something that eventually tells the process to stop.
#[async_trait]
pub trait ShutdownSignal: Send {
    /// Resolve when the process should stop.
    async fn wait(&mut self);
}

/// Line-oriented operator console; the `stop` command shuts down.
///
/// Commands are read on a dedicated OS thread. A blocked read never holds
/// up process exit when another signal wins.
#[derive(Debug)]
pub struct ConsoleShutdown<R, W> {
    io: Option<(R, W)>,
}

impl ConsoleShutdown<BufReader<Stdin>, Stdout> {
    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R, W> ConsoleShutdown<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Some((reader, writer)),
        }
    }
}

#[async_trait]
impl<R, W> ShutdownSignal for ConsoleShutdown<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    async fn wait(&mut self) {
        if let Some((reader, writer)) = self.io.take() {
            let (tx, rx) = oneshot::channel();
            let spawned = std::thread::Builder::new()
                .name("console".into())
                .spawn(move || {
                    let _ = tx.send(read_commands(reader, writer));
                });

            match spawned {
                Err(e) => tracing::warn!(error = %e, "console thread failed to start"),
                Ok(_) => match rx.await {
                    Ok(Ok(true)) => return,
                    Ok(Ok(false)) => tracing::info!("stdin closed, console shutdown disabled"),
                    Ok(Err(e)) => {
                        tracing::warn!(error = %e, "stdin unreadable, console shutdown disabled")
                    }
                    Err(_) => tracing::warn!("console thread exited unexpectedly"),
                },
            }
        }
        std::future::pending::<()>().await;
    }
}

/// SIGINT / Ctrl+C.
#[derive(Debug, Default)]
pub struct CtrlC;

#[async_trait]
impl ShutdownSignal for CtrlC {
    async fn wait(&mut self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C"),
            Err(e) => {
                tracing::warn!(error = %e, "Ctrl+C handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Resolves when either signal does.
#[derive(Debug)]
pub struct AnyOf<A, B> {
    first: A,
    second: B,
}

impl<A, B> AnyOf<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

#[async_trait]
impl<A, B> ShutdownSignal for AnyOf<A, B>
where
    A: ShutdownSignal,
    B: ShutdownSignal,
{
    async fn wait(&mut self) {
        tokio::select! {
            _ = self.first.wait() => {}
            _ = self.second.wait() => {}
        }
    }
}

/// Read operator commands until `stop` or end of input.
///
/// Returns `true` when `stop` was entered and `false` on end of input.
/// Any other command is reported as invalid and the prompt is repeated.
pub fn read_commands<R, W>(reader: R, mut writer: W) -> std::io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    let mut lines = reader.lines();
    loop {
        writer.write_all(PROMPT.as_bytes())?;
        writer.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(false);
        };

        let command = line.trim();
        if command == "stop" {
            writeln!(writer, "Shutting down the server")?;
            writer.flush()?;
            return Ok(true);
        }

        writeln!(writer, "Invalid command: {}", command)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let stopped = read_commands(input.as_bytes(), &mut output).unwrap();
        (stopped, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_stop_ends_loop() {
        let (stopped, output) = run("stop\n");
        assert!(stopped);
        assert_eq!(output, format!("{PROMPT}Shutting down the server\n"));
    }

    #[test]
    fn test_invalid_commands_keep_waiting() {
        let (stopped, output) = run("help\n  stop  \nignored\n");
        assert!(stopped);
        assert!(output.contains("Invalid command: help\n"));
        assert_eq!(output.matches(PROMPT).count(), 2);
        assert!(!output.contains("ignored"));
    }

    #[test]
    fn test_stop_is_case_sensitive() {
        let (stopped, output) = run("STOP\n");
        assert!(!stopped);
        assert!(output.contains("Invalid command: STOP"));
    }

    #[test]
    fn test_end_of_input_does_not_stop() {
        let (stopped, _) = run("");
        assert!(!stopped);
    }

    struct Ready;

    #[async_trait]
    impl ShutdownSignal for Ready {
        async fn wait(&mut self) {}
    }

    struct Never;

    #[async_trait]
    impl ShutdownSignal for Never {
        async fn wait(&mut self) {
            std::future::pending::<()>().await;
        }
    }

    #[tokio::test]
    async fn test_any_of_resolves_with_either() {
        AnyOf::new(Never, Ready).wait().await;
        AnyOf::new(Ready, Never).wait().await;
    }

    /// Input that never produces a byte, like a terminal nobody types into.
    struct Silent;

    impl std::io::Read for Silent {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            loop {
                std::thread::park();
            }
        }
    }

    #[tokio::test]
    async fn test_other_signal_wins_over_idle_console() {
        let console = ConsoleShutdown::new(BufReader::new(Silent), std::io::sink());
        let mut signal = AnyOf::new(console, Ready);

        tokio::time::timeout(std::time::Duration::from_secs(5), signal.wait())
            .await
            .expect("idle console blocked shutdown");
    }

    #[tokio::test]
    async fn test_console_stop_resolves() {
        let console = ConsoleShutdown::new("hello\nstop\n".as_bytes(), std::io::sink());
        let mut signal = AnyOf::new(console, Never);

        tokio::time::timeout(std::time::Duration::from_secs(5), signal.wait())
            .await
            .expect("stop command ignored");
    }
}
