use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// What the child process left behind.
#[derive(Debug)]
pub struct ExecOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Run `program[0]` with the remaining elements as arguments, capturing
/// stdout, stderr, and the exit status. Blocks until the child exits or the
/// configured timeout elapses.
pub fn execute(cfg: &Config, program: &[String]) -> Result<ExecOutcome> {
    let (exe, args) = program
        .split_first()
        .ok_or_else(|| anyhow!("no program given"))?;

    debug!("spawning {exe} with {} argument(s)", args.len());

    let mut cmd = Command::new(exe);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().with_context(|| format!("spawning program: {exe}"))?;

    let output = if cfg.run.timeout_seconds > 0 {
        wait_with_timeout(&mut child, Duration::from_secs(cfg.run.timeout_seconds))?
    } else {
        child
            .wait_with_output()
            .with_context(|| format!("waiting for program: {exe}"))?
    };

    Ok(ExecOutcome {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
        success: output.status.success(),
    })
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Output> {
    // Drain pipes while waiting so a chatty child can't deadlock on a full
    // stdout/stderr buffer.
    let stdout_reader = child.stdout.take();
    let stderr_reader = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_reader {
            out.read_to_end(&mut buf).with_context(|| "read stdout")?;
        }
        Ok(buf)
    });

    let stderr_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_reader {
            err.read_to_end(&mut buf).with_context(|| "read stderr")?;
        }
        Ok(buf)
    });

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().with_context(|| "try_wait")? {
            let stdout = stdout_thread
                .join()
                .map_err(|_| anyhow!("stdout reader thread panicked"))??;
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Ok(Output {
                status,
                stdout,
                stderr,
            });
        }

        if start.elapsed() > timeout {
            warn!("program timed out after {:?}", timeout);
            let _ = child.kill();
            child.wait().with_context(|| "wait after kill")?;
            let _ = stdout_thread
                .join()
                .map_err(|_| anyhow!("stdout reader thread panicked"))??;
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Err(anyhow!(
                "program exceeded timeout ({:?}); stderr: {}",
                timeout,
                String::from_utf8_lossy(&stderr)
            ));
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}
