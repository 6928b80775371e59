use anyhow::{Context, Result, anyhow};
use std::process::Stdio;
use tokio::{
  io::{AsyncBufReadExt, BufReader as TokioBufReader},
  process::{Child as TokioChild, Command},
  sync::mpsc,
  task::JoinHandle,
};
use tracing::{debug, info};

use vodshelf::PlayerCue;
use vodshelf::constants::constants;

/// Drives an external player process (mpv by default) from the archive's player cue.
///
/// A new process is started whenever the cue changes; an unchanged cue leaves the
/// running session alone.
pub struct ExternalPlayer {
  command: String,
  enabled: bool,
  current_process: Option<TokioChild>,
  current_cue: Option<PlayerCue>,
  monitor_handle: Option<JoinHandle<()>>,
  status_rx: Option<mpsc::Receiver<String>>,
  last_status: Option<String>,
}

impl ExternalPlayer {
  pub fn new(command: String, enabled: bool) -> Self {
    Self {
      command,
      enabled,
      current_process: None,
      current_cue: None,
      monitor_handle: None,
      status_rx: None,
      last_status: None,
    }
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  pub fn is_playing(&self) -> bool {
    self.current_process.is_some()
  }

  pub fn current_cue(&self) -> Option<&PlayerCue> {
    self.current_cue.as_ref()
  }

  pub fn check_status(&mut self) {
    if let Some(rx) = &mut self.status_rx {
      while let Ok(status) = rx.try_recv() {
        self.last_status = Some(status);
      }
    }
  }

  pub fn last_status(&self) -> Option<&str> {
    self.last_status.as_deref()
  }

  /// Start playback for `cue` unless it is already what's playing.
  pub async fn sync(&mut self, cue: &PlayerCue) -> Result<()> {
    if !self.enabled || self.current_cue.as_ref() == Some(cue) {
      return Ok(());
    }
    self.play(cue).await
  }

  /// Build the argument list for `cue`: configured args, the seek position, then the URL.
  pub fn args_for(cue: &PlayerCue) -> Vec<String> {
    let mut args = constants().player_args.clone();
    if cue.offset_seconds > 0 {
      args.push(format!("--start={}", cue.offset_seconds));
    }
    let from_start = PlayerCue { offset_seconds: 0, ..cue.clone() };
    args.push(from_start.watch_url());
    args
  }

  pub async fn play(&mut self, cue: &PlayerCue) -> Result<()> {
    self.stop().await.context("Failed to stop previous playback")?;
    // Recorded before spawning: a failed spawn is not retried until the cue changes.
    self.current_cue = Some(cue.clone());

    let mut cmd = Command::new(&self.command);
    cmd.args(Self::args_for(cue));
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    // stderr goes to null: piped but never drained, the pipe buffer fills and the player blocks.
    cmd.stderr(Stdio::null());

    let mut child = cmd.spawn().map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        anyhow!("{} not found. Install it, set player_command in prefs.toml, or run with --no-player", self.command)
      } else {
        anyhow!(e).context(format!("Failed to spawn {}", self.command))
      }
    })?;

    let stdout = child.stdout.take().context("Failed to get player stdout")?;
    let (tx, rx) = mpsc::channel::<String>(10);
    self.status_rx = Some(rx);

    let monitor_handle = tokio::spawn(async move {
      let reader = TokioBufReader::new(stdout);
      let mut lines = reader.lines();
      while let Ok(Some(line)) = lines.next_line().await {
        if tx.send(line).await.is_err() {
          break;
        }
      }
    });

    info!(video_id = %cue.video_id, start = cue.offset_seconds, command = %self.command, "player: started");
    self.current_process = Some(child);
    self.monitor_handle = Some(monitor_handle);
    Ok(())
  }

  pub async fn stop(&mut self) -> Result<()> {
    if let Some(handle) = self.monitor_handle.take() {
      handle.abort();
      let _ = handle.await;
    }
    self.status_rx = None;
    self.last_status = None;

    if let Some(mut child) = self.current_process.take() {
      debug!("player: stopping");
      // The process may already have exited on its own.
      let _ = child.kill().await;
      let _ = child.wait().await;
    }
    self.current_cue = None;
    Ok(())
  }
}
