//! Rerun viewer process management.

use std::net::{SocketAddr, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use embedscope_core::{LabelSequence, PlotRenderer, ReducedMatrix};
use rerun::RecordingStreamBuilder;

use crate::TRACING_TARGET;
use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use crate::scatter::log_scatter;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const PROBE_TIMEOUT: Duration = Duration::from_millis(200);
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Renders points in a Rerun viewer window.
///
/// [`render`](PlotRenderer::render) starts the viewer, streams the scatter
/// plot and blocks until the viewer process exits. When a viewer is already
/// listening on the configured port it is reused and `render` returns as
/// soon as the data is flushed.
#[derive(Debug, Clone, Default)]
pub struct RerunViewer {
    config: ViewerConfig,
}

impl RerunViewer {
    /// Creates a viewer with the given configuration.
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Streams the plot and waits for the viewer to close.
    pub fn show(&self, points: &ReducedMatrix, labels: &LabelSequence) -> Result<()> {
        let child = self.start()?;

        match (self.stream(points, labels), child) {
            (Ok(()), Some(child)) => self.wait(child),
            (Ok(()), None) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    addr = %self.config.addr(),
                    "Points sent to the running viewer, exiting without waiting for it to close"
                );
                Ok(())
            }
            (Err(err), Some(mut child)) => {
                let _ = child.kill();
                let _ = child.wait();
                Err(err)
            }
            (Err(err), None) => Err(err),
        }
    }

    /// Returns the spawned viewer, or `None` when one is already listening.
    fn start(&self) -> Result<Option<Child>> {
        let addr = self.config.addr();
        if is_listening(addr) {
            tracing::info!(
                target: TRACING_TARGET,
                addr = %addr,
                "Using running viewer"
            );
            return Ok(None);
        }

        tracing::info!(
            target: TRACING_TARGET,
            bin = %self.config.viewer_bin,
            port = self.config.viewer_port,
            "Starting viewer"
        );

        let mut child = Command::new(&self.config.viewer_bin)
            .arg("--port")
            .arg(self.config.viewer_port.to_string())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| Error::Spawn {
                bin: self.config.viewer_bin.clone(),
                source,
            })?;

        let timeout = self.config.startup_timeout();
        let deadline = Instant::now() + timeout;

        loop {
            if is_listening(addr) {
                return Ok(Some(child));
            }

            if let Some(status) = child.try_wait().map_err(Error::Wait)? {
                return Err(Error::Exited { status });
            }

            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::Startup { addr, timeout });
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    fn stream(&self, points: &ReducedMatrix, labels: &LabelSequence) -> Result<()> {
        let rec = RecordingStreamBuilder::new(self.config.viewer_app_id.as_str())
            .connect_tcp_opts(self.config.addr(), Some(FLUSH_TIMEOUT))
            .map_err(|e| Error::Stream(e.to_string()))?;

        log_scatter(&rec, points, labels)?;
        rec.flush_blocking();

        Ok(())
    }

    fn wait(&self, mut child: Child) -> Result<()> {
        tracing::info!(
            target: TRACING_TARGET,
            pid = child.id(),
            "Waiting for the viewer window to close"
        );

        let status = child.wait().map_err(Error::Wait)?;
        if !status.success() {
            tracing::warn!(
                target: TRACING_TARGET,
                status = %status,
                "Viewer exited with failure status"
            );
        }

        Ok(())
    }
}

impl PlotRenderer for RerunViewer {
    fn render(&self, points: &ReducedMatrix, labels: &LabelSequence) -> embedscope_core::Result<()> {
        Ok(self.show(points, labels)?)
    }
}

fn is_listening(addr: SocketAddr) -> bool {
    TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok()
}
