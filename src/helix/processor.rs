//! Background helix builder for non-blocking geometry generation.
//!
//! Curve interpolation, tube sweeping and instance packing all happen on a
//! dedicated thread. The render thread only uploads finished byte buffers.
//! Until the first [`PreparedHelix`] arrives, the scene is still loading.

use std::sync::mpsc;

use super::{HelixAssembly, PreparedHelix, StrandCache};
use crate::{
    error::DuplexError,
    options::{ColorOptions, HelixOptions},
};

/// Work item for the builder thread.
#[derive(Debug, Clone)]
pub enum HelixRequest {
    /// Build (or rebuild) the assembly.
    Build {
        /// Shape parameters.
        helix: HelixOptions,
        /// Palette.
        colors: ColorOptions,
        /// Monotonic request id, echoed in the result.
        generation: u64,
    },
    /// Stop the thread.
    Shutdown,
}

/// Background thread that turns helix options into GPU-ready buffers.
pub struct HelixProcessor {
    request_tx: mpsc::Sender<HelixRequest>,
    result: triple_buffer::Output<Option<PreparedHelix>>,
    thread: Option<std::thread::JoinHandle<()>>,
    next_generation: u64,
}

impl HelixProcessor {
    /// Spawn the background builder thread.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::ThreadSpawn`] if the thread fails to spawn.
    pub fn new() -> Result<Self, DuplexError> {
        let (request_tx, request_rx) = mpsc::channel::<HelixRequest>();
        let (input, output) = triple_buffer::triple_buffer(&None);

        let thread = std::thread::Builder::new()
            .name("helix-builder".into())
            .spawn(move || {
                Self::thread_loop(request_rx, input);
            })
            .map_err(DuplexError::ThreadSpawn)?;

        Ok(Self {
            request_tx,
            result: output,
            thread: Some(thread),
            next_generation: 0,
        })
    }

    /// Queue a build (non-blocking). Returns the generation it will carry.
    pub fn submit(&mut self, helix: &HelixOptions, colors: &ColorOptions) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        let _ = self.request_tx.send(HelixRequest::Build {
            helix: helix.clone(),
            colors: colors.clone(),
            generation,
        });
        generation
    }

    /// Non-blocking check for a completed build.
    pub fn try_recv(&mut self) -> Option<PreparedHelix> {
        let _ = self.result.update();
        self.result.output_buffer_mut().take()
    }

    /// Shut down the background thread and wait for it to finish.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(HelixRequest::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    fn thread_loop(
        request_rx: mpsc::Receiver<HelixRequest>,
        mut output: triple_buffer::Input<Option<PreparedHelix>>,
    ) {
        let mut cache = StrandCache::new();

        while let Ok(request) = request_rx.recv() {
            match drain_latest(request, &request_rx) {
                HelixRequest::Shutdown => break,
                HelixRequest::Build {
                    helix,
                    colors,
                    generation,
                } => {
                    cache.retain_params(&helix);
                    let assembly =
                        HelixAssembly::build(&helix, &colors, &mut cache);
                    let prepared =
                        PreparedHelix::from_assembly(&assembly, generation);
                    log::debug!(
                        "helix build {generation} ready: {} batches, {} \
                         instances",
                        prepared.batches.len(),
                        prepared.instance_count()
                    );
                    output.write(Some(prepared));
                }
            }
        }
    }
}

impl Drop for HelixProcessor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Drain queued requests, keeping only the latest. A queued shutdown
/// always wins.
fn drain_latest(
    initial: HelixRequest,
    rx: &mpsc::Receiver<HelixRequest>,
) -> HelixRequest {
    let mut latest = initial;
    while let Ok(newer) = rx.try_recv() {
        if matches!(latest, HelixRequest::Shutdown) {
            continue;
        }
        latest = newer;
    }
    latest
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn wait_for(processor: &mut HelixProcessor) -> PreparedHelix {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(prepared) = processor.try_recv() {
                return prepared;
            }
            assert!(Instant::now() < deadline, "helix build timed out");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn delivers_a_prepared_helix() {
        let mut processor = HelixProcessor::new().unwrap();
        assert!(processor.try_recv().is_none());

        let generation = processor
            .submit(&HelixOptions::default(), &ColorOptions::default());
        let prepared = wait_for(&mut processor);
        assert_eq!(prepared.generation, generation);
        assert_eq!(prepared.batches.len(), 5);

        // The slot is consumed by the first read.
        assert!(processor.try_recv().is_none());
    }

    #[test]
    fn newest_request_wins() {
        let mut processor = HelixProcessor::new().unwrap();
        let colors = ColorOptions::default();
        let small = HelixOptions {
            base_pairs: 4,
            ..HelixOptions::default()
        };
        let _ = processor.submit(&HelixOptions::default(), &colors);
        let last = processor.submit(&small, &colors);

        let mut prepared = wait_for(&mut processor);
        while prepared.generation != last {
            prepared = wait_for(&mut processor);
        }
        assert_eq!(prepared.batches[4].instance_count, 4);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut processor = HelixProcessor::new().unwrap();
        processor.shutdown();
        processor.shutdown();
        let _ = processor.submit(&HelixOptions::default(), &ColorOptions::default());
        assert!(processor.try_recv().is_none());
    }

    #[test]
    fn drain_keeps_shutdown() {
        let (tx, rx) = mpsc::channel();
        tx.send(HelixRequest::Shutdown).unwrap();
        tx.send(HelixRequest::Build {
            helix: HelixOptions::default(),
            colors: ColorOptions::default(),
            generation: 1,
        })
        .unwrap();
        let first = rx.recv().unwrap();
        assert!(matches!(drain_latest(first, &rx), HelixRequest::Shutdown));
    }
}
