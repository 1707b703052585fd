//! Background chunk generation
//!
//! A fixed pool of worker threads shares one generator and turns chunk
//! coordinates into generated chunks. Uses crossbeam channels for
//! inter-thread communication. Callers decide which chunks to request.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, RecvError, Sender, TryRecvError, TrySendError, bounded};
use rustc_hash::FxHashSet;

use crate::constants::{REQUEST_QUEUE_CAPACITY, RESULT_QUEUE_CAPACITY};
use crate::core::chunk::{Chunk, WorldOffset};
use crate::error::{ConfigError, LoaderError};
use crate::world::generator::TerrainGenerator;

/// Chunk grid coordinates.
pub type ChunkPos = (i32, i32, i32);

/// Result of background chunk generation
pub struct ChunkGenResult {
    pub pos: ChunkPos,
    pub chunk: Chunk,
}

/// Manages background chunk generation with worker threads
pub struct ChunkLoader {
    request_tx: Sender<ChunkPos>,
    result_rx: Receiver<ChunkGenResult>,
    pending: FxHashSet<ChunkPos>,
    worker_count: usize,
}

impl ChunkLoader {
    /// Create a ChunkLoader with one worker per CPU
    pub fn new(generator: Arc<dyn TerrainGenerator>) -> Result<Self, LoaderError> {
        Self::with_worker_count(num_cpus::get().max(1), generator)
    }

    /// Create a ChunkLoader with a specific number of workers
    pub fn with_worker_count(
        num_workers: usize,
        generator: Arc<dyn TerrainGenerator>,
    ) -> Result<Self, LoaderError> {
        if num_workers == 0 {
            return Err(ConfigError::NoWorkers.into());
        }

        // Bounded channels prevent unbounded memory growth
        let (request_tx, request_rx) = bounded::<ChunkPos>(REQUEST_QUEUE_CAPACITY);
        let (result_tx, result_rx) = bounded::<ChunkGenResult>(RESULT_QUEUE_CAPACITY);

        for worker_id in 0..num_workers {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            let generator = Arc::clone(&generator);

            thread::Builder::new()
                .name(format!("chunk-gen-{}", worker_id))
                .spawn(move || {
                    tracing::debug!("Chunk worker {} started", worker_id);
                    let dims = generator.config().dimensions;

                    // Exits once the loader drops its request sender
                    while let Ok(pos) = rx.recv() {
                        let (cx, cy, cz) = pos;
                        let mut chunk = Chunk::new(dims, WorldOffset::of_chunk(cx, cy, cz, dims));
                        generator.generate(&mut chunk);

                        if tx.send(ChunkGenResult { pos, chunk }).is_err() {
                            // Loader has been dropped
                            break;
                        }
                    }

                    tracing::debug!("Chunk worker {} stopped", worker_id);
                })?;
        }

        tracing::info!("Chunk loader started with {} workers", num_workers);

        Ok(ChunkLoader {
            request_tx,
            result_rx,
            pending: FxHashSet::default(),
            worker_count: num_workers,
        })
    }

    /// Request a chunk to be generated. Returns false when the request queue
    /// is full; the chunk is not marked pending in that case.
    pub fn request_chunk(&mut self, pos: ChunkPos) -> bool {
        if self.pending.contains(&pos) {
            return true; // Already requested
        }

        match self.request_tx.try_send(pos) {
            Ok(()) => {
                self.pending.insert(pos);
                true
            }
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Request several chunks, stopping at the first one the queue rejects.
    /// Returns how many were accepted.
    pub fn request_chunks(&mut self, positions: &[ChunkPos]) -> usize {
        let mut accepted = 0;
        for &pos in positions {
            if !self.request_chunk(pos) {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Check if a chunk is pending generation
    pub fn is_pending(&self, pos: ChunkPos) -> bool {
        self.pending.contains(&pos)
    }

    /// Get the number of pending chunks
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Poll for completed chunks (non-blocking)
    /// Returns up to max_results completed chunks
    pub fn poll_results(&mut self, max_results: usize) -> Vec<ChunkGenResult> {
        let mut results = Vec::with_capacity(max_results);

        for _ in 0..max_results {
            match self.result_rx.try_recv() {
                Ok(result) => {
                    self.pending.remove(&result.pos);
                    results.push(result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        results
    }

    /// Block until the next chunk is ready. Returns `None` when nothing is
    /// pending.
    pub fn wait_next(&mut self) -> Option<ChunkGenResult> {
        if self.pending.is_empty() {
            return None;
        }
        match self.result_rx.recv() {
            Ok(result) => {
                self.pending.remove(&result.pos);
                Some(result)
            }
            Err(RecvError) => None,
        }
    }

    /// Forget a pending request. Its result, if produced, is still delivered.
    pub fn cancel(&mut self, pos: ChunkPos) {
        self.pending.remove(&pos);
    }

    /// Get worker count
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}
