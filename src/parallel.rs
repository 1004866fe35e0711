use std::{ops::Range, sync::Arc};

use ndarray::Array2;

use crate::{decoder::Basecall, Decoder, Result};

/// Number of reads a thread decodes between calls to [`ReadProcessor::on_batch_complete`]
pub const BATCH_SIZE: usize = 1024;

/// Network output for a single read
#[derive(Debug, Clone, Default)]
pub struct NetworkRead {
    /// Read identifier
    pub id: String,
    /// Flip-flop state per block
    pub path: Vec<u8>,
    /// Modification weights per transition, if the network emits them
    pub mod_weights: Option<Array2<f32>>,
}
impl NetworkRead {
    pub fn new(id: impl Into<String>, path: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            path,
            mod_weights: None,
        }
    }

    #[must_use]
    pub fn with_mod_weights(mut self, mod_weights: Array2<f32>) -> Self {
        self.mod_weights = Some(mod_weights);
        self
    }
}

/// Trait for types that consume decoded reads in parallel.
///
/// Each worker thread receives its own clone of the processor.
pub trait ReadProcessor: Send + Clone {
    /// Process a single decoded read
    fn process_read(&mut self, read: &NetworkRead, basecall: Basecall) -> Result<()>;

    /// Called when a thread finishes processing its batch
    /// Default implementation does nothing
    fn on_batch_complete(&mut self) -> Result<()> {
        Ok(())
    }

    /// Set the thread ID for this processor
    ///
    /// Each thread should call this method with its own unique ID.
    fn set_tid(&mut self, _tid: usize) {
        // Default implementation does nothing
    }

    /// Get the thread ID for this processor
    fn get_tid(&self) -> Option<usize> {
        None
    }
}

/// Number of worker threads to use for `num_reads` reads
///
/// `0` requests one thread per CPU. Requests above the CPU count are capped.
fn resolve_threads(num_threads: usize, num_reads: usize) -> usize {
    let num_cpus = num_cpus::get();
    let num_threads = if num_threads == 0 {
        num_cpus
    } else {
        if num_threads > num_cpus {
            log::warn!("Requested {num_threads} threads, capping at {num_cpus} CPUs");
        }
        num_threads.min(num_cpus)
    };
    num_threads.min(num_reads).max(1)
}

impl Decoder {
    /// Decode reads in parallel, handing each basecall to a clone of `processor`
    ///
    /// Reads are split into contiguous ranges, one per thread. Within a thread
    /// reads are processed in order and `on_batch_complete` is called every
    /// [`BATCH_SIZE`] reads and after the last one.
    ///
    /// # Arguments
    ///
    /// * `reads` - The reads to decode
    /// * `processor` - The processor to use for each decoded read
    /// * `num_threads` - The number of threads to spawn (`0` for one per CPU)
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If all reads were decoded and processed successfully
    /// * `Err(Error)` - The first error raised by decoding or by a processor
    pub fn process_parallel<P: ReadProcessor + 'static>(
        &self,
        reads: Vec<NetworkRead>,
        processor: P,
        num_threads: usize,
    ) -> Result<()> {
        if reads.is_empty() {
            return Ok(());
        }
        let num_threads = resolve_threads(num_threads, reads.len());
        let reads_per_thread = reads.len().div_ceil(num_threads);

        let reads = Arc::new(reads);
        let decoder = Arc::new(self.clone());

        let mut handles = Vec::with_capacity(num_threads);
        for tid in 0..num_threads {
            let mut processor = processor.clone();
            let reads = reads.clone();
            let decoder = decoder.clone();
            processor.set_tid(tid);

            let handle = std::thread::spawn(move || -> Result<()> {
                let start_idx = tid * reads_per_thread;
                let end_idx = (start_idx + reads_per_thread).min(reads.len());
                if start_idx >= end_idx {
                    return Ok(()); // No reads for this thread
                }
                log::debug!("thread {tid} decoding reads {start_idx}..{end_idx}");
                decoder.process_range(&reads, start_idx..end_idx, &mut processor)
            });
            handles.push(handle);
        }

        let mut outcome = Ok(());
        for handle in handles {
            let result = handle
                .join()
                .unwrap_or_else(|_| Err(anyhow::anyhow!("decoding thread panicked").into()));
            if outcome.is_ok() {
                outcome = result;
            }
        }
        outcome
    }

    fn process_range<P: ReadProcessor>(
        &self,
        reads: &[NetworkRead],
        range: Range<usize>,
        processor: &mut P,
    ) -> Result<()> {
        for batch_start in range.clone().step_by(BATCH_SIZE) {
            let batch_end = (batch_start + BATCH_SIZE).min(range.end);
            for read in &reads[batch_start..batch_end] {
                let basecall = self.basecall(&read.path, read.mod_weights.as_ref())?;
                log::trace!("read {} decoded to {} bases", read.id, basecall.len());
                processor.process_read(read, basecall)?;
            }
            processor.on_batch_complete()?;
        }
        Ok(())
    }
}
