//! Streaming mode: sequential chunked read, bounded-parallel cipher
//! workers, completion-order positioned writes.
//!
//! Wiring:
//! - a reader thread slices the payload into fixed chunks and feeds a
//!   bounded channel (the bound is the in-flight cap);
//! - `max_parallelism` workers apply the cipher;
//! - the calling thread drains results in completion order and writes each
//!   at its absolute offset, which is deterministic because every cipher
//!   declares a deterministic `sealed_len`.
//!
//! Decrypt side: a container whose header does not parse is treated as
//! legacy raw ciphertext (rewind, warn, continue).

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::thread;

use bytes::Bytes;
use crossbeam::channel::{bounded, Receiver, Sender};
use tracing::{info, warn};

use crate::cipher::{CipherError, FileCipher};
use crate::config::EngineConfig;
use crate::constants::HEADER_LEN;
use crate::header::{encode_header, read_header, FileHeader};
use crate::key::Key;
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::progress::ProgressCounters;
use crate::pipeline::Direction;
use crate::types::EngineError;

struct ChunkJob {
    index: u64,
    data: Bytes,
}

struct ChunkDone {
    index: u64,
    bytes_in: usize,
    data: Vec<u8>,
}

/// Read up to `len` bytes, short only at end of stream.
fn read_exact_or_eof<R: Read>(r: &mut R, len: usize) -> std::io::Result<Bytes> {
    let mut buf = vec![0u8; len];
    let mut off = 0;
    while off < len {
        let n = r.read(&mut buf[off..])?;
        if n == 0 {
            break;
        }
        off += n;
    }
    buf.truncate(off);
    Ok(Bytes::from(buf))
}

pub(crate) fn process(
    input: &Path,
    output: &Path,
    cipher: &dyn FileCipher,
    key: &Key,
    direction: Direction,
    config: &EngineConfig,
    cancel: &CancelToken,
    counters: &mut ProgressCounters,
) -> Result<(), EngineError> {
    let mut in_file = File::open(input)?;
    let total_len = in_file.metadata()?.len();

    // Header handling decides where the payload starts and where output
    // chunk offsets are based.
    let (payload_start, out_base) = match direction {
        Direction::Encrypt => (0u64, HEADER_LEN as u64),
        Direction::Decrypt => match read_header(&mut in_file) {
            Ok(_) => (HEADER_LEN as u64, 0u64),
            Err(e) => {
                warn!(
                    input = %input.display(),
                    error = %e,
                    "container header unreadable; assuming legacy header-less ciphertext"
                );
                in_file.seek(SeekFrom::Start(0))?;
                (0u64, 0u64)
            }
        },
    };

    let payload_len = total_len - payload_start;
    let chunk_size = config.chunk_size_for(payload_len);
    // Workers consume whole cipher units: plaintext chunks on the way in,
    // sealed chunks on the way out.
    let (read_stride, out_stride) = match direction {
        Direction::Encrypt => (chunk_size, cipher.sealed_len(chunk_size) as u64),
        Direction::Decrypt => (cipher.sealed_len(chunk_size), chunk_size as u64),
    };

    let mut out_file = File::create(output)?;
    if direction == Direction::Encrypt {
        out_file.write_all(&encode_header(&FileHeader::new(cipher.tag())))?;
    }

    let workers = config.max_parallelism.max(1);
    let (job_tx, job_rx) = bounded::<ChunkJob>(workers);
    let (done_tx, done_rx) = bounded::<Result<ChunkDone, CipherError>>(workers);

    let mut reader = BufReader::with_capacity(config.buffer_size, in_file);
    let mut first_err: Option<EngineError> = None;

    thread::scope(|scope| {
        // ---- Reader ----
        let reader_cancel = cancel.clone();
        let reader_handle = scope.spawn(move || -> Result<(), EngineError> {
            let mut index = 0u64;
            loop {
                if reader_cancel.is_cancelled() {
                    break;
                }
                let data = read_exact_or_eof(&mut reader, read_stride)?;
                if data.is_empty() {
                    break;
                }
                if job_tx.send(ChunkJob { index, data }).is_err() {
                    break; // workers gone, writer owns the error
                }
                index += 1;
            }
            drop(job_tx); // close the job channel so workers drain and exit
            Ok(())
        });

        // ---- Workers ----
        for _ in 0..workers {
            let rx: Receiver<ChunkJob> = job_rx.clone();
            let tx: Sender<Result<ChunkDone, CipherError>> = done_tx.clone();
            let worker_cancel = cancel.clone();
            scope.spawn(move || {
                for job in rx.iter() {
                    if worker_cancel.is_cancelled() {
                        break;
                    }
                    let bytes_in = job.data.len();
                    let result = match direction {
                        Direction::Encrypt => cipher.encrypt(&job.data, key),
                        Direction::Decrypt => cipher.decrypt(&job.data, key),
                    }
                    .map(|data| ChunkDone { index: job.index, bytes_in, data });
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(done_tx);

        // ---- Positioned writer (completion order) ----
        for result in done_rx.iter() {
            match result {
                Ok(done) if first_err.is_none() => {
                    let offset = out_base + done.index * out_stride;
                    let write = out_file
                        .seek(SeekFrom::Start(offset))
                        .and_then(|_| out_file.write_all(&done.data));
                    match write {
                        Ok(()) => counters.add_unit(done.bytes_in, done.data.len()),
                        Err(e) => {
                            first_err = Some(EngineError::Io(e));
                            cancel.cancel();
                        }
                    }
                }
                Ok(_) => {} // draining after failure
                Err(e) => {
                    if first_err.is_none() {
                        first_err = Some(EngineError::Cipher(e));
                        cancel.cancel();
                    }
                }
            }
        }

        match reader_handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
            Err(_) => {
                if first_err.is_none() {
                    first_err = Some(EngineError::Pipeline("reader thread panicked"));
                }
            }
        }
    });

    if let Some(e) = first_err {
        return Err(e);
    }
    cancel.check()?;

    info!(
        input = %input.display(),
        chunks = counters.units_completed,
        chunk_size,
        workers,
        "streaming mode complete"
    );
    Ok(())
}
