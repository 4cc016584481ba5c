//! Segmented mode for payloads beyond the very-large threshold.
//!
//! The payload is divided into fixed 64 MiB strides. Each segment task opens
//! its own read and write handle, so segments complete in any order and
//! never contend on a shared file cursor. A pool of `max_parallelism`
//! workers bounds the number of in-flight segments.
//!
//! Encryption pre-allocates the output (header + payload + worst-case
//! per-segment expansion) and truncates to the exact end once every segment
//! has landed. Decryption finishes with the padding reconciliation pass.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::thread;

use crossbeam::channel::{bounded, unbounded};
use tracing::info;

use crate::cipher::FileCipher;
use crate::config::EngineConfig;
use crate::constants::{HEADER_LEN, SEGMENT_SLACK};
use crate::header::{encode_header, read_header, FileHeader};
use crate::key::Key;
use crate::padding;
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::progress::ProgressCounters;
use crate::pipeline::Direction;
use crate::types::EngineError;

#[derive(Debug, Clone, Copy)]
struct SegmentJob {
    input_offset: u64,
    input_len: usize,
    output_offset: u64,
}

fn read_segment(path: &Path, offset: u64, len: usize) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; len];
    file.read_exact(&mut buf)?;
    Ok(buf)
}

fn write_segment(path: &Path, offset: u64, data: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(data)
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
    let total_len = File::open(input)?.metadata()?.len();
    let segment_size = config.segment_size as usize;

    // Segment geometry. Input strides are plaintext-sized on the way in and
    // sealed-sized on the way out; output offsets follow from the cipher's
    // deterministic expansion, so tasks never overlap.
    let (payload_start, in_stride, out_base, out_stride) = match direction {
        Direction::Encrypt => (
            0u64,
            segment_size,
            HEADER_LEN as u64,
            cipher.sealed_len(segment_size) as u64,
        ),
        Direction::Decrypt => {
            let mut in_file = File::open(input)?;
            read_header(&mut in_file)?;
            (
                HEADER_LEN as u64,
                cipher.sealed_len(segment_size),
                0u64,
                segment_size as u64,
            )
        }
    };

    let payload_len = total_len - payload_start;
    let segments = payload_len.div_ceil(in_stride as u64);

    // Output setup: header + pre-allocation for encryption.
    {
        let mut out_file = File::create(output)?;
        if direction == Direction::Encrypt {
            out_file.write_all(&encode_header(&FileHeader::new(cipher.tag())))?;
            out_file.set_len(HEADER_LEN as u64 + payload_len + segments * SEGMENT_SLACK)?;
        }
    }

    let jobs: Vec<SegmentJob> = (0..segments)
        .map(|i| {
            let rel = i * in_stride as u64;
            SegmentJob {
                input_offset: payload_start + rel,
                input_len: ((payload_len - rel).min(in_stride as u64)) as usize,
                output_offset: out_base + i * out_stride,
            }
        })
        .collect();
    // Exact end of the ciphertext: full segments plus the sealed tail.
    let final_out_end = jobs
        .last()
        .map(|j| j.output_offset + cipher.sealed_len(j.input_len) as u64)
        .unwrap_or(out_base);

    let workers = config.max_parallelism.max(1).min(segments.max(1) as usize);
    let (job_tx, job_rx) = bounded::<SegmentJob>(workers);
    let (done_tx, done_rx) = unbounded::<Result<(usize, usize), EngineError>>();

    let mut first_err: Option<EngineError> = None;

    thread::scope(|scope| {
        // ---- Feeder ----
        let feeder_cancel = cancel.clone();
        scope.spawn(move || {
            for job in jobs {
                if feeder_cancel.is_cancelled() {
                    break;
                }
                if job_tx.send(job).is_err() {
                    break;
                }
            }
            drop(job_tx);
        });

        // ---- Segment workers ----
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = done_tx.clone();
            let worker_cancel = cancel.clone();
            scope.spawn(move || {
                for job in rx.iter() {
                    if worker_cancel.is_cancelled() {
                        break;
                    }
                    let result = read_segment(input, job.input_offset, job.input_len)
                        .map_err(EngineError::Io)
                        .and_then(|data| {
                            let transformed = match direction {
                                Direction::Encrypt => cipher.encrypt(&data, key),
                                Direction::Decrypt => cipher.decrypt(&data, key),
                            }?;
                            write_segment(output, job.output_offset, &transformed)
                                .map_err(EngineError::Io)?;
                            Ok((job.input_len, transformed.len()))
                        });
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(done_tx);

        // ---- Join in completion order ----
        for result in done_rx.iter() {
            match result {
                Ok((bytes_in, bytes_out)) => counters.add_unit(bytes_in, bytes_out),
                Err(e) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                        cancel.cancel();
                    }
                }
            }
        }
    });

    if let Some(e) = first_err {
        return Err(e);
    }
    cancel.check()?;

    if direction == Direction::Encrypt {
        // Trim the pre-allocation slack down to the real ciphertext end.
        OpenOptions::new().write(true).open(output)?.set_len(final_out_end)?;
    } else {
        padding::reconcile_file_tail(output, &cipher.padding(), config.buffer_size);
    }

    info!(
        input = %input.display(),
        segments,
        workers,
        "segmented mode complete"
    );
    Ok(())
}
