//! Parallel decoding of independent replay files.
//!
//! A fixed set of worker threads pulls file indices from a bounded
//! crossbeam channel, decodes each file and sends `(index, result)`
//! back. Results are reassembled in input order.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use hbr_replay::{Replay, ReplayDecoder, Result};

/// Decode every input with default options on up to `workers` threads.
///
/// Results are in input order. `workers` is clamped to `1..=inputs.len()`.
pub fn decode_all<T: AsRef<[u8]> + Sync>(inputs: &[T], workers: usize) -> Vec<Result<Replay>> {
    decode_all_with(&ReplayDecoder::default(), inputs, workers)
}

/// Like [`decode_all`] with an explicit decoder.
pub fn decode_all_with<T: AsRef<[u8]> + Sync>(
    decoder: &ReplayDecoder,
    inputs: &[T],
    workers: usize,
) -> Vec<Result<Replay>> {
    let workers = workers.clamp(1, inputs.len().max(1));
    if workers == 1 || inputs.len() <= 1 {
        return inputs.iter().map(|b| decoder.decode(b.as_ref())).collect();
    }

    let mut slots: Vec<Option<Result<Replay>>> = (0..inputs.len()).map(|_| None).collect();
    thread::scope(|s| {
        let (task_tx, task_rx) = crossbeam_channel::bounded::<usize>(workers * 4);
        let (done_tx, done_rx) = crossbeam_channel::unbounded();

        let mut spawned = 0usize;
        for i in 0..workers {
            let task_rx = task_rx.clone();
            let done_tx = done_tx.clone();
            let worker = thread::Builder::new()
                .name(format!("hbr-decode-{i}"))
                .spawn_scoped(s, move || worker_loop(decoder, inputs, task_rx, done_tx));
            match worker {
                Ok(_) => spawned += 1,
                Err(e) => log::warn!("failed to spawn decode worker {i}: {e}"),
            }
        }
        drop(task_rx);
        drop(done_tx);
        if spawned == 0 {
            return;
        }
        log::debug!("decoding {} files on {spawned} workers", inputs.len());

        for index in 0..inputs.len() {
            if task_tx.send(index).is_err() {
                break;
            }
        }
        drop(task_tx);

        for (index, result) in done_rx {
            slots[index] = Some(result);
        }
    });

    // Anything a worker did not get to is decoded here.
    slots
        .into_iter()
        .zip(inputs)
        .map(|(slot, bytes)| match slot {
            Some(result) => result,
            None => decoder.decode(bytes.as_ref()),
        })
        .collect()
}

/// Runs until the task channel is closed.
fn worker_loop<T: AsRef<[u8]>>(
    decoder: &ReplayDecoder,
    inputs: &[T],
    task_rx: Receiver<usize>,
    done_tx: Sender<(usize, Result<Replay>)>,
) {
    while let Ok(index) = task_rx.recv() {
        let result = decoder.decode(inputs[index].as_ref());
        if done_tx.send((index, result)).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbr_test_utils::{ReplayFixture, RoomFixture, WireWriter};

    fn file(name: &str) -> Vec<u8> {
        let mut w = WireWriter::new();
        RoomFixture::new(name).write(&mut w);
        ReplayFixture::modern(12).payload(w.into_bytes()).build()
    }

    #[test]
    fn results_keep_input_order() {
        let inputs: Vec<Vec<u8>> = (0..17).map(|i| file(&format!("room {i}"))).collect();
        let results = decode_all(&inputs, 4);
        assert_eq!(results.len(), 17);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.as_ref().unwrap().room_info.name, format!("room {i}"));
        }
    }

    #[test]
    fn failures_stay_in_their_slot() {
        let inputs = vec![file("a"), b"not a replay".to_vec(), file("c")];
        let results = decode_all(&inputs, 8);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().room_info.name, "c");
    }

    #[test]
    fn degenerate_worker_counts() {
        let inputs = vec![file("solo")];
        assert_eq!(decode_all(&inputs, 0).len(), 1);
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(decode_all(&empty, 4).is_empty());
    }
}
