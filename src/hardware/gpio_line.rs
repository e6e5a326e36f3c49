//! GPIO character device line used as the raw edge source.
//!
//! Edge records are read on a dedicated OS thread so that the blocking
//! `read` never stalls the executor. The thread forwards what it reads
//! through a [`Signal`], which the debouncer awaits.
//!
//! The reader holds its own duplicate of the event descriptor. Dropping a
//! [`GpioLine`] asks the reader to stop, but a blocked `read` only returns on
//! the next edge, so the kernel keeps the line requested until then (or until
//! the process exits). Opening the same line again before that fails with
//! `EBUSY`.

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use gpio_cdev::errors::Error as GpioError;
use gpio_cdev::{Chip, EventRequestFlags, LineEventHandle, LineRequestFlags};
use tracing::{debug, trace};

use super::traits::{EdgeEvent, EdgeLine};
use crate::error::{Error, Result};

/// Size of one `struct gpioevent_data` record (u64 timestamp, u32 id, padding).
const EVENT_RECORD_SIZE: usize = 16;

type EdgeSignal = Signal<CriticalSectionRawMutex, EdgeEvent>;

pub struct GpioLine {
    handle: LineEventHandle,
    edges: Arc<EdgeSignal>,
    stop: Arc<AtomicBool>,
}

impl GpioLine {
    /// Requests `line` on `chip` as an input with both-edge notification and
    /// starts the edge reader thread.
    pub fn open(chip: &Path, line: u32, label: &str) -> Result<Self> {
        let open_err = |source: GpioError| Error::Open {
            chip: chip.to_path_buf(),
            line,
            source,
        };

        let mut device = Chip::new(chip).map_err(open_err)?;
        let handle = device
            .get_line(line)
            .map_err(open_err)?
            .events(
                LineRequestFlags::INPUT,
                EventRequestFlags::BOTH_EDGES,
                label,
            )
            .map_err(open_err)?;

        // SAFETY: the descriptor is owned by `handle`, which is alive for the
        // whole borrow; the duplicate gets its own descriptor number.
        let records = unsafe { BorrowedFd::borrow_raw(handle.as_raw_fd()) }
            .try_clone_to_owned()
            .map(File::from)
            .map_err(Error::EdgeRead)?;

        let edges = Arc::new(EdgeSignal::new());
        let stop = Arc::new(AtomicBool::new(false));
        let (sink, stopped) = (Arc::clone(&edges), Arc::clone(&stop));
        thread::Builder::new()
            .name("gpio-edges".into())
            .spawn(move || read_edges(records, &stopped, |event| sink.signal(event)))
            .map_err(Error::EdgeRead)?;

        debug!("Requested line {} on {}", line, chip.display());
        Ok(Self {
            handle,
            edges,
            stop,
        })
    }
}

impl Drop for GpioLine {
    fn drop(&mut self) {
        // Reader exits (closing its descriptor) when its read next returns
        self.stop.store(true, Ordering::Release);
    }
}

impl EdgeLine for GpioLine {
    fn next_edge(&mut self) -> impl core::future::Future<Output = EdgeEvent> {
        self.edges.wait()
    }

    fn is_high(&self) -> Result<bool> {
        self.handle
            .get_value()
            .map(|value| value != 0)
            .map_err(Error::Level)
    }
}

/// Reads edge records from `records` until end of stream or a read error.
///
/// A read that yields no complete record ("no data yet", an interrupted call,
/// a short read) is not an edge and is retried. `Closed` is always the last
/// event passed to `emit`. Once `stop` is set, the next completed read ends
/// the loop without emitting anything.
pub(crate) fn read_edges(
    mut records: impl Read,
    stop: &AtomicBool,
    mut emit: impl FnMut(EdgeEvent),
) {
    let mut record = [0u8; EVENT_RECORD_SIZE];
    loop {
        let read = records.read(&mut record);
        if stop.load(Ordering::Acquire) {
            trace!("Edge reader stopped");
            return;
        }
        match read {
            Ok(EVENT_RECORD_SIZE) => emit(EdgeEvent::Edge),
            Ok(0) => return emit(EdgeEvent::Closed(None)),
            Ok(n) => trace!("Short edge record ({} bytes)", n),
            Err(e) if is_transient(&e) => trace!("No edge data yet ({e})"),
            Err(e) => return emit(EdgeEvent::Closed(Some(Error::EdgeRead(e)))),
        }
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}
