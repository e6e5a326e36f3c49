use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Instant, TimeoutError, with_deadline};

/// Point-to-point link between two stages on the same task.
///
/// Holds at most one value. `None` in the channel marks the producer's close.
pub struct Link<T> {
    channel: Channel<NoopRawMutex, Option<T>, 1>,
}

impl<T> Link<T> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    pub fn split(&self) -> (LinkSender<'_, T>, LinkReceiver<'_, T>) {
        (
            LinkSender {
                channel: &self.channel,
            },
            LinkReceiver {
                channel: &self.channel,
                closed: false,
            },
        )
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LinkSender<'a, T> {
    channel: &'a Channel<NoopRawMutex, Option<T>, 1>,
}

impl<T> LinkSender<'_, T> {
    /// Waits until the link has room, then hands `value` over.
    pub async fn send(&self, value: T) {
        self.channel.send(Some(value)).await;
    }

    /// Signals end of stream to the receiver.
    pub async fn close(self) {
        self.channel.send(None).await;
    }
}

pub struct LinkReceiver<'a, T> {
    channel: &'a Channel<NoopRawMutex, Option<T>, 1>,
    closed: bool,
}

impl<T> LinkReceiver<'_, T> {
    /// Next value, or `None` once the sender has closed the link.
    pub async fn recv(&mut self) -> Option<T> {
        if self.closed {
            return None;
        }
        let value = self.channel.receive().await;
        // Sticky, the close marker is only sent once
        self.closed = value.is_none();
        value
    }

    /// Like [`recv`](Self::recv) but gives up at `deadline`.
    ///
    /// A timeout leaves the link untouched; nothing is lost.
    pub async fn recv_until(&mut self, deadline: Instant) -> Result<Option<T>, TimeoutError> {
        with_deadline(deadline, self.recv()).await
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_futures::join::join;

    use super::*;

    #[test]
    fn delivers_in_order_then_end_of_stream() {
        let link = Link::new();
        let (tx, mut rx) = link.split();

        let producer = async {
            for n in 1..=3u32 {
                tx.send(n).await;
            }
            tx.close().await;
        };
        let consumer = async {
            let mut seen = Vec::new();
            while let Some(n) = rx.recv().await {
                seen.push(n);
            }
            seen
        };

        let ((), seen) = block_on(join(producer, consumer));
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn closed_link_keeps_reporting_end_of_stream() {
        let link = Link::<u32>::new();
        let (tx, mut rx) = link.split();

        block_on(tx.close());
        assert_eq!(block_on(rx.recv()), None);
        assert!(rx.is_closed());
        assert_eq!(block_on(rx.recv()), None);
    }
}
