use super::commands::UciOutput;
use super::encoder::Encoder;
use log::debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Owns the stdout side of the protocol. Responses are queued on a channel
/// and printed in order by a dedicated thread.
pub struct UciConnection {
    output_tx: Sender<UciOutput>,
    output_handle: JoinHandle<()>,
}

impl Default for UciConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl UciConnection {
    pub fn new() -> Self {
        let (output_tx, output_rx) = channel();
        let output_handle = Self::spawn_output_handler(output_rx);

        Self {
            output_tx,
            output_handle,
        }
    }

    pub fn output_sender(&self) -> Sender<UciOutput> {
        self.output_tx.clone()
    }

    /// Waits until every queued response is printed. Senders handed out by
    /// `output_sender` must be dropped first.
    pub fn close(self) {
        drop(self.output_tx);
        let _ = self.output_handle.join();
    }

    fn spawn_output_handler(output_rx: Receiver<UciOutput>) -> JoinHandle<()> {
        thread::spawn(move || {
            let encoder = Encoder {};

            while let Ok(output) = output_rx.recv() {
                let out_line = encoder.encode(&output);
                debug!("Output: {:?}", out_line);
                println!("{}", out_line);
            }
        })
    }
}
