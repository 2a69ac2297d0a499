//! One-way progress reporting for generation calls.
//!
//! The orchestrator emits milestone events into a bounded channel and never
//! waits on the consumer: if the channel is full or the receiver is gone,
//! the event is dropped.

use tokio::sync::mpsc;

/// Milestones emitted while a generation call advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The seed image is being encoded for transmission.
    EncodingImage,
    /// The generation request is being submitted.
    Submitting,
    /// The job was accepted and is starting up.
    WarmingUp,
    /// The job status is being re-checked.
    CheckingStatus,
    /// The generated video is being downloaded.
    Downloading,
    /// The downloaded bytes are being wrapped into a handle.
    Finalizing,
}

impl Progress {
    /// Human-readable milestone text.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EncodingImage => "Encoding image...",
            Self::Submitting => "Sending request to AI...",
            Self::WarmingUp => "AI is warming up...",
            Self::CheckingStatus => "Checking video generation status...",
            Self::Downloading => "Downloading generated video...",
            Self::Finalizing => "Finalizing video...",
        }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Sending half of a progress channel.
///
/// Cheap to clone; emission is fire-and-forget.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: Option<mpsc::Sender<Progress>>,
}

impl ProgressSender {
    /// Creates a bounded progress channel. The receiver drains milestone
    /// events; overflow drops events rather than slowing generation down.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Progress>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx: Some(tx) }, rx)
    }

    /// A sender that discards every event.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub(crate) fn emit(&self, event: Progress) {
        if let Some(tx) = &self.tx {
            let _ = tx.try_send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_messages() {
        assert_eq!(Progress::EncodingImage.message(), "Encoding image...");
        assert_eq!(Progress::Submitting.message(), "Sending request to AI...");
        assert_eq!(Progress::WarmingUp.message(), "AI is warming up...");
        assert_eq!(
            Progress::CheckingStatus.message(),
            "Checking video generation status..."
        );
        assert_eq!(Progress::Downloading.message(), "Downloading generated video...");
        assert_eq!(Progress::Finalizing.message(), "Finalizing video...");
    }

    #[test]
    fn test_display_matches_message() {
        assert_eq!(Progress::WarmingUp.to_string(), "AI is warming up...");
    }

    #[test]
    fn test_emit_never_blocks_on_full_channel() {
        let (sender, mut rx) = ProgressSender::channel(1);
        sender.emit(Progress::Submitting);
        sender.emit(Progress::WarmingUp);
        sender.emit(Progress::CheckingStatus);

        // Only the first event fits; the rest were dropped, not queued.
        assert!(matches!(rx.try_recv(), Ok(Progress::Submitting)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_emit_after_receiver_dropped() {
        let (sender, rx) = ProgressSender::channel(4);
        drop(rx);
        sender.emit(Progress::Downloading);
    }

    #[test]
    fn test_disabled_sender_discards() {
        ProgressSender::disabled().emit(Progress::Finalizing);
    }
}
