use tokio::sync::oneshot;

/// Aggregate completion across the whole board. Recomputed only when a job
/// transitions into Done; truncating integer division, except that a fully
/// done board reports exactly 100 regardless of how the division rounds.
#[derive(Debug)]
pub struct ProgressTracker {
    done: usize,
    percent: u8,
    signal: CompletionSignal,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            done: 0,
            percent: 0,
            signal: CompletionSignal::new(),
        }
    }

    /// Record one job's transition into Done against the current registry
    /// size. Returns the new overall percentage. Fires the completion
    /// signal the first time done reaches total.
    pub fn on_job_done(&mut self, total: usize) -> u8 {
        self.done = self.done.saturating_add(1).min(total);
        self.percent = overall_percent(self.done, total);
        if self.done == total {
            self.signal.fire();
        }
        self.percent
    }

    pub fn done_count(&self) -> usize {
        self.done
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.signal.fired
    }

    /// Hand out the one-shot receiver. The first caller gets it; later
    /// callers get None rather than a receiver that could dangle.
    pub fn take_completion(&mut self) -> Option<oneshot::Receiver<()>> {
        self.signal.take_receiver()
    }
}

/// `(100 * done) / total`, truncating, with the done == total case forced
/// to exactly 100 so truncation never leaves a finished board below full.
pub fn overall_percent(done: usize, total: usize) -> u8 {
    if total == 0 || done == 0 {
        return 0;
    }
    if done >= total {
        return 100;
    }
    ((100 * done) / total) as u8
}

/// One-shot completion latch. Fires at most once for the lifetime of the
/// tracker; receiving is a take-once handoff so a second await cannot
/// deadlock on an already-consumed channel.
#[derive(Debug)]
struct CompletionSignal {
    sender: Option<oneshot::Sender<()>>,
    receiver: Option<oneshot::Receiver<()>>,
    fired: bool,
}

impl CompletionSignal {
    fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            sender: Some(sender),
            receiver: Some(receiver),
            fired: false,
        }
    }

    fn fire(&mut self) {
        if self.fired {
            return;
        }
        self.fired = true;
        if let Some(sender) = self.sender.take() {
            // The receiver may already have been dropped by a caller that
            // never awaited; that is not an error.
            let _ = sender.send(());
        }
    }

    fn take_receiver(&mut self) -> Option<oneshot::Receiver<()>> {
        self.receiver.take()
    }
}
