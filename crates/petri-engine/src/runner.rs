//! Background advance runner.
//!
//! [`AsyncWorld`] shares a [`World`] between the caller and a worker
//! thread behind one mutex, so an advance in progress and an
//! interactive edit can never interleave. Advance requests travel
//! over a bounded crossbeam channel and each completes through its
//! own oneshot-style reply channel; a free-run mode repeats advances
//! while an atomic flag stays set, checking it between steps — there
//! is no mid-step cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};

use crate::report::AdvanceReport;
use crate::world::World;

/// How long the idle worker blocks on the request channel before
/// re-checking the shutdown and run flags.
const IDLE_POLL: Duration = Duration::from_millis(5);

/// Configuration for [`AsyncWorld`].
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Minimum wall-clock spacing between free-run advances. The
    /// worker sleeps out the remainder of the budget after each step.
    /// Default: 16 ms (roughly 60 generations per second).
    pub step_budget: Duration,
    /// Capacity of the advance request channel. Default: 64.
    pub queue_depth: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            step_budget: Duration::from_millis(16),
            queue_depth: 64,
        }
    }
}

/// Error submitting an advance request to the worker thread.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The worker thread has shut down.
    Shutdown,
    /// The request channel is full (back-pressure).
    QueueFull,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "advance worker has shut down"),
            Self::QueueFull => write!(f, "advance request channel full"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// One queued advance, paired with its completion channel.
struct AdvanceRequest {
    reply: Sender<AdvanceReport>,
}

/// A [`World`] driven by a dedicated worker thread.
///
/// The caller's own loop (typically rendering and input) never blocks
/// waiting for a generation to compute: [`advance`](AsyncWorld::advance)
/// hands back a receiver that fires on completion. Interactive edits
/// go through [`edit`](AsyncWorld::edit)/[`read`](AsyncWorld::read),
/// which take the same lock the worker holds for the whole of each
/// step.
///
/// Dropping the handle stops the worker: the shutdown flag is set,
/// the request channel is disconnected, any in-flight advance runs to
/// completion, and the thread is joined.
pub struct AsyncWorld {
    world: Arc<Mutex<World>>,
    req_tx: Option<Sender<AdvanceRequest>>,
    run_flag: Arc<AtomicBool>,
    shutdown_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl AsyncWorld {
    /// Spawn a worker for `world` with default configuration.
    pub fn spawn(world: World) -> Self {
        Self::with_config(world, RunnerConfig::default())
    }

    /// Spawn a worker for `world` with the given configuration.
    pub fn with_config(world: World, config: RunnerConfig) -> Self {
        let world = Arc::new(Mutex::new(world));
        let (req_tx, req_rx) = crossbeam_channel::bounded(config.queue_depth.max(1));
        let run_flag = Arc::new(AtomicBool::new(false));
        let shutdown_flag = Arc::new(AtomicBool::new(false));

        let state = WorkerState {
            world: Arc::clone(&world),
            req_rx,
            run_flag: Arc::clone(&run_flag),
            shutdown_flag: Arc::clone(&shutdown_flag),
            step_budget: config.step_budget,
        };
        let worker = thread::spawn(move || state.run());

        Self {
            world,
            req_tx: Some(req_tx),
            run_flag,
            shutdown_flag,
            worker: Some(worker),
        }
    }

    /// Queue a single advance.
    ///
    /// Returns a receiver that yields the [`AdvanceReport`] once the
    /// step has committed. Dropping the receiver is allowed; the
    /// advance still runs and the reply is discarded.
    pub fn advance(&self) -> Result<Receiver<AdvanceReport>, SubmitError> {
        let req_tx = self.req_tx.as_ref().ok_or(SubmitError::Shutdown)?;
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        match req_tx.try_send(AdvanceRequest { reply: reply_tx }) {
            Ok(()) => Ok(reply_rx),
            Err(TrySendError::Full(_)) => Err(SubmitError::QueueFull),
            Err(TrySendError::Disconnected(_)) => Err(SubmitError::Shutdown),
        }
    }

    /// Queue a single advance and wait for it to complete.
    pub fn advance_blocking(&self) -> Result<AdvanceReport, SubmitError> {
        self.advance()?.recv().map_err(|_| SubmitError::Shutdown)
    }

    /// Start or stop the free-run loop.
    ///
    /// The flag is checked between successive advances, so stopping
    /// lets the current step finish rather than interrupting it.
    pub fn set_running(&self, running: bool) {
        self.run_flag.store(running, Ordering::Release);
    }

    /// Whether the free-run loop is currently enabled.
    pub fn is_running(&self) -> bool {
        self.run_flag.load(Ordering::Acquire)
    }

    /// Run `f` with exclusive access to the world.
    ///
    /// This is the interactive-edit path: it acquires the same lock
    /// the worker holds during an advance, so edits land strictly
    /// before or after a whole generation, never inside one.
    pub fn edit<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        let mut world = self.world.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut world)
    }

    /// Run `f` with shared read access to the world.
    ///
    /// Readers observe the state either before or after a complete
    /// advance, never mid-step.
    pub fn read<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        let world = self.world.lock().unwrap_or_else(PoisonError::into_inner);
        f(&world)
    }
}

impl Drop for AsyncWorld {
    fn drop(&mut self) {
        self.run_flag.store(false, Ordering::Release);
        self.shutdown_flag.store(true, Ordering::Release);
        // Disconnect the channel so an idle worker wakes immediately.
        self.req_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for AsyncWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncWorld")
            .field("running", &self.is_running())
            .field("shutdown", &self.shutdown_flag.load(Ordering::Acquire))
            .finish()
    }
}

/// State owned by the worker thread's main loop.
struct WorkerState {
    world: Arc<Mutex<World>>,
    req_rx: Receiver<AdvanceRequest>,
    run_flag: Arc<AtomicBool>,
    shutdown_flag: Arc<AtomicBool>,
    step_budget: Duration,
}

impl WorkerState {
    /// Main worker loop. Runs until shutdown or channel disconnect.
    fn run(self) {
        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                break;
            }

            if self.run_flag.load(Ordering::Acquire) {
                // Serve explicit requests ahead of the free-run cadence.
                match self.req_rx.try_recv() {
                    Ok(req) => {
                        let report = self.advance_once();
                        // Best-effort reply — the caller may have
                        // dropped their receiver.
                        let _ = req.reply.send(report);
                        continue;
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => break,
                }

                let started = Instant::now();
                self.advance_once();
                if let Some(remaining) = self.step_budget.checked_sub(started.elapsed()) {
                    thread::sleep(remaining);
                }
            } else {
                match self.req_rx.recv_timeout(IDLE_POLL) {
                    Ok(req) => {
                        let report = self.advance_once();
                        let _ = req.reply.send(report);
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        }
    }

    /// One full advance under the world lock.
    fn advance_once(&self) -> AdvanceReport {
        let mut world = self.world.lock().unwrap_or_else(PoisonError::into_inner);
        world.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petri_core::{Coord, Generation};

    fn blinker() -> World {
        let mut world = World::new();
        for coord in [Coord::new(-1, 0), Coord::new(0, 0), Coord::new(1, 0)] {
            world.add_living_cell(coord);
        }
        world
    }

    // ── Single advances ─────────────────────────────────────────

    #[test]
    fn advance_blocking_steps_one_generation() {
        let handle = AsyncWorld::spawn(blinker());
        let report = handle.advance_blocking().unwrap();
        assert_eq!(report.generation, Generation(1));
        assert_eq!(report.population, 3);
        assert_eq!(handle.read(|w| w.generation()), Generation(1));
    }

    #[test]
    fn advance_receiver_fires_on_completion() {
        let handle = AsyncWorld::spawn(blinker());
        let rx = handle.advance().unwrap();
        let report = rx.recv().unwrap();
        assert_eq!(report.generation, Generation(1));
    }

    #[test]
    fn queued_advances_apply_in_order() {
        let handle = AsyncWorld::spawn(blinker());
        let first = handle.advance().unwrap();
        let second = handle.advance().unwrap();
        assert_eq!(first.recv().unwrap().generation, Generation(1));
        assert_eq!(second.recv().unwrap().generation, Generation(2));
    }

    #[test]
    fn dropped_receiver_still_advances() {
        let handle = AsyncWorld::spawn(blinker());
        drop(handle.advance().unwrap());
        // The queued advance runs even with no listener; a follow-up
        // blocking advance lands on generation 2.
        let report = handle.advance_blocking().unwrap();
        assert_eq!(report.generation, Generation(2));
    }

    #[test]
    fn full_queue_rejects_further_advances() {
        let handle = AsyncWorld::with_config(
            blinker(),
            RunnerConfig {
                step_budget: Duration::from_millis(16),
                queue_depth: 1,
            },
        );
        thread::scope(|s| {
            // Stall the worker: the edit holds the world lock, so the
            // first dequeued advance blocks and the channel backs up.
            s.spawn(|| {
                handle.edit(|_| thread::sleep(Duration::from_millis(200)));
            });
            thread::sleep(Duration::from_millis(50));

            let deadline = Instant::now() + Duration::from_secs(5);
            let mut accepted = Vec::new();
            loop {
                match handle.advance() {
                    Ok(rx) => accepted.push(rx),
                    Err(SubmitError::QueueFull) => break,
                    Err(SubmitError::Shutdown) => panic!("worker shut down early"),
                }
                assert!(Instant::now() < deadline, "queue never filled");
            }

            // Once the lock frees up, every accepted advance completes.
            for rx in accepted {
                assert!(rx.recv().is_ok());
            }
        });
    }

    // ── Edits under the lock ────────────────────────────────────

    #[test]
    fn edits_interleave_whole_generations() {
        let handle = AsyncWorld::spawn(World::new());
        handle.edit(|world| {
            world.add_living_cell(Coord::new(0, 0));
        });
        let report = handle.advance_blocking().unwrap();
        assert_eq!(report.population, 0);
        assert!(handle.read(|w| w.is_empty()));
    }

    // ── Free-run loop ───────────────────────────────────────────

    #[test]
    fn free_run_advances_until_stopped() {
        let handle = AsyncWorld::with_config(
            blinker(),
            RunnerConfig {
                step_budget: Duration::ZERO,
                queue_depth: 4,
            },
        );
        handle.set_running(true);
        assert!(handle.is_running());

        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.read(|w| w.generation()) < Generation(10) {
            assert!(Instant::now() < deadline, "free-run made no progress");
            thread::sleep(Duration::from_millis(1));
        }

        handle.set_running(false);
        // The in-flight step may still finish; afterwards the count
        // settles.
        thread::sleep(Duration::from_millis(20));
        let settled = handle.read(|w| w.generation());
        thread::sleep(Duration::from_millis(20));
        assert_eq!(handle.read(|w| w.generation()), settled);
    }

    // ── Shutdown ────────────────────────────────────────────────

    #[test]
    fn drop_joins_worker_cleanly() {
        let handle = AsyncWorld::spawn(blinker());
        handle.advance_blocking().unwrap();
        drop(handle);
    }

    #[test]
    fn submit_error_display() {
        assert_eq!(SubmitError::Shutdown.to_string(), "advance worker has shut down");
        assert_eq!(
            SubmitError::QueueFull.to_string(),
            "advance request channel full"
        );
    }
}
