use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::{debug, warn};

use super::{Command, InputSource};

/// Period between two attract-mode commands.
pub const DEFAULT_ATTRACT_PERIOD: Duration = Duration::from_millis(50);

/// Commands the attract producer picks from when it does not simply drop.
const ATTRACT_COMMANDS: [Command; 4] = [
    Command::SoftDrop,
    Command::MoveLeft,
    Command::MoveRight,
    Command::Rotate,
];

/// Synthetic source that auto-plays the demo shown between games.
///
/// A background thread emits one pseudo-random command per period into a
/// single-slot channel. Reads never block: if no command is waiting the game
/// carries on, and if the game has not taken the previous command yet the new
/// one is dropped. The slot is the only state shared with the thread.
///
/// The thread runs until [`AttractInput::stop`] is called or the value is
/// dropped.
#[derive(Debug)]
pub struct AttractInput {
    commands: Receiver<Command>,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl AttractInput {
    /// Starts a producer with a random seed.
    #[must_use]
    pub fn spawn(period: Duration) -> Self {
        Self::start(period, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Starts a producer whose command sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(period: Duration, seed: u64) -> Self {
        Self::start(period, Pcg32::seed_from_u64(seed))
    }

    fn start(period: Duration, mut rng: Pcg32) -> Self {
        let (command_tx, commands) = channel::bounded(1);
        let (stop, stop_rx) = channel::bounded::<()>(0);
        let ticker = channel::tick(period);

        let worker = thread::spawn(move || {
            debug!(?period, "attract input started");
            loop {
                crossbeam::select! {
                    recv(ticker) -> _ => {
                        match command_tx.try_send(random_command(&mut rng)) {
                            Ok(()) | Err(TrySendError::Full(_)) => {}
                            Err(TrySendError::Disconnected(_)) => break,
                        }
                    }
                    recv(stop_rx) -> _ => break,
                }
            }
            debug!("attract input stopped");
        });

        Self {
            commands,
            stop: Some(stop),
            worker: Some(worker),
        }
    }

    /// Returns whether the background producer is still attached.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Stops the background producer and waits for it to exit.
    ///
    /// A command already in the slot can still be read once. Calling `stop`
    /// again is a no-op.
    pub fn stop(&mut self) {
        // Dropping the only sender disconnects the stop channel and wakes the thread.
        drop(self.stop.take());
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("attract input thread panicked");
        }
    }
}

impl Drop for AttractInput {
    fn drop(&mut self) {
        self.stop();
    }
}

impl InputSource for AttractInput {
    fn read_command(&mut self) -> Option<Command> {
        self.commands.try_recv().ok()
    }
}

/// Soft drop half of the time, otherwise any of [`ATTRACT_COMMANDS`].
fn random_command<R>(rng: &mut R) -> Command
where
    R: Rng + ?Sized,
{
    if rng.random_bool(0.5) {
        Command::SoftDrop
    } else {
        ATTRACT_COMMANDS[rng.random_range(0..ATTRACT_COMMANDS.len())]
    }
}
