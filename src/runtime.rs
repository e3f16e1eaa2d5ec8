use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use log::warn;

use crate::error::FetchError;
use crate::trivia::{Category, Question};

/// Unified event type consumed by the app runner. Input, timer ticks and
/// finished fetches all travel through the same queue.
#[derive(Debug)]
pub enum TriviaEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    Categories(Result<Vec<Category>, FetchError>),
    /// Questions fetched for the given round.
    Questions {
        round: u32,
        result: Result<Vec<Question>, FetchError>,
    },
}

/// Source of events (keyboard, resize, fetch completions)
pub trait TriviaEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TriviaEvent, RecvTimeoutError>;

    /// Handle for posting events (e.g. fetch results) into the same queue.
    fn sender(&self) -> Sender<TriviaEvent>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<TriviaEvent>,
    rx: Receiver<TriviaEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if input_tx.send(TriviaEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if input_tx.send(TriviaEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("terminal input reader stopped: {e}");
                    break;
                }
            }
        });

        Self { tx, rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TriviaEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TriviaEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<TriviaEvent> {
        self.tx.clone()
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source: events are pushed through `sender()`
pub struct TestEventSource {
    tx: Sender<TriviaEvent>,
    rx: Receiver<TriviaEvent>,
}

impl TestEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl Default for TestEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TriviaEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TriviaEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<TriviaEvent> {
        self.tx.clone()
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Ticks are scheduled against a deadline, so a burst of key presses does
/// not postpone the next tick.
pub struct Runner<E: TriviaEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: TriviaEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    pub fn sender(&self) -> Sender<TriviaEvent> {
        self.event_source.sender()
    }

    /// Blocks until the next event or the next tick deadline, whichever comes first
    pub fn step(&mut self) -> TriviaEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            return self.tick(now);
        }

        match self.event_source.recv_timeout(self.next_tick - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.tick(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(self.next_tick.saturating_duration_since(Instant::now()));
                self.tick(Instant::now())
            }
        }
    }

    fn tick(&mut self, now: Instant) -> TriviaEvent {
        self.next_tick += self.ticker.interval();
        // after a long stall, skip missed ticks rather than bursting them
        if self.next_tick < now {
            self.next_tick = now + self.ticker.interval();
        }
        TriviaEvent::Tick
    }
}

/// Run `job` on a worker thread and post its event into the queue.
pub fn spawn_fetch<F>(tx: Sender<TriviaEvent>, job: F)
where
    F: FnOnce() -> TriviaEvent + Send + 'static,
{
    std::thread::spawn(move || {
        // the receiver is gone only when the app is shutting down
        let _ = tx.send(job());
    });
}
