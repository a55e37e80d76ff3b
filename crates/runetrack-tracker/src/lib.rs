//! Session-tracking state machine coordinating the game client and recorder.

use chrono::Local;
use runetrack_client::GameClient;
use runetrack_recorder::Recorder;
use runetrack_types::{
    config::TrackerConfig,
    game::{BoardSnapshot, DeckInfo},
    session::SessionHandle,
    Result,
};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// The tracker's current classification of the external game's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No match running; polling for one.
    Idle,
    /// Match in progress but no valid deck captured yet.
    AwaitingDeck,
    /// Session open; sampling board state.
    InMatch,
}

struct ActiveSession {
    handle: SessionHandle,
    /// Compact payload of the last persisted board sample. `None` until the
    /// first sample, which is therefore always written.
    last_board: Option<String>,
}

/// Polls the game client on a fixed cadence, opens a recording session when
/// a match with a valid deck appears, samples board state while the match
/// runs, and records the result when it ends.
pub struct SessionTracker<C, R>
where
    C: GameClient,
    R: Recorder,
{
    client: C,
    recorder: R,
    config: TrackerConfig,
    phase: Phase,
    session: Option<ActiveSession>,
}

impl<C, R> SessionTracker<C, R>
where
    C: GameClient,
    R: Recorder,
{
    pub fn new(config: TrackerConfig, client: C, recorder: R) -> Self {
        Self {
            client,
            recorder,
            config,
            phase: Phase::Idle,
            session: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs the poll loop until a fatal error surfaces. Network failures are
    /// absorbed inside `tick`; anything propagated here is unrecoverable.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let pause = self.tick().await?;
            sleep(pause).await;
        }
    }

    /// Performs one poll cycle without sleeping and returns the pause to
    /// apply before the next cycle.
    pub async fn tick(&mut self) -> Result<Duration> {
        match self.phase {
            Phase::Idle | Phase::AwaitingDeck => self.poll_for_match().await,
            Phase::InMatch => self.sample_match().await,
        }
    }

    async fn poll_for_match(&mut self) -> Result<Duration> {
        let in_progress = match self.client.fetch_board().await {
            Ok(board) => board.in_progress(),
            Err(err) => {
                warn!("Board poll failed: {err}");
                false
            }
        };

        if !in_progress {
            if self.phase == Phase::AwaitingDeck {
                info!("Match ended before a valid deck appeared; back to idle");
                self.phase = Phase::Idle;
            } else {
                debug!("Player is not in game");
            }
            return Ok(self.idle_pause());
        }

        if self.phase == Phase::Idle {
            info!("Game in progress");
            self.phase = Phase::AwaitingDeck;
        }

        match self.client.fetch_deck().await {
            Ok(deck) if deck.is_valid() => {
                self.begin_session(&deck)?;
                Ok(self.sample_pause())
            }
            Ok(_) => {
                info!("No active deck found, relaunching tracker...");
                Ok(self.idle_pause())
            }
            Err(err) => {
                warn!("Deck fetch failed: {err}");
                Ok(self.idle_pause())
            }
        }
    }

    fn begin_session(&mut self, deck: &DeckInfo) -> Result<()> {
        let handle = self.recorder.open(Local::now())?;
        self.recorder.write_deck(&handle, deck)?;
        info!("Recording session {}", handle.name());
        self.session = Some(ActiveSession {
            handle,
            last_board: None,
        });
        self.phase = Phase::InMatch;
        Ok(())
    }

    async fn sample_match(&mut self) -> Result<Duration> {
        let board = match self.client.fetch_board().await {
            Ok(board) => board,
            Err(err) => {
                warn!("Board sample failed, no data this cycle: {err}");
                return Ok(self.sample_pause());
            }
        };

        if board.in_progress() {
            self.record_sample(&board)?;
            Ok(self.sample_pause())
        } else {
            self.finish_session().await?;
            Ok(self.idle_pause())
        }
    }

    fn record_sample(&mut self, board: &BoardSnapshot) -> Result<()> {
        let payload = board.to_payload();
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        if session.last_board.as_deref() == Some(payload.as_str()) {
            debug!("Board unchanged, skipping sample");
            return Ok(());
        }
        self.recorder
            .write_board(&session.handle, Local::now(), board)?;
        if let Some(session) = self.session.as_mut() {
            session.last_board = Some(payload);
        }
        Ok(())
    }

    async fn finish_session(&mut self) -> Result<()> {
        info!("Game has ended");
        self.phase = Phase::Idle;
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        match self.client.fetch_result().await {
            Ok(result) => self.recorder.write_result(&session.handle, &result)?,
            Err(err) => warn!(
                "Result fetch failed; closing session {} without a result artifact: {err}",
                session.handle.name()
            ),
        }
        info!("Closed session {}", session.handle.name());
        Ok(())
    }

    fn idle_pause(&self) -> Duration {
        Duration::from_millis(self.config.idle_poll_ms)
    }

    fn sample_pause(&self) -> Duration {
        Duration::from_millis(self.config.sample_poll_ms)
    }
}
