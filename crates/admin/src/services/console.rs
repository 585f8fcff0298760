//! Console actor.
//!
//! A single task owns the [`AdminConsole`] and applies commands in the order
//! they arrive on a bounded channel. Handlers talk to it through a cloneable
//! [`ConsoleHandle`], so intents from concurrent requests never interleave.

use roster_core::{
    AdminConsole, ConsoleError, ConsoleSnapshot, DraftKind, Effect, FieldValue, Intent,
};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

use crate::error::AppError;

/// Reply channel for a single command.
type Reply<T> = oneshot::Sender<T>;

/// Messages understood by the console task.
#[derive(Debug)]
enum ConsoleCommand {
    /// Apply one intent.
    Apply {
        intent: Intent,
        reply: Reply<Result<Effect, ConsoleError>>,
    },
    /// Apply a batch of intents. Either all succeed or the console is left
    /// exactly as it was.
    ApplyAll {
        intents: Vec<Intent>,
        reply: Reply<Result<Vec<Effect>, ConsoleError>>,
    },
    /// Write a form into the open draft and save it.
    Submit {
        kind: DraftKind,
        fields: Vec<(String, FieldValue)>,
        reply: Reply<Result<Effect, ConsoleError>>,
    },
    /// Copy the current state.
    Snapshot { reply: Reply<ConsoleSnapshot> },
}

/// Handle for sending commands to the console task.
#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    tx: mpsc::Sender<ConsoleCommand>,
}

impl ConsoleHandle {
    /// Spawn the console task on the current runtime.
    ///
    /// `capacity` bounds how many commands may wait before senders are
    /// back-pressured. It must be greater than zero.
    #[must_use]
    pub fn spawn(console: AdminConsole, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        tokio::spawn(run(console, rx));
        Self { tx }
    }

    /// Apply one intent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Console`] when the console rejects the intent and
    /// [`AppError::Unavailable`] when the task has stopped.
    #[instrument(skip(self, intent), fields(intent = intent.name()))]
    pub async fn apply(&self, intent: Intent) -> Result<Effect, AppError> {
        let (reply, rx) = oneshot::channel();
        self.send(ConsoleCommand::Apply { intent, reply }).await?;
        Ok(receive(rx).await??)
    }

    /// Apply intents in order as one unit.
    ///
    /// # Errors
    ///
    /// Returns the first rejection, in which case none of the intents took
    /// effect, or [`AppError::Unavailable`] when the task has stopped.
    #[instrument(skip(self, intents), fields(count = intents.len()))]
    pub async fn apply_all(&self, intents: Vec<Intent>) -> Result<Vec<Effect>, AppError> {
        let (reply, rx) = oneshot::channel();
        self.send(ConsoleCommand::ApplyAll { intents, reply }).await?;
        Ok(receive(rx).await??)
    }

    /// Write a submitted form into the open draft and save it, with no other
    /// command running in between.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Console`] when the form does not match the open
    /// draft, a field is rejected, or the save is rejected. See
    /// [`AdminConsole::submit_form`] for what each leaves behind.
    #[instrument(skip(self, updates), fields(kind = %kind, count = updates.len()))]
    pub async fn submit(
        &self,
        kind: DraftKind,
        updates: Vec<(String, FieldValue)>,
    ) -> Result<Effect, AppError> {
        let (reply, rx) = oneshot::channel();
        self.send(ConsoleCommand::Submit {
            kind,
            fields: updates,
            reply,
        })
        .await?;
        Ok(receive(rx).await??)
    }

    /// Copy the current console state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the task has stopped.
    pub async fn snapshot(&self) -> Result<ConsoleSnapshot, AppError> {
        let (reply, rx) = oneshot::channel();
        self.send(ConsoleCommand::Snapshot { reply }).await?;
        receive(rx).await
    }

    /// Whether the console task is still accepting commands.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    async fn send(&self, command: ConsoleCommand) -> Result<(), AppError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| AppError::Unavailable("console task has stopped".to_string()))
    }
}

async fn receive<T>(rx: oneshot::Receiver<T>) -> Result<T, AppError> {
    rx.await
        .map_err(|_| AppError::Unavailable("console task dropped the reply".to_string()))
}

/// Console task loop. Ends when every handle has been dropped.
async fn run(mut console: AdminConsole, mut rx: mpsc::Receiver<ConsoleCommand>) {
    tracing::info!(
        users = console.users().len(),
        roles = console.roles().len(),
        validation = ?console.validation(),
        "Console task started"
    );

    while let Some(command) = rx.recv().await {
        match command {
            ConsoleCommand::Apply { intent, reply } => {
                let result = apply_logged(&mut console, intent);
                let _ = reply.send(result);
            }
            ConsoleCommand::ApplyAll { intents, reply } => {
                let _ = reply.send(apply_all(&mut console, intents));
            }
            ConsoleCommand::Submit {
                kind,
                fields,
                reply,
            } => {
                let result = console.submit_form(kind, fields);
                match &result {
                    Ok(_) => tracing::debug!(%kind, "Form submitted"),
                    Err(e) => tracing::info!(%kind, error = %e, "Form rejected"),
                }
                let _ = reply.send(result);
            }
            ConsoleCommand::Snapshot { reply } => {
                let _ = reply.send(console.snapshot());
            }
        }
    }

    tracing::info!("Console task stopped");
}

fn apply_logged(console: &mut AdminConsole, intent: Intent) -> Result<Effect, ConsoleError> {
    let name = intent.name();
    let result = console.apply(intent);
    match &result {
        Ok(_) => tracing::debug!(intent = name, "Intent applied"),
        Err(e) => tracing::info!(intent = name, error = %e, "Intent rejected"),
    }
    result
}

/// Apply against a scratch copy and commit only if every intent succeeds.
fn apply_all(
    console: &mut AdminConsole,
    intents: Vec<Intent>,
) -> Result<Vec<Effect>, ConsoleError> {
    let mut scratch = console.clone();
    let effects = intents
        .into_iter()
        .map(|intent| apply_logged(&mut scratch, intent))
        .collect::<Result<Vec<_>, _>>()?;
    *console = scratch;
    Ok(effects)
}
