#![forbid(unsafe_code)]

//! The message-passing program loop.
//!
//! State flows one way: the terminal produces [`Event`]s, the loop turns
//! them into the model's message type, [`Model::update`] mutates state and
//! returns a [`Cmd`], and the loop repaints by calling [`Model::view`]
//! after every update. Widgets never call back into their owner; they
//! return typed actions from their event handlers and the owning model
//! interprets them inside `update`.
//!
//! Timers are cooperative: a model exposes its earliest pending deadline
//! via [`Model::next_deadline`], the loop polls the terminal no longer
//! than that, and synthesizes an [`Event::Tick`] when the deadline
//! passes. This is how the search debounce fires without threads.

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crate::backend::Terminal;
use crate::buffer::Frame;
use crate::event::Event;

/// How long to sleep in the event poll when no deadline is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A command returned from [`Model::update`].
#[derive(Debug)]
pub enum Cmd<M> {
    /// Nothing to do.
    None,
    /// Terminate the program loop.
    Quit,
    /// Feed another message through `update` in the same drain pass.
    Msg(M),
    /// Run several commands in order.
    Batch(Vec<Cmd<M>>),
}

impl<M> Cmd<M> {
    /// Convenience constructor for [`Cmd::None`].
    #[must_use]
    pub const fn none() -> Self {
        Cmd::None
    }

    /// Convenience constructor for [`Cmd::Msg`].
    #[must_use]
    pub const fn msg(message: M) -> Self {
        Cmd::Msg(message)
    }

    /// Convenience constructor for [`Cmd::Batch`].
    #[must_use]
    pub fn batch(cmds: Vec<Cmd<M>>) -> Self {
        Cmd::Batch(cmds)
    }

    /// True if this command (or any nested one) quits.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_quit),
            _ => false,
        }
    }
}

/// An application driven by the program loop.
pub trait Model {
    /// The model's message type. Terminal events are converted into it.
    type Message: From<Event> + Send + 'static;

    /// Called once before the first draw.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::None
    }

    /// Apply one message and return follow-up work.
    fn update(&mut self, message: Self::Message) -> Cmd<Self::Message>;

    /// Paint the whole screen.
    fn view(&self, frame: &mut Frame);

    /// The earliest pending timer deadline, if any.
    ///
    /// The loop wakes no later than this and delivers an
    /// [`Event::Tick`].
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

/// Drain a command tree through the model.
///
/// Returns `true` when a [`Cmd::Quit`] was encountered; remaining
/// commands are still applied so teardown messages are not lost.
pub fn drain<M: Model>(model: &mut M, cmd: Cmd<M::Message>) -> bool {
    let mut quit = false;
    let mut queue = VecDeque::from([cmd]);
    while let Some(next) = queue.pop_front() {
        match next {
            Cmd::None => {}
            Cmd::Quit => quit = true,
            Cmd::Msg(message) => {
                let follow_up = model.update(message);
                queue.push_back(follow_up);
            }
            Cmd::Batch(cmds) => queue.extend(cmds),
        }
    }
    quit
}

/// Run a model against the live terminal until it quits.
///
/// Sets up raw mode, the alternate screen, mouse capture, and bracketed
/// paste; restores them on exit (including early return via `?`).
pub fn run<M: Model>(model: &mut M) -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    #[cfg(feature = "tracing")]
    tracing::debug!("program loop started");

    let init_cmd = model.init();
    if drain(model, init_cmd) {
        return Ok(());
    }

    loop {
        terminal.draw(|frame| model.view(frame))?;

        let deadline = model.next_deadline();
        let timeout = match deadline {
            Some(at) => at.saturating_duration_since(Instant::now()).min(IDLE_POLL),
            None => IDLE_POLL,
        };

        let event = terminal.poll_event(timeout)?;
        let message = match event {
            Some(event) => Some(M::Message::from(event)),
            None => {
                // Poll expired. Only tick if a deadline actually passed.
                match deadline {
                    Some(at) if Instant::now() >= at => Some(M::Message::from(Event::Tick)),
                    _ => None,
                }
            }
        };

        if let Some(message) = message {
            let cmd = model.update(message);
            if drain(model, cmd) {
                break;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("program loop finished");
    Ok(())
}
