use log::info;

use crate::error::PlaybackError;
use crate::events::{Event, PayloadPlaybackFinished};
use crate::{Action, Step, StepProducer, Store};

/// Outcome of a single [`Playback::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// A step was pulled and dispatched.
    Step(Step),
    /// The running flag is off, nothing was pulled.
    Paused,
    /// The producer is exhausted.
    Finished,
}

/// Headless animation driver: pulls one step per tick from a producer and
/// dispatches it into a [`Store`].
///
/// There is no timer here; the host calls [`Playback::tick`] every
/// `speed_ms`. Pausing stops pulling without losing progress, dropping the
/// playback abandons the producer.
#[derive(Debug, Clone)]
pub struct Playback {
    producer: StepProducer,
    finished: bool,
    steps: usize,
}

impl Playback {
    /// Validates preconditions, resets coloring and the path log, sets the
    /// running flag and creates the producer over the live graph.
    ///
    /// # Errors
    ///
    /// Fails when no algorithm is selected, or when the algorithm needs a
    /// start node and none or an unknown one is set.
    pub fn start(store: &mut Store) -> Result<Self, PlaybackError> {
        let state = store.state();
        let algorithm = state.algorithm().ok_or(PlaybackError::NoAlgorithm)?;

        let start = if algorithm.requires_start() {
            let id = state
                .start_node()
                .ok_or(PlaybackError::MissingStartNode(algorithm))?;
            if !state.graph().contains_node(id) {
                return Err(PlaybackError::UnknownStartNode(id.to_string()));
            }
            Some(id.to_string())
        } else {
            None
        };

        let painted = state.start_node().map(str::to_string);

        store.dispatch(Action::ResetStatus);
        // keep the start node painted after the reset
        store.dispatch(Action::SetStartNode(painted));
        store.dispatch(Action::ClearPath);
        store.dispatch(Action::SetRunning(true));

        let producer = StepProducer::new(algorithm, store.state().graph(), start.as_deref());
        info!(
            "started {algorithm} playback over {} nodes",
            store.state().graph().node_count()
        );

        Ok(Self {
            producer,
            finished: false,
            steps: 0,
        })
    }

    /// Pulls and dispatches the next step if the store is running.
    ///
    /// Steps carrying a path note also append it to the path log. The terminal
    /// step turns the running flag off.
    pub fn tick(&mut self, store: &mut Store) -> Tick {
        if self.finished {
            return Tick::Finished;
        }
        if !store.state().running() {
            return Tick::Paused;
        }

        let Some(step) = self.producer.next() else {
            self.finish(store);
            return Tick::Finished;
        };
        self.steps += 1;

        store.dispatch(Action::ApplyStep(Some(step.clone())));
        if let Some(note) = &step.path_note {
            store.dispatch(Action::AppendPathNote(note.clone()));
        }
        if step.is_terminal() {
            self.finish(store);
        }

        Tick::Step(step)
    }

    /// Ticks until the producer is exhausted or the store stops running.
    /// Returns the dispatched steps.
    pub fn run_to_end(&mut self, store: &mut Store) -> Vec<Step> {
        let mut steps = Vec::new();
        while let Tick::Step(step) = self.tick(store) {
            steps.push(step);
        }
        steps
    }

    pub fn pause(&self, store: &mut Store) {
        store.dispatch(Action::SetRunning(false));
    }

    pub fn resume(&self, store: &mut Store) {
        if !self.finished {
            store.dispatch(Action::SetRunning(true));
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of steps dispatched so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn finish(&mut self, store: &mut Store) {
        self.finished = true;
        store.dispatch(Action::SetRunning(false));
        info!(
            "{} playback finished after {} steps",
            self.producer.algorithm(),
            self.steps
        );
        // traversals carry no cost
        let total_cost = if self.producer.algorithm().is_mst() {
            store.state().total_cost()
        } else {
            None
        };
        store.publish(Event::PlaybackFinished(PayloadPlaybackFinished { total_cost }));
    }
}
