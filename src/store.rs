use log::trace;

use crate::events::{
    Event, EventSink, PayloadGraphChanged, PayloadHistoryMoved, PayloadSelectionChanged,
    PayloadStepApplied,
};
use crate::{reduce, Action, AppState};

/// Owner of the live [`AppState`].
///
/// Every change goes through [`Store::dispatch`]; observers read the state
/// through [`Store::state`] or subscribe with an [`EventSink`].
#[derive(Default)]
pub struct Store {
    state: AppState,
    sink: Option<Box<dyn EventSink>>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state, sink: None }
    }

    /// Publishes events to `sink` after every dispatch that changed something.
    pub fn with_events(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Gives the state back, dropping the event sink.
    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        trace!("dispatch {action:?}");

        let cursor = self.state.history().cursor();
        let revision = self.state.history().revision();
        let selection = (
            self.state.selected_node.clone(),
            self.state.selected_edge.clone(),
        );
        let structural = action.is_structural();
        let history_move = matches!(action, Action::Undo | Action::Redo);
        let step_applied = matches!(action, Action::ApplyStep(Some(_)));

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        let Some(sink) = &self.sink else {
            return;
        };

        let history = self.state.history();

        if history_move && history.cursor() != cursor {
            sink.send(Event::HistoryMoved(PayloadHistoryMoved {
                cursor: history.cursor(),
                len: history.len(),
            }));
        } else if structural && history.revision() != revision {
            sink.send(Event::GraphChanged(PayloadGraphChanged {
                nodes: self.state.graph().node_count(),
                edges: self.state.graph().edge_count(),
                cursor: history.cursor(),
            }));
        }

        if self.state.selected_node != selection.0 || self.state.selected_edge != selection.1 {
            sink.send(Event::SelectionChanged(PayloadSelectionChanged {
                node: self.state.selected_node.clone(),
                edge: self.state.selected_edge.clone(),
            }));
        }

        if step_applied {
            if let Some(step) = self.state.current_step() {
                sink.send(Event::StepApplied(PayloadStepApplied::from(step)));
            }
        }
    }

    /// Dispatches every action in order.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    pub(crate) fn publish(&self, event: Event) {
        if let Some(sink) = &self.sink {
            sink.send(event);
        }
    }
}
