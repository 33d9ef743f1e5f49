mod event;
mod sink;

pub use event::{
    Event, PayloadGraphChanged, PayloadHistoryMoved, PayloadPlaybackFinished,
    PayloadSelectionChanged, PayloadStepApplied,
};

pub use sink::EventSink;
