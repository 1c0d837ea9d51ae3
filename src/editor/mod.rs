//! Workflow editor model
//!
//! The editor is a state/update/view loop: [`EditorState`] holds the data,
//! [`update`] applies one [`Msg`], and [`view`] projects the state for
//! whatever front end draws it.

mod palette;
mod state;
mod update;
mod view;

pub use palette::common_components;
pub use state::{
    DEFAULT_TARGET_PATH, EditorState, IMPORTED_TARGET_PATH, PublishForm, Status,
};
pub use update::{Msg, update};
pub use view::{EMPTY_STEP_DETAIL, EditorView, StepView, view};
