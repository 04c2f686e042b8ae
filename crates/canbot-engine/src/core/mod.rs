pub use self::{action::*, context::*, percept::*};

pub(crate) mod action;
pub(crate) mod context;
pub(crate) mod percept;
