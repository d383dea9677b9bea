//! Terminal output for the `ostriv` CLI
//!
//! Uses `cliclack` for styled output in a terminal and falls back to plain
//! prefixed lines when stdout is piped or running under CI.
//!
//! # Example
//!
//! ```rust,ignore
//! use ostriv::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Loading categories...");
//! // ... fetch ...
//! spinner.stop("7 categories");
//!
//! ui::step_warn_hint(&ctx, "CMS unavailable", "Showing built-in categories");
//! ```

mod context;
mod output;
mod progress;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, outro_warn, remark, section, step_error_detail, step_info,
    step_ok, step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use theme::{init_theme, OstrivTheme};
