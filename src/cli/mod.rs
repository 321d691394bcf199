pub mod commands;
pub mod ui;
pub mod util;

pub use commands::convert::Destination;
pub use ui::Output;
pub use util::{CommandContext, load_config};
