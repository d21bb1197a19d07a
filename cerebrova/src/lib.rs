pub mod commands;
pub mod handlers;

pub use commands::{CLAP_STYLING, command_argument_builder};
pub use handlers::{
    OutputFormat, ResultView, config_from_matches, descriptions_text, expand_path,
    prediction_json, save_report,
};
