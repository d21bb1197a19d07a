pub mod config;
pub mod dom;
pub mod neural;
pub mod page;
pub mod predict;
pub mod report;
pub mod toggle;
pub mod upload;

use colored::Colorize;

pub use config::Config;
pub use dom::{BindError, Bindings, Document, Element, ElementId};
pub use neural::{NeuralNetwork, Viewport};
pub use page::{Completion, Page, PageEvent, Task, run_task};
pub use predict::{SubmitError, SubmitState};

const BANNER: &str = r#"
   ___                _
  / __|___ _ _ ___ __| |__ _ _ _____ ____ _
 | (__/ -_) '_/ -_) _` / _` | '_/ _ \ V / _` |
  \___\___|_| \___\__,_\__,_|_| \___/\_/\__,_|
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan().bold());
    println!(
        "  {} {}\n",
        "Brain MRI tumor detection client".bright_white(),
        concat!("v", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
