use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("cerebrova")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("cerebrova")
        .about("Brain MRI tumor detection client")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-s --"server" <URL>)
                .required(false)
                .global(true)
                .help("Base URL of the prediction service (overrides CEREBROVA_SERVER_URL)")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .global(true)
                .help("Request timeout in seconds (overrides CEREBROVA_TIMEOUT_SECS)")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .subcommand_required(false)
        .subcommand(
            command!("ui")
                .about("Open the interactive detection page in the terminal")
                .arg(
                    arg!([PAGE_URL])
                        .required(false)
                        .help("A page URL carrying a previous result to show on start")
                        .value_parser(clap::value_parser!(Url)),
                ),
        )
        .subcommand(
            command!("predict")
                .about("Submit one MRI image for analysis and print the result")
                .arg(
                    arg!(<IMAGE>)
                        .required(true)
                        .help("Path to a JPG, JPEG or PNG brain MRI scan"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-r --"save-report" <PATH>)
                        .required(false)
                        .help("Download the PDF report for the result to this path"),
                ),
        )
        .subcommand(
            command!("descriptions").about("Print the descriptions of the tumor types"),
        )
        .subcommand(
            command!("show")
                .about("Render the result carried in a page URL")
                .arg(
                    arg!(<PAGE_URL>)
                        .required(true)
                        .help("URL with result, status, confidence and tumor_class parameters")
                        .value_parser(clap::value_parser!(Url)),
                ),
        )
}
