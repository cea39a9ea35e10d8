mod cli;
mod commands;
mod logging;

use cli::{
    AddLabelParams, CheckParams, CstParams, ModifyParams, ParseParams, RenderParams, build_cli,
};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(verbosity(&matches));

    let result = match matches.subcommand() {
        Some(("parse", m)) => commands::parse::run(ParseParams::from_matches(m).into()),
        Some(("check", m)) => commands::check::run(CheckParams::from_matches(m).into()),
        Some(("render", m)) => commands::render::run(RenderParams::from_matches(m).into()),
        Some(("add-label", m)) => {
            commands::add_label::run(AddLabelParams::from_matches(m).into())
        }
        Some(("modify", m)) => commands::modify::run(ModifyParams::from_matches(m).into()),
        Some(("cst", m)) => commands::cst::run(CstParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// `-v` is global, so the subcommand sees it wherever it was written.
fn verbosity(matches: &clap::ArgMatches) -> u8 {
    matches
        .subcommand()
        .map_or(0, |(_, m)| m.get_count("verbose"))
}
