use std::path::PathBuf;

use promviz_lib::VisualParser;

use super::Result;
use super::query_loader::load_query;

pub struct ParseArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub compact: bool,
    pub fuel: Option<u32>,
}

pub fn run(args: ParseArgs) -> Result<()> {
    println!("{}", output(&args)?);
    Ok(())
}

pub(crate) fn output(args: &ParseArgs) -> Result<String> {
    let input = load_query(args.query_path.as_deref(), args.query_text.as_deref())?;

    let mut parser = VisualParser::new();
    if let Some(fuel) = args.fuel {
        parser = parser.with_exec_fuel(fuel);
    }
    let parsed = parser.parse(&input.text);

    let json = if args.compact {
        serde_json::to_string(&parsed)?
    } else {
        serde_json::to_string_pretty(&parsed)?
    };
    Ok(json)
}
