use std::path::PathBuf;

use promviz_lib::parser;

use super::Result;
use super::query_loader::load_query;

pub struct CstArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: CstArgs) -> Result<()> {
    print!("{}", output(&args)?);
    Ok(())
}

pub(crate) fn output(args: &CstArgs) -> Result<String> {
    let input = load_query(args.query_path.as_deref(), args.query_text.as_deref())?;
    let (parse, _) = parser::parse(&input.text)?;
    Ok(parse
        .printer()
        .with_trivia(args.raw)
        .with_spans(args.spans)
        .dump())
}
