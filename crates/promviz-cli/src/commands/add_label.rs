use std::path::PathBuf;

use promviz_lib::add_label_filter;

use super::Result;
use super::query_loader::load_query;

pub struct AddLabelArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub label: String,
    pub value: String,
    pub op: String,
}

pub fn run(args: AddLabelArgs) -> Result<()> {
    println!("{}", output(&args)?);
    Ok(())
}

pub(crate) fn output(args: &AddLabelArgs) -> Result<String> {
    let input = load_query(args.query_path.as_deref(), args.query_text.as_deref())?;
    Ok(add_label_filter(
        &input.text,
        &args.label,
        args.value.as_str(),
        &args.op,
    )?)
}
