use std::path::PathBuf;

use promviz_lib::{VisualQuery, render};

use super::Result;
use super::query_loader::load_json;

pub struct RenderArgs {
    pub model_path: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let query: VisualQuery = load_json(args.model_path.as_deref())?;
    println!("{}", render(&query));
    Ok(())
}
