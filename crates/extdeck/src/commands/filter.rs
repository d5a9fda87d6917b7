//! Filter command

use anyhow::Result;
use camino::Utf8Path;
use std::sync::Arc;
use std::time::Duration;

use super::{first_catalog, print_catalog, start_engine};
use crate::cli::FilterArgs;
use crate::manager::SimulatedManager;

pub(crate) async fn run(args: FilterArgs, config: Option<&Utf8Path>) -> Result<()> {
    let manager = Arc::new(SimulatedManager::new(Duration::ZERO));
    let (engine, mut presentation) = start_engine(&args.source, config, manager)?;

    first_catalog(&mut presentation).await?;
    let filtered = engine.dispatcher().filter(&args.query);
    engine.shutdown();

    print_catalog(&filtered, args.json)
}
