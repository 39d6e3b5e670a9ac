use std::path::Path;

use anyhow::Result;
use tokoh_core::CharacterResolver;

pub fn run(config: Option<&Path>, aliases: &[String]) -> Result<()> {
    let resolver = CharacterResolver::new(&super::load_config(config)?)?;

    for alias in aliases {
        println!("{alias}\t{}", resolver.normalize(alias));
    }
    Ok(())
}
