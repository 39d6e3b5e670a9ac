use std::path::Path;

use anyhow::Result;
use tokoh_core::CharacterResolver;

pub fn run(config: Option<&Path>, aliases: &[String]) -> Result<()> {
    let resolver = CharacterResolver::new(&super::load_config(config)?)?;

    for alias in aliases {
        let normalized = resolver.normalize(alias);
        let role = resolver.role_of(&normalized).unwrap_or("-");
        println!("{normalized}\t{role}");
    }
    Ok(())
}
