//! Preview command: generate without minting

use anyhow::Result;

pub fn run(prompt: &str, style: &str, output: &str, backend: &str) -> Result<()> {
    let resolver = super::build_resolver(backend)?;
    let resolved = resolver.resolve(prompt, style)?;

    std::fs::write(output, &resolved.bytes)?;

    match (&resolved.model, &resolved.degraded) {
        (Some(model), _) => println!("Generated with {} -> {}", model, output),
        (None, Some(summary)) => {
            println!("All candidates failed, wrote local placeholder -> {}", output);
            println!("  {}", summary);
        }
        (None, None) => println!("Wrote {}", output),
    }
    println!("  prompt used: {}", resolved.prompt_used);

    Ok(())
}
