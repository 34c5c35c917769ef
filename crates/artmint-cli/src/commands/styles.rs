use anyhow::Result;
use artmint_gen::{backends, GenConfig};

pub fn run() -> Result<()> {
    let config = GenConfig::load()?;
    let book = config.style_book();

    println!("Available styles:\n");
    for style in book.styles() {
        println!("  {}", style.id);
        println!("    models: {}", style.candidates.join(", "));
        if !style.prompt_suffix.is_empty() {
            println!("    suffix: {}", style.prompt_suffix);
        }
        println!();
    }
    println!("Backends: {}", backends::available_backends().join(", "));

    Ok(())
}
