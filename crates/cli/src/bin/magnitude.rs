use anyhow::Result;

fn main() -> Result<()> {
    magnitude_cli::main_entry()
}
