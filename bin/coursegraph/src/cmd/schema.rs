//! Schema command - print the GraphQL SDL

use color_eyre::eyre::Result;

pub fn run() -> Result<()> {
    print!("{}", coursegraph_api::sdl());
    Ok(())
}
