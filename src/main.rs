use anyhow::Result;

mod app;

fn main() -> Result<()> {
    let args = file_organizer::cli::parse();
    app::run(args)
}
