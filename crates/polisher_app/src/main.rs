mod app;
mod command;
mod effects;
mod logging;
mod render;

fn main() -> anyhow::Result<()> {
    app::run()
}
