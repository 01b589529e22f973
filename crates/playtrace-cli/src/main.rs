mod command;
mod data;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    command::run()
}
