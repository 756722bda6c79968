use order_desk::cli;

fn main() -> anyhow::Result<()> {
    cli::run()
}
