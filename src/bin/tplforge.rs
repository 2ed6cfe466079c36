fn main() -> anyhow::Result<()> {
    tplforge::cli::run_cli()
}
