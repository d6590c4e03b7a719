fn main() -> anyhow::Result<()> {
    pppscript::init_tracing();
    pppscript::run()
}
