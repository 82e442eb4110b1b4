fn main() -> anyhow::Result<()> {
    beancount_comdirect_cli::run(std::env::args())
}
