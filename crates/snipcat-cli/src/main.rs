fn main() {
    snipcat_cli::run_main();
}
