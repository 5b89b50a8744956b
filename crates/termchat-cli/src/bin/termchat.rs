fn main() {
    let code = termchat_cli::run_from_env();
    std::process::exit(code);
}
