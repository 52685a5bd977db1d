fn main() {
    depict::cli::run();
}
