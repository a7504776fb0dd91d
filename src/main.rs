fn main() {
    std::process::exit(ringq::app::startup::startup());
}
