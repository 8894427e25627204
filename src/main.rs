fn main() -> Result<(), eframe::Error> {
    // Set up logging, filtered through RUST_LOG
    env_logger::init();

    graph_editor::run_app()
}
