fn main() -> Result<(), querydetect::cli::CliError> {
    querydetect::run()
}
