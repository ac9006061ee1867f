use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a message to the chat API and print the reply
    Chat {
        /// Message text; several words are joined with single spaces
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}
