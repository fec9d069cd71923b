use clap::Parser;

/// Conversational travel assistant with live hotel search
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// A single prompt to send; omit it to start an interactive session
    #[arg(index = 1)]
    pub prompt: Option<String>,

    /// Enter interactive chat mode explicitly
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Override the Gemini model name
    #[arg(long)]
    pub model: Option<String>,
}
