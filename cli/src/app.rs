use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, warn};

use wayfarer_core::{ChatBackend, ChatSession};
use wayfarer_hotels::HotelSearchAdapter;

use crate::marker::extract_tool_call;
use crate::output::{clear_screen, print_assistant_response, print_goodbye};

/// Upper bound on tool-call rounds resolved for a single user message.
/// A well-behaved model needs one round, or two when retrying a malformed
/// query; past this the model is stuck in a loop.
pub const MAX_TOOL_ROUNDS: usize = 5;

/// Terminal reply when the round budget is exhausted
pub const GIVE_UP_REPLY: &str =
    "I wasn't able to complete the hotel search after several attempts. \
     Please adjust the request and try again.";

/// Input sentinels ending the session
pub fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Prefix the outgoing message with the current UTC instant so the model
/// can reason about time zones explicitly.
pub fn timestamped(message: &str) -> String {
    format!("{} | {}", Utc::now().to_rfc3339(), message)
}

/// Send a message; a client failure becomes an inline `Error:` response
/// instead of crashing the loop.
async fn send_or_error(
    chat: &dyn ChatBackend,
    session: &mut ChatSession,
    message: &str,
) -> String {
    match chat.send_message(session, message).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Model client call failed");
            format!("Error: {}", e)
        }
    }
}

/// Resolve tool calls in the model's response until a plain reply remains.
///
/// Each round feeds the adapter's reply (hotel JSON or an error string)
/// back to the model, letting it retry a malformed query with the error
/// text as feedback. Bounded by [`MAX_TOOL_ROUNDS`].
pub async fn resolve_tool_calls(
    chat: &dyn ChatBackend,
    session: &mut ChatSession,
    adapter: &HotelSearchAdapter,
    mut response: String,
) -> String {
    let mut rounds = 0;
    while let Some(payload) = extract_tool_call(&response) {
        if rounds >= MAX_TOOL_ROUNDS {
            warn!(rounds, "Tool-call round budget exhausted, giving up");
            return GIVE_UP_REPLY.to_string();
        }
        rounds += 1;
        debug!(round = rounds, "Resolving tool call");

        let reply = adapter.run(payload).await.into_reply();
        response = send_or_error(chat, session, &reply).await;
    }
    response
}

/// One full turn: timestamp, send, resolve tool calls
async fn process_message(
    chat: &dyn ChatBackend,
    session: &mut ChatSession,
    adapter: &HotelSearchAdapter,
    message: &str,
) -> String {
    let response = send_or_error(chat, session, &timestamped(message)).await;
    resolve_tool_calls(chat, session, adapter, response).await
}

fn request_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message("Planning...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Runs a single query and prints the resolved response
pub async fn run_single_query(
    chat: &dyn ChatBackend,
    session: &mut ChatSession,
    adapter: &HotelSearchAdapter,
    prompt: String,
) -> Result<()> {
    let spinner = request_spinner();
    let response = process_message(chat, session, adapter, &prompt).await;
    spinner.finish_and_clear();

    print_assistant_response(&response);
    Ok(())
}

/// Runs the interactive chat session until an exit sentinel
pub async fn run_interactive_chat(
    chat: &dyn ChatBackend,
    session: &mut ChatSession,
    adapter: &HotelSearchAdapter,
) -> Result<()> {
    clear_screen();
    println!("Type 'exit' or 'quit' to end the session.");
    println!();

    loop {
        print!("{}: ", "You".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;
        if read == 0 {
            // stdin closed
            print_goodbye();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            print_goodbye();
            break;
        }

        let spinner = request_spinner();
        let response = process_message(chat, session, adapter, input).await;
        spinner.finish_and_clear();

        clear_screen();
        print_assistant_response(&response);
        println!();
    }

    Ok(())
}
