//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::clarity;
use crate::render;
use crate::session::{Role, Turn};
use crate::synthesis::{Conversation, SubmitRejected, SynthesisError, TurnOutcome};

/// Interactive planning REPL
pub struct ReplSession {
    conversation: Conversation,
}

impl ReplSession {
    /// Create a new REPL session around a conversation
    pub fn new(conversation: Conversation) -> Self {
        Self { conversation }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial: Option<String>) -> Result<()> {
        self.print_welcome();

        // If an initial message was provided, send it first
        if let Some(message) = initial {
            println!("{} {}", ">".bright_green(), message);
            self.process_user_input(&message).await;
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        // Send the line as typed, not the trimmed copy
                        self.process_user_input(&line).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        self.conversation.shutdown();
        info!(session_id = %self.conversation.session_id(), "REPL session ended");
        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "IntentBridge".bright_cyan().bold());
        println!("Session: {}", self.conversation.session_id());
        println!("Define your initiative to begin the synthesis process.");
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");
        debug!(%cmd, "handle_slash_command: called");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            "/plan" => {
                self.print_plan();
                SlashResult::Continue
            }
            "/json" => {
                self.print_plan_json();
                SlashResult::Continue
            }
            "/clarity" => {
                self.print_clarity();
                SlashResult::Continue
            }
            "/session" => {
                println!("Session: {}", self.conversation.session_id());
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit", "/quit".yellow());
        println!("  {:14} Show conversation history", "/history".yellow());
        println!("  {:14} Show the execution roadmap", "/plan".yellow());
        println!("  {:14} Show the raw plan as JSON", "/json".yellow());
        println!("  {:14} Show the clarity score", "/clarity".yellow());
        println!("  {:14} Show the session ID", "/session".yellow());
        println!();
        println!("Press Ctrl+C while waiting for a reply to cancel it.");
        println!();
    }

    fn print_history(&self) {
        let history = self.conversation.state().history();
        if history.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Project Conversation:".bright_cyan());
        for (i, turn) in history.iter().enumerate() {
            let role = match turn.role() {
                Role::User => "You".bright_green(),
                Role::System => "Bridge".bright_blue(),
            };
            let content = turn.content();
            let preview: String = content.chars().take(60).collect();
            let preview = if content.chars().count() > 60 {
                format!("{}...", preview)
            } else {
                preview
            };
            println!("  {}. {}: {}", i + 1, role, preview);
        }
        println!();
    }

    fn print_plan(&self) {
        let Some(plan) = self.conversation.state().plan() else {
            println!("{}", "Roadmap will manifest here once a plan is generated.".dimmed());
            return;
        };

        println!();
        println!("{}", "Execution Roadmap".bright_cyan().bold());
        for section in render::render(plan) {
            println!();
            println!("{}", section.title.to_uppercase().bright_blue().bold());
            for block in &section.blocks {
                match &block.label {
                    Some(label) => {
                        println!("  {}", label.dimmed());
                        print_indented(&block.body, "    ");
                    }
                    None => print_indented(&block.body, "  "),
                }
            }
        }
        println!();
    }

    fn print_plan_json(&self) {
        match self.conversation.state().plan() {
            Some(plan) => match serde_json::to_string_pretty(plan) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("{} {}", "Error:".red(), e),
            },
            None => println!("{}", "No plan yet.".dimmed()),
        }
    }

    fn print_clarity(&self) {
        let score = self.conversation.clarity();
        let text = format!("{}%", score);
        let text = if clarity::is_high(score) {
            text.green().bold()
        } else {
            text.blue().bold()
        };
        println!("Clarity Score: {}", text);
    }

    /// Send one turn, cancelling it if the user presses Ctrl+C
    async fn process_user_input(&mut self, input: &str) {
        let request = match self.conversation.begin(input) {
            Ok(request) => request,
            Err(SubmitRejected::EmptyInput) => return,
            Err(SubmitRejected::InFlight) => {
                println!("{}", "Still waiting for the previous reply.".yellow());
                return;
            }
        };

        println!("{}", "Synthesizing intelligence...".dimmed().italic());

        let outcome = tokio::select! {
            result = self.conversation.dispatch(&request) => result,
            _ = tokio::signal::ctrl_c() => {
                debug!("process_user_input: interrupted");
                Err(SynthesisError::Cancelled)
            }
        };

        let result = self.conversation.settle(outcome);
        if let Some(turn) = self.conversation.state().history().last() {
            print_system_turn(turn);
        }

        if result == TurnOutcome::PlanGenerated {
            self.print_plan();
        }
        self.print_clarity();
        println!();
    }
}

fn print_system_turn(turn: &Turn) {
    println!();
    println!("{}", turn.content().bright_white());
    for question in turn.questions() {
        println!("  {} {}", "?".bright_yellow(), question);
    }
}

fn print_indented(body: &str, indent: &str) {
    for line in body.lines() {
        println!("{}{}", indent, line);
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
