#![warn(missing_docs)]
//! # logwatch binary
//!
//! Line-oriented terminal explorer for LogWatch analysis results.

use std::io::{self, BufRead, Write};

use clap::Parser;
use logwatch_app::{
    AppConfig, AppError, Command, Controller, HELP, build_client, build_session, init_logging,
    parse_command, read_input_file, redact_sensitive, render_banner, render_session,
};
use logwatch_client::ServiceHealth;
use logwatch_ui::Event;
use tracing::{info, warn};

/// CLI entry point.
fn main() {
    let config = AppConfig::parse();

    if let Err(error) = init_logging() {
        eprintln!("failed to start logwatch: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(&config) {
        eprintln!("logwatch: {}", redact_sensitive(&error.to_string()));
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let client = build_client(config)?;
    let session = build_session(config)?;
    info!(endpoint = %client.endpoint(), mode = %config.mode, "explorer started");

    let mut controller = Controller::new(session, client);
    println!("{}", render_banner(controller.client().endpoint(), config.mode));
    println!("{}", render_session(controller.session()));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("logwatch> ");
        io::stdout().flush().map_err(|source| AppError::Io {
            path: "<stdout>".into(),
            source,
        })?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|source| AppError::Io {
            path: "<stdin>".into(),
            source,
        })?;

        controller.drain_replies();
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(error) = execute(&mut controller, config, command) {
                    println!("error: {}", redact_sensitive(&error.to_string()));
                }
            }
            Err(error) => println!("error: {error}"),
        }
    }

    Ok(())
}

fn execute(
    controller: &mut Controller,
    config: &AppConfig,
    command: Command,
) -> Result<(), AppError> {
    match command {
        Command::Load(path) => {
            let text = read_input_file(&path)?;
            controller.dispatch(Event::InputEdited(text));
            println!("loaded {}", path.display());
        }
        Command::Input => println!("{}", controller.session().input()),
        Command::Wait => {
            if !controller.wait_for_reply(config.timeout()) {
                println!("still waiting; 'show' checks again");
            }
            println!("{}", render_session(controller.session()));
        }
        Command::Show => println!("{}", render_session(controller.session())),
        Command::Health => match controller.client().health()? {
            ServiceHealth::Ok => println!("service ok"),
            ServiceHealth::Degraded(detail) => {
                warn!(detail = %redact_sensitive(&detail), "service degraded");
                println!("service degraded: {}", redact_sensitive(&detail));
            }
        },
        Command::Policy(filename) => println!("{}", controller.client().policy_url(&filename)?),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
        command => {
            if let Some(event) = command.into_event() {
                controller.dispatch(event);
            }
            println!("{}", render_session(controller.session()));
        }
    }
    Ok(())
}
