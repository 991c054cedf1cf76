use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use app_logging::app_info;
use polisher_core::{update, AppState, Effect, Msg};
use polisher_engine::{render_markdown, ClientSettings, EngineHandle};

use crate::command::{self, Command, HELP_TEXT};
use crate::effects::EffectRunner;
use crate::logging::{self, LogDestination};
use crate::render;

/// Main loop: stdin lines come in on one channel, engine and effect
/// completions on another, and every state change ends in a redraw.
pub fn run() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);
    app_info!("polisher starting");

    let engine =
        EngineHandle::new(ClientSettings::default()).context("failed to start the engine")?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx);

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut state = AppState::new();
    runner.run(vec![Effect::LoadModels]);
    println!("{HELP_TEXT}");

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            state = apply(&runner, state, msg);
        }

        match line_rx.recv_timeout(Duration::from_millis(25)) {
            Ok(line) => match command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => println!("{HELP_TEXT}"),
                Ok(Command::Show) => println!("{}", render::render(&state.view())),
                Ok(Command::ShowHtml) => match state.current_result() {
                    Some(result) => println!("{}", render_markdown(&result.optimized_prompt)),
                    None => println!("no result to render"),
                },
                Ok(Command::Dispatch(msg)) => state = apply(&runner, state, msg),
                Err(usage) => println!("{usage}"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if state.consume_dirty() {
            println!("{}", render::render(&state.view()));
        }
    }

    app_info!("polisher exiting");
    Ok(())
}

fn apply(runner: &EffectRunner, state: AppState, msg: Msg) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}
