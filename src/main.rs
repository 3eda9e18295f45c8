use std::fs;
use std::io::{self, BufRead, Write};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use plum_rules::config::SessionConfig;
use plum_rules::game_state::chess_types::Square;
use plum_rules::serialization::codec_registry::CodecRegistry;
use plum_rules::session::game_session::GameSession;
use plum_rules::utils::long_algebraic::move_to_long_algebraic;
use plum_rules::utils::render_game_state::{render_position, render_with_marks};

const HELP: &str = "commands: board | moves <sq> | move <from><to>[nbrq] | undo | status | fen | new [name] | save <file> | load <file> | help | quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig::from_env();
    let registry = CodecRegistry::from_config(&config);
    let mut session = GameSession::with_config(config.default_username.clone(), config);
    info!(username = %session.info().username, "console started");

    println!("{}", render_position(session.position()));
    println!("{}", session.status_text());
    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let mut input = String::new();

    loop {
        print!("> ");
        io::stdout().flush().ok();

        input.clear();
        match stdin_lock.read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!(%err, "cannot read stdin");
                break;
            }
        }

        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        match (command, argument) {
            ("quit" | "exit", _) => break,
            ("help", _) => println!("{HELP}"),
            ("board", _) => println!("{}", render_position(session.position())),
            ("status", _) => println!("{}", session.status_text()),
            ("fen", _) => println!("{}", session.position().to_fen()),
            ("moves", Some(square)) => match square.parse::<Square>() {
                Ok(square) => {
                    let moves = session.legal_moves(square);
                    let targets = moves.iter().map(|mv| mv.to).collect();
                    println!("{}", render_with_marks(session.position(), targets));
                    let listed: Vec<String> = moves.iter().map(move_to_long_algebraic).collect();
                    println!("{}", listed.join(" "));
                }
                Err(err) => println!("{err}"),
            },
            ("move", Some(text)) => match session.apply_long_algebraic(text) {
                Ok(_) => {
                    println!("{}", render_position(session.position()));
                    println!("{}", session.status_text());
                }
                Err(err) => println!("{err}"),
            },
            ("undo", _) => match session.undo() {
                Ok(mv) => {
                    println!("took back {mv}");
                    println!("{}", render_position(session.position()));
                }
                Err(err) => println!("{err}"),
            },
            ("new", name) => {
                session.restart(name);
                println!("{}", render_position(session.position()));
                println!("{}", session.status_text());
            }
            ("save", Some(path)) => match save(&session, &registry, path) {
                Ok(()) => println!("saved {path}"),
                Err(err) => println!("{err}"),
            },
            ("load", Some(path)) => match load(&mut session, &registry, path) {
                Ok(()) => {
                    println!("{}", render_position(session.position()));
                    println!("{}", session.status_text());
                }
                Err(err) => println!("{err}"),
            },
            _ => println!("{HELP}"),
        }
    }
}

fn save(session: &GameSession, registry: &CodecRegistry, path: &str) -> Result<(), String> {
    let codec = registry.for_file_name(path).map_err(|err| err.to_string())?;
    let bytes = codec
        .encode(&session.to_record())
        .map_err(|err| err.to_string())?;
    fs::write(path, bytes).map_err(|err| format!("cannot write {path}: {err}"))
}

fn load(session: &mut GameSession, registry: &CodecRegistry, path: &str) -> Result<(), String> {
    let codec = registry.for_file_name(path).map_err(|err| err.to_string())?;
    let bytes = fs::read(path).map_err(|err| format!("cannot read {path}: {err}"))?;
    let record = codec.decode(&bytes).map_err(|err| err.to_string())?;
    session.load_record(&record).map_err(|err| err.to_string())
}
